//! Item instances of one calculation: every ship, module, charge, drone,
//! fighter, implant, skill and environment effect with its base attributes.

use ahash::AHashMap;
use smallvec::SmallVec;

use crate::attributes::{Attr, AttributeStore};
use crate::content::StaticData;
use crate::types::{
    EffectId, GroupId, ItemCategory, ItemKey, ModuleStatus, Mutation, SimulationInput, TypeId,
};

/// One item instance with immutable base attributes.
#[derive(Debug, Clone)]
pub(crate) struct ItemNode {
    pub key: ItemKey,
    pub type_id: TypeId,
    pub group_id: GroupId,
    pub name: String,
    pub category: ItemCategory,
    pub base: AttributeStore,
    pub effects: SmallVec<[EffectId; 8]>,
    pub status: ModuleStatus,
    /// Item this one is located in (modules and charges in the ship,
    /// implants and skills in the character).
    pub location: Option<ItemKey>,
    pub owned_by_character: bool,
    /// The module a charge is loaded in, or the charge loaded in a module.
    pub other: Option<ItemKey>,
    pub required_skills: SmallVec<[TypeId; 6]>,
}

impl ItemNode {
    /// Builds an item from static data, layering any mutation on top.
    ///
    /// Unknown types yield an item with no attributes and no effects.
    pub fn from_type<D: StaticData + ?Sized>(
        key: ItemKey,
        category: ItemCategory,
        type_id: TypeId,
        mutation: Option<&Mutation>,
        data: &D,
    ) -> Self {
        let mut resolved_type = type_id;
        let mut name = None;
        if let Some(mutation) = mutation {
            match data.mutation(type_id, mutation.mutaplasmid_id) {
                Some(def) => {
                    resolved_type = def.result_type_id;
                    name = Some(def.name.clone());
                }
                None => tracing::warn!(
                    %type_id,
                    mutaplasmid = %mutation.mutaplasmid_id,
                    "no mutation result; keeping base type"
                ),
            }
        }

        let Some(def) = data.item_type(resolved_type) else {
            tracing::warn!(type_id = %resolved_type, ?key, "unknown item type; no attributes");
            return Self {
                key,
                type_id: resolved_type,
                group_id: GroupId(0),
                name: name.unwrap_or_default(),
                category,
                base: AttributeStore::new(),
                effects: SmallVec::new(),
                status: ModuleStatus::Online,
                location: None,
                owned_by_character: false,
                other: None,
                required_skills: SmallVec::new(),
            };
        };

        let mut base: AttributeStore = def.attributes.clone().into();
        if let Some(mutation) = mutation {
            for (id, value) in &mutation.attributes {
                base.set(*id, *value);
            }
        }

        let category = if category == ItemCategory::Module && def.category() == ItemCategory::Subsystem
        {
            ItemCategory::Subsystem
        } else {
            category
        };

        #[allow(clippy::cast_possible_truncation)] // skill ids are stored as floats
        let required_skills = Attr::REQUIRED_SKILLS
            .iter()
            .filter_map(|attr| base.get_named(*attr))
            .filter(|value| *value > 0.0)
            .map(|value| TypeId(value as i32))
            .collect();

        Self {
            key,
            type_id: resolved_type,
            group_id: def.group_id,
            name: name.unwrap_or_else(|| def.name.clone()),
            category,
            base,
            effects: def.effects.clone(),
            status: ModuleStatus::Online,
            location: None,
            owned_by_character: false,
            other: None,
            required_skills,
        }
    }

    pub fn requires_skill(&self, skill: TypeId) -> bool {
        self.required_skills.contains(&skill)
    }

    fn located_in(mut self, location: ItemKey) -> Self {
        self.location = Some(location);
        self
    }

    fn owned(mut self) -> Self {
        self.owned_by_character = true;
        self
    }

    fn with_status(mut self, status: ModuleStatus) -> Self {
        self.status = status;
        self
    }

    fn with_other(mut self, other: ItemKey) -> Self {
        self.other = Some(other);
        self
    }
}

/// Builds a skill item at the given level.
pub(crate) fn skill_node<D: StaticData + ?Sized>(skill_id: TypeId, level: u8, data: &D) -> ItemNode {
    let mut node = ItemNode::from_type(
        ItemKey::Skill(skill_id),
        ItemCategory::Skill,
        skill_id,
        None,
        data,
    )
    .located_in(ItemKey::Character);
    node.base.set(Attr::SkillLevel.id(), f64::from(level));
    node
}

/// All items of one calculation, addressable by key.
#[derive(Debug, Clone, Default)]
pub(crate) struct FitGraph {
    nodes: Vec<ItemNode>,
    index: AHashMap<ItemKey, usize>,
}

impl FitGraph {
    /// Builds every item of `input`. Skills are taken from `skills`, already
    /// carrying their first-pass attributes.
    pub fn build<D: StaticData + ?Sized>(
        input: &SimulationInput,
        skills: Vec<ItemNode>,
        data: &D,
    ) -> Self {
        let mut graph = FitGraph::default();

        graph.push(ItemNode::from_type(
            ItemKey::Ship,
            ItemCategory::Ship,
            input.ship.type_id,
            None,
            data,
        ));
        graph.push(ItemNode::from_type(
            ItemKey::Character,
            ItemCategory::Character,
            input.character.type_id,
            None,
            data,
        ));

        for (index, module) in input.modules.iter().enumerate() {
            let mut node = ItemNode::from_type(
                ItemKey::Module(index),
                ItemCategory::Module,
                module.type_id,
                module.mutation.as_ref(),
                data,
            )
            .located_in(ItemKey::Ship)
            .owned()
            .with_status(module.status);
            if let Some(charge) = &module.charge {
                node = node.with_other(ItemKey::Charge(index));
                graph.push(
                    ItemNode::from_type(
                        ItemKey::Charge(index),
                        ItemCategory::Charge,
                        charge.type_id,
                        None,
                        data,
                    )
                    .located_in(ItemKey::Ship)
                    .owned()
                    .with_status(module.status)
                    .with_other(ItemKey::Module(index)),
                );
            }
            graph.push(node);
        }

        for (index, drone) in input.drones.iter().enumerate() {
            let status = if drone.active_count > 0 {
                ModuleStatus::Active
            } else {
                ModuleStatus::Offline
            };
            graph.push(
                ItemNode::from_type(
                    ItemKey::Drone(index),
                    ItemCategory::Drone,
                    drone.type_id,
                    drone.mutation.as_ref(),
                    data,
                )
                .owned()
                .with_status(status),
            );
        }

        for (index, fighter) in input.fighters.iter().enumerate() {
            let status = if fighter.tube_id.is_some() {
                ModuleStatus::Active
            } else {
                ModuleStatus::Offline
            };
            graph.push(
                ItemNode::from_type(
                    ItemKey::Fighter(index),
                    ItemCategory::Fighter,
                    fighter.type_id,
                    None,
                    data,
                )
                .owned()
                .with_status(status),
            );
        }

        for (index, implant) in input.implants.iter().enumerate() {
            graph.push(
                ItemNode::from_type(
                    ItemKey::Implant(index),
                    ItemCategory::Implant,
                    implant.type_id,
                    None,
                    data,
                )
                .located_in(ItemKey::Character),
            );
        }

        for (index, environment) in input.environment.iter().enumerate() {
            graph.push(ItemNode::from_type(
                ItemKey::Environment(index),
                ItemCategory::Environment,
                environment.type_id,
                None,
                data,
            ));
        }

        for skill in skills {
            graph.push(skill);
        }

        graph
    }

    /// A graph over exactly `nodes`, used to resolve items in isolation.
    pub fn from_nodes(nodes: Vec<ItemNode>) -> Self {
        let mut graph = FitGraph::default();
        for node in nodes {
            graph.push(node);
        }
        graph
    }

    fn push(&mut self, node: ItemNode) {
        self.index.insert(node.key, self.nodes.len());
        self.nodes.push(node);
    }

    pub fn get(&self, key: ItemKey) -> Option<&ItemNode> {
        self.index.get(&key).map(|position| &self.nodes[*position])
    }

    pub fn nodes(&self) -> &[ItemNode] {
        &self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{
        base_content, fit_with_autocannon, ATTR_DAMAGE_MULTIPLIER, ATTR_MAX_RANGE,
        MODULE_AUTOCANNON, MUTAPLASMID_GUN, MUTATED_AUTOCANNON, SKILL_SMALL_PROJECTILE,
    };

    #[test]
    fn charge_and_module_reference_each_other() {
        let content = base_content();
        let input = fit_with_autocannon();
        let graph = FitGraph::build(&input, Vec::new(), &content);

        let module = graph.get(ItemKey::Module(0)).unwrap();
        let charge = graph.get(ItemKey::Charge(0)).unwrap();
        assert_eq!(module.other, Some(ItemKey::Charge(0)));
        assert_eq!(charge.other, Some(ItemKey::Module(0)));
        assert_eq!(module.location, Some(ItemKey::Ship));
        assert!(module.requires_skill(SKILL_SMALL_PROJECTILE));
    }

    #[test]
    fn unknown_type_builds_an_empty_item() {
        let content = base_content();
        let node = ItemNode::from_type(
            ItemKey::Module(0),
            ItemCategory::Module,
            TypeId(999_999),
            None,
            &content,
        );
        assert!(node.base.is_empty());
        assert!(node.effects.is_empty());
    }

    #[test]
    fn mutation_swaps_type_and_overrides_attributes() {
        let content = base_content();
        let mutation = Mutation {
            mutaplasmid_id: MUTAPLASMID_GUN,
            attributes: [(ATTR_DAMAGE_MULTIPLIER, 3.5)].into_iter().collect(),
        };
        let node = ItemNode::from_type(
            ItemKey::Module(0),
            ItemCategory::Module,
            MODULE_AUTOCANNON,
            Some(&mutation),
            &content,
        );
        assert_eq!(node.type_id, MUTATED_AUTOCANNON);
        assert_eq!(node.base.get(ATTR_DAMAGE_MULTIPLIER), Some(3.5));
        // Untouched attributes come from the resulting type.
        assert_eq!(node.base.get(ATTR_MAX_RANGE), Some(1_200.0));
        assert!(node.name.contains("Mutated"));
    }

    #[test]
    fn skill_node_carries_its_level() {
        let content = base_content();
        let node = skill_node(SKILL_SMALL_PROJECTILE, 4, &content);
        assert_eq!(node.base.get_named(Attr::SkillLevel), Some(4.0));
        assert_eq!(node.location, Some(ItemKey::Character));
    }
}
