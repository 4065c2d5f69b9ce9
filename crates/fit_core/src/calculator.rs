//! Pass orchestrator: turns a [`SimulationInput`] into a [`SimulationOutput`].
//!
//! Order of passes:
//! 1. Skills: build each trained skill and fold its self-modifiers
//!    (bonus-per-level × level) into its attributes.
//! 2. Effects: build every item of the fit and expand each live effect into
//!    modifiers, indexed by target attribute.
//! 3. Aggregation: evaluate every attribute that has a base value or a
//!    modifier, reading source magnitudes from the calculated values of other
//!    items, then fold the table into output structs.
//!
//! The calculator performs no IO and keeps no state between calls.

use ahash::{AHashMap, AHashSet};

use crate::attributes::{Attr, AttributeStore};
use crate::content::StaticData;
use crate::effects::resolve_modifiers;
use crate::items::{skill_node, FitGraph, ItemNode};
use crate::modifier::{AppliedModifier, Modifier};
use crate::stacking::aggregate;
use crate::types::{
    AttributeId, DroneOutput, FighterOutput, GroupId, ItemKey, ItemOutput, ModuleOutput,
    ShipOutput, SimulationInput, SimulationOutput, SkillOutput, SlotFlag, TypeId,
};

/// Highest trainable skill level.
pub const MAX_SKILL_LEVEL: u8 = 5;

/// Final attribute values of every item, keyed by item.
#[derive(Debug, Clone, Default)]
pub(crate) struct CalculatedAttributes {
    values: AHashMap<ItemKey, AttributeStore>,
}

impl CalculatedAttributes {
    pub fn get(&self, key: ItemKey, attribute: AttributeId) -> Option<f64> {
        self.values.get(&key).and_then(|store| store.get(attribute))
    }

    pub fn item(&self, key: ItemKey) -> Option<&AttributeStore> {
        self.values.get(&key)
    }

    fn insert(&mut self, key: ItemKey, attribute: AttributeId, value: f64) {
        self.values.entry(key).or_default().set(attribute, value);
    }
}

/// Modifiers of one calculation, grouped by the attribute they change.
#[derive(Debug, Clone, Default)]
pub(crate) struct ModifierIndex {
    by_target: AHashMap<(ItemKey, AttributeId), Vec<Modifier>>,
    by_item: AHashMap<ItemKey, Vec<AttributeId>>,
}

impl ModifierIndex {
    fn from_modifiers(modifiers: Vec<Modifier>) -> Self {
        let mut index = ModifierIndex::default();
        for modifier in modifiers {
            let slot = index
                .by_target
                .entry((modifier.target, modifier.target_attribute))
                .or_default();
            if slot.is_empty() {
                index
                    .by_item
                    .entry(modifier.target)
                    .or_default()
                    .push(modifier.target_attribute);
            }
            slot.push(modifier);
        }
        index
    }

    fn for_target(&self, key: ItemKey, attribute: AttributeId) -> &[Modifier] {
        self.by_target
            .get(&(key, attribute))
            .map_or(&[], Vec::as_slice)
    }

    fn modified_attributes(&self, key: ItemKey) -> &[AttributeId] {
        self.by_item.get(&key).map_or(&[], Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.by_target.values().map(Vec::len).sum()
    }
}

/// Evaluation order keyed on what each item is and where it sits, so that
/// permuting the input lists visits items in the same order.
fn canonical_order(input: &SimulationInput, graph: &FitGraph) -> Vec<ItemKey> {
    let flag_of = |index: usize| input.modules.get(index).map(|module| module.flag);
    let mut keyed: Vec<((u8, TypeId, Option<SlotFlag>, Option<u8>), ItemKey)> = graph
        .nodes()
        .iter()
        .map(|node| {
            let (kind, flag, tube) = match node.key {
                ItemKey::Ship => (0, None, None),
                ItemKey::Character => (1, None, None),
                ItemKey::Module(index) => (2, flag_of(index), None),
                ItemKey::Charge(index) => (3, flag_of(index), None),
                ItemKey::Drone(_) => (4, None, None),
                ItemKey::Fighter(index) => (
                    5,
                    None,
                    input.fighters.get(index).and_then(|fighter| fighter.tube_id),
                ),
                ItemKey::Implant(_) => (6, None, None),
                ItemKey::Skill(_) => (7, None, None),
                ItemKey::Environment(_) => (8, None, None),
            };
            ((kind, node.type_id, flag, tube), node.key)
        })
        .collect();
    keyed.sort_unstable();
    keyed.into_iter().map(|(_, key)| key).collect()
}

/// Memoized attribute evaluation over one fit.
struct Evaluator<'a, D: StaticData + ?Sized> {
    graph: &'a FitGraph,
    index: &'a ModifierIndex,
    data: &'a D,
    order: Vec<ItemKey>,
    rank: AHashMap<ItemKey, usize>,
    table: CalculatedAttributes,
    in_progress: AHashSet<(ItemKey, AttributeId)>,
}

impl<'a, D: StaticData + ?Sized> Evaluator<'a, D> {
    fn new(
        graph: &'a FitGraph,
        index: &'a ModifierIndex,
        data: &'a D,
        order: Vec<ItemKey>,
    ) -> Self {
        let rank = order
            .iter()
            .enumerate()
            .map(|(position, key)| (*key, position))
            .collect();
        Self {
            graph,
            index,
            data,
            order,
            rank,
            table: CalculatedAttributes::default(),
            in_progress: AHashSet::new(),
        }
    }

    fn rank_of(&self, key: ItemKey) -> usize {
        self.rank.get(&key).copied().unwrap_or(usize::MAX)
    }

    fn base_value(&self, key: ItemKey, attribute: AttributeId) -> f64 {
        self.graph
            .get(key)
            .and_then(|node| node.base.get(attribute))
            .unwrap_or_else(|| {
                self.data
                    .attribute(attribute)
                    .map_or(0.0, |def| def.default_value)
            })
    }

    fn value(&mut self, key: ItemKey, attribute: AttributeId) -> f64 {
        if let Some(value) = self.table.get(key, attribute) {
            return value;
        }
        let base = self.base_value(key, attribute);
        if !self.in_progress.insert((key, attribute)) {
            tracing::warn!(
                ?key,
                attribute_id = %attribute,
                "cyclic attribute dependency; using base value"
            );
            return base;
        }

        // Canonical source order fixes where a cycle is entered.
        let mut modifiers = self.index.for_target(key, attribute).to_vec();
        modifiers.sort_by_key(|modifier| {
            (self.rank_of(modifier.source), modifier.source_attribute)
        });
        let applied: Vec<AppliedModifier> = modifiers
            .iter()
            .map(|modifier| AppliedModifier {
                operation: modifier.operation,
                value: self.value(modifier.source, modifier.source_attribute),
                stacking_penalized: modifier.stacking_penalized,
            })
            .collect();
        let value = aggregate(base, &applied);

        self.in_progress.remove(&(key, attribute));
        self.table.insert(key, attribute, value);
        value
    }

    /// Evaluates every attribute of every item that has a base value or a
    /// modifier.
    fn evaluate_all(mut self) -> CalculatedAttributes {
        let graph = self.graph;
        for key in std::mem::take(&mut self.order) {
            let Some(node) = graph.get(key) else {
                continue;
            };
            let mut attributes: Vec<AttributeId> = node.base.ids().collect();
            attributes.extend_from_slice(self.index.modified_attributes(node.key));
            attributes.sort_unstable();
            attributes.dedup();
            for attribute in attributes {
                self.value(node.key, attribute);
            }
        }
        self.table
    }
}

/// Number of charges of `charge_volume` that fit into `capacity`.
pub fn charge_quantity(capacity: f64, charge_volume: f64) -> u32 {
    if capacity <= 0.0 || charge_volume <= 0.0 {
        return 0;
    }
    // Round away representation error before flooring (0.3 / 0.1 is 2.999…).
    let ratio = ((capacity / charge_volume) * 1e6).round() / 1e6;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // positive by the guard above
    let quantity = ratio.floor() as u32;
    quantity
}

/// Runs the three passes over inputs using one static-data repository.
pub struct Calculator<'a, D: StaticData + ?Sized> {
    data: &'a D,
}

impl<'a, D: StaticData + ?Sized> Calculator<'a, D> {
    pub fn new(data: &'a D) -> Self {
        Self { data }
    }

    pub fn calculate(&self, input: &SimulationInput) -> SimulationOutput {
        let skills = self.resolve_skills(input);
        let graph = FitGraph::build(input, skills, self.data);
        let index = self.expand_effects(&graph);
        let order = canonical_order(input, &graph);
        let table = Evaluator::new(&graph, &index, self.data, order).evaluate_all();
        tracing::debug!(
            items = graph.nodes().len(),
            modifiers = index.len(),
            "fit calculated"
        );
        materialize(input, &graph, &table)
    }

    /// Pass 1: every trained skill with its self-modifiers applied.
    fn resolve_skills(&self, input: &SimulationInput) -> Vec<ItemNode> {
        input
            .skills
            .iter()
            .map(|(skill_id, level)| {
                let mut node = skill_node(*skill_id, (*level).min(MAX_SKILL_LEVEL), self.data);
                let single = FitGraph::from_nodes(vec![node.clone()]);
                let mut modifiers = Vec::new();
                resolve_modifiers(&node, &single, self.data, &mut modifiers);
                modifiers.retain(|modifier| modifier.target == node.key);
                let index = ModifierIndex::from_modifiers(modifiers);
                let calculated =
                    Evaluator::new(&single, &index, self.data, vec![node.key]).evaluate_all();
                if let Some(store) = calculated.item(node.key) {
                    node.base = store.clone();
                }
                node
            })
            .collect()
    }

    /// Pass 2: modifiers of every item, indexed by target.
    fn expand_effects(&self, graph: &FitGraph) -> ModifierIndex {
        let mut modifiers = Vec::new();
        for node in graph.nodes() {
            let mut own = Vec::new();
            resolve_modifiers(node, graph, self.data, &mut own);
            if matches!(node.key, ItemKey::Skill(_)) {
                // Already folded in during the skill pass.
                own.retain(|modifier| modifier.target != node.key);
            }
            modifiers.extend(own);
        }
        ModifierIndex::from_modifiers(modifiers)
    }
}

/// Calculates `input` against `data` and returns the complete output.
pub fn calculate_and_generate_output<D: StaticData + ?Sized>(
    input: &SimulationInput,
    data: &D,
) -> SimulationOutput {
    Calculator::new(data).calculate(input)
}

fn item_output(graph: &FitGraph, table: &CalculatedAttributes, key: ItemKey) -> ItemOutput {
    let attributes = table.item(key).cloned().unwrap_or_default();
    match graph.get(key) {
        Some(node) => ItemOutput {
            type_id: node.type_id,
            group_id: node.group_id,
            name: node.name.clone(),
            attributes,
        },
        None => ItemOutput {
            type_id: TypeId(0),
            group_id: GroupId(0),
            name: String::new(),
            attributes,
        },
    }
}

fn materialize(
    input: &SimulationInput,
    graph: &FitGraph,
    table: &CalculatedAttributes,
) -> SimulationOutput {
    let ship = ShipOutput {
        item: item_output(graph, table, ItemKey::Ship),
        character_attributes: table
            .item(ItemKey::Character)
            .cloned()
            .unwrap_or_default(),
    };

    let modules = input
        .modules
        .iter()
        .enumerate()
        .map(|(index, module)| {
            let item = item_output(graph, table, ItemKey::Module(index));
            let charge = module
                .charge
                .as_ref()
                .map(|_| item_output(graph, table, ItemKey::Charge(index)));
            let charge_quantity = charge.as_ref().map_or(0, |charge| {
                charge_quantity(
                    item.attributes.named(Attr::Capacity),
                    charge.attributes.named(Attr::Volume),
                )
            });
            ModuleOutput {
                flag: module.flag,
                status: module.status,
                item,
                charge,
                charge_quantity,
            }
        })
        .collect();

    let drones = input
        .drones
        .iter()
        .enumerate()
        .map(|(index, drone)| DroneOutput {
            item: item_output(graph, table, ItemKey::Drone(index)),
            quantity: drone.quantity,
            active_count: drone.active_count,
        })
        .collect();

    let fighters = input
        .fighters
        .iter()
        .enumerate()
        .map(|(index, fighter)| FighterOutput {
            item: item_output(graph, table, ItemKey::Fighter(index)),
            quantity: fighter.quantity,
            tube_id: fighter.tube_id,
        })
        .collect();

    let implants = (0..input.implants.len())
        .map(|index| item_output(graph, table, ItemKey::Implant(index)))
        .collect();

    let skills = input
        .skills
        .iter()
        .map(|(skill_id, level)| SkillOutput {
            item: item_output(graph, table, ItemKey::Skill(*skill_id)),
            level: (*level).min(MAX_SKILL_LEVEL),
        })
        .collect();

    let environment = (0..input.environment.len())
        .map(|index| item_output(graph, table, ItemKey::Environment(index)))
        .collect();

    SimulationOutput {
        ship,
        modules,
        drones,
        fighters,
        implants,
        skills,
        environment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_quantity_floors() {
        assert_eq!(charge_quantity(100.0, 5.0), 20);
        assert_eq!(charge_quantity(100.0, 6.0), 16);
        assert_eq!(charge_quantity(0.3, 0.1), 3);
    }

    #[test]
    fn charge_quantity_without_volume_is_zero() {
        assert_eq!(charge_quantity(100.0, 0.0), 0);
        assert_eq!(charge_quantity(0.0, 5.0), 0);
    }
}
