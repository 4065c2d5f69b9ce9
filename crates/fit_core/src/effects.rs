//! Effect resolver: expands the effects an item carries into concrete
//! modifiers bound to items of the fit.

use serde::{Deserialize, Serialize};

use crate::content::{StaticData, TypeDef};
use crate::items::{FitGraph, ItemNode};
use crate::modifier::{Modifier, Operation};
use crate::types::{AttributeId, EffectId, GroupId, ItemKey, ModuleStatus, SlotKind, TypeId};

pub const EFFECT_LO_POWER: EffectId = EffectId(11);
pub const EFFECT_HI_POWER: EffectId = EffectId(12);
pub const EFFECT_MED_POWER: EffectId = EffectId(13);
pub const EFFECT_ONLINE: EffectId = EffectId(16);
pub const EFFECT_LAUNCHER_FITTED: EffectId = EffectId(40);
pub const EFFECT_TURRET_FITTED: EffectId = EffectId(42);
pub const EFFECT_RIG_SLOT: EffectId = EffectId(2663);
pub const EFFECT_SUBSYSTEM: EffectId = EffectId(3772);

/// Slot a module type occupies, derived from its slot effect.
pub fn slot_kind_of(def: &TypeDef) -> Option<SlotKind> {
    def.effects.iter().find_map(|effect| match *effect {
        EFFECT_HI_POWER => Some(SlotKind::Hi),
        EFFECT_MED_POWER => Some(SlotKind::Med),
        EFFECT_LO_POWER => Some(SlotKind::Low),
        EFFECT_RIG_SLOT => Some(SlotKind::Rig),
        EFFECT_SUBSYSTEM => Some(SlotKind::Subsystem),
        _ => None,
    })
}

/// Dogma effect category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum EffectCategory {
    Passive,
    Active,
    Target,
    Area,
    Online,
    Overload,
    Dungeon,
    System,
}

impl EffectCategory {
    pub const fn code(self) -> i32 {
        match self {
            Self::Passive => 0,
            Self::Active => 1,
            Self::Target => 2,
            Self::Area => 3,
            Self::Online => 4,
            Self::Overload => 5,
            Self::Dungeon => 6,
            Self::System => 7,
        }
    }

    /// Lowest item status at which effects of this category run. `None` for
    /// effects that only ever act on another fit.
    pub const fn required_status(self) -> Option<ModuleStatus> {
        match self {
            Self::Passive | Self::Dungeon | Self::System => Some(ModuleStatus::Offline),
            Self::Online => Some(ModuleStatus::Online),
            Self::Active | Self::Area => Some(ModuleStatus::Active),
            Self::Overload => Some(ModuleStatus::Overloaded),
            Self::Target => None,
        }
    }
}

impl TryFrom<i32> for EffectCategory {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Self::Passive,
            1 => Self::Active,
            2 => Self::Target,
            3 => Self::Area,
            4 => Self::Online,
            5 => Self::Overload,
            6 => Self::Dungeon,
            7 => Self::System,
            _ => return Err(format!("unknown effect category {code}")),
        })
    }
}

impl From<EffectCategory> for i32 {
    fn from(category: EffectCategory) -> Self {
        category.code()
    }
}

/// Whose attributes a modifier addresses, relative to the effect's owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierDomain {
    #[serde(rename = "itemID")]
    Item,
    #[serde(rename = "shipID")]
    Ship,
    #[serde(rename = "charID")]
    Character,
    #[serde(rename = "otherID")]
    Other,
    #[serde(rename = "structureID")]
    Structure,
    #[serde(rename = "targetID")]
    Target,
}

/// How the targets of a modifier are selected within its domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierFunc {
    #[serde(rename = "ItemModifier")]
    Item,
    #[serde(rename = "LocationModifier")]
    Location,
    #[serde(rename = "LocationGroupModifier")]
    LocationGroup,
    #[serde(rename = "LocationRequiredSkillModifier")]
    LocationRequiredSkill,
    #[serde(rename = "OwnerRequiredSkillModifier")]
    OwnerRequiredSkill,
    #[serde(rename = "EffectStopper")]
    EffectStopper,
}

/// One entry of an effect's `modifierInfo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierInfo {
    pub domain: ModifierDomain,
    pub func: ModifierFunc,
    pub modified_attribute_id: AttributeId,
    pub modifying_attribute_id: AttributeId,
    pub operation: Operation,
    #[serde(default)]
    pub group_id: Option<GroupId>,
    /// Required skill for the `*RequiredSkill*` funcs; `-1` means the type
    /// carrying the effect.
    #[serde(default)]
    pub skill_type_id: Option<i32>,
}

const SELF_SKILL: i32 = -1;

fn domain_item(node: &ItemNode, domain: ModifierDomain) -> Option<ItemKey> {
    match domain {
        ModifierDomain::Item => Some(node.key),
        ModifierDomain::Ship => Some(ItemKey::Ship),
        ModifierDomain::Character => Some(ItemKey::Character),
        ModifierDomain::Other => node.other,
        ModifierDomain::Structure | ModifierDomain::Target => None,
    }
}

fn required_skill(node: &ItemNode, info: &ModifierInfo) -> Option<TypeId> {
    match info.skill_type_id {
        Some(SELF_SKILL) => Some(node.type_id),
        Some(id) if id > 0 => Some(TypeId(id)),
        _ => None,
    }
}

/// Items addressed by one modifier entry of `node`'s effect.
fn targets(node: &ItemNode, info: &ModifierInfo, graph: &FitGraph) -> Vec<ItemKey> {
    let located_in = |owner: ItemKey| {
        graph
            .nodes()
            .iter()
            .filter(move |candidate| candidate.location == Some(owner))
            .filter(|candidate| !matches!(candidate.key, ItemKey::Skill(_)))
    };

    match info.func {
        ModifierFunc::Item => domain_item(node, info.domain)
            .filter(|key| graph.get(*key).is_some())
            .into_iter()
            .collect(),
        ModifierFunc::Location => domain_item(node, info.domain)
            .map(|owner| located_in(owner).map(|item| item.key).collect())
            .unwrap_or_default(),
        ModifierFunc::LocationGroup => {
            let (Some(owner), Some(group)) = (domain_item(node, info.domain), info.group_id)
            else {
                return Vec::new();
            };
            located_in(owner)
                .filter(|item| item.group_id == group)
                .map(|item| item.key)
                .collect()
        }
        ModifierFunc::LocationRequiredSkill => {
            let (Some(owner), Some(skill)) =
                (domain_item(node, info.domain), required_skill(node, info))
            else {
                return Vec::new();
            };
            located_in(owner)
                .filter(|item| item.requires_skill(skill))
                .map(|item| item.key)
                .collect()
        }
        ModifierFunc::OwnerRequiredSkill => {
            let Some(skill) = required_skill(node, info) else {
                return Vec::new();
            };
            graph
                .nodes()
                .iter()
                .filter(|item| item.owned_by_character && item.requires_skill(skill))
                .map(|item| item.key)
                .collect()
        }
        ModifierFunc::EffectStopper => Vec::new(),
    }
}

/// Whether `effect_id` of `node` runs at the node's current status.
fn effect_is_live(node: &ItemNode, category: EffectCategory, projected: bool) -> bool {
    if projected {
        return false;
    }
    category
        .required_status()
        .is_some_and(|required| node.status >= required)
}

/// Expands every live effect of `node` into modifiers on items of `graph`.
///
/// Unknown effects are skipped; an item whose status never reaches an
/// effect's category simply contributes nothing for it.
pub(crate) fn resolve_modifiers<D: StaticData + ?Sized>(
    node: &ItemNode,
    graph: &FitGraph,
    data: &D,
    out: &mut Vec<Modifier>,
) {
    for effect_id in &node.effects {
        let Some(effect) = data.effect(*effect_id) else {
            tracing::warn!(effect_id = %effect_id, type_id = %node.type_id, "unknown effect; skipped");
            continue;
        };
        if !effect_is_live(
            node,
            effect.category,
            effect.is_offensive || effect.is_assistance,
        ) {
            continue;
        }

        for info in &effect.modifier_info {
            let penalizable = info.operation.is_multiplicative()
                && !node.category.exempt_from_stacking()
                && !attribute_is_stackable(info.modified_attribute_id, data);
            for target in targets(node, info, graph) {
                out.push(Modifier {
                    source: node.key,
                    source_attribute: info.modifying_attribute_id,
                    target,
                    target_attribute: info.modified_attribute_id,
                    operation: info.operation,
                    stacking_penalized: penalizable,
                    effect_id: *effect_id,
                });
            }
        }
    }
}

fn attribute_is_stackable<D: StaticData + ?Sized>(id: AttributeId, data: &D) -> bool {
    match data.attribute(id) {
        Some(def) => def.stackable,
        None => {
            tracing::debug!(attribute_id = %id, "unknown attribute; treated as stackable");
            true
        }
    }
}
