//! `fit_core`: ship fitting attribute calculation.
//!
//! No IO. Static data comes in through [`StaticData`]; every calculation is a
//! pure function of its input.

mod attributes;
mod calculator;
mod commands;
mod constraints;
mod content;
mod derived;
mod effects;
mod items;
mod modifier;
mod stacking;
mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;

pub use attributes::{Attr, AttributeStore};
pub use calculator::{calculate_and_generate_output, charge_quantity, Calculator, MAX_SKILL_LEVEL};
pub use commands::{apply_edits, can_fit, can_load_charge, EditCommand, FitError};
pub use constraints::{max_reachable_status, set_module_status, set_modules_status};
pub use content::{AttributeDef, EffectDef, GameContent, MutationDef, StaticData, TypeDef};
pub use derived::{FighterUsage, FittingSummary, SlotUsage, Usage};
pub use effects::{
    slot_kind_of, EffectCategory, ModifierDomain, ModifierFunc, ModifierInfo, EFFECT_HI_POWER,
    EFFECT_LAUNCHER_FITTED, EFFECT_LO_POWER, EFFECT_MED_POWER, EFFECT_ONLINE, EFFECT_RIG_SLOT,
    EFFECT_SUBSYSTEM, EFFECT_TURRET_FITTED,
};
pub use modifier::{AppliedModifier, Modifier, Operation};
pub use stacking::{aggregate, penalized_product, penalty_weight, STACKING_PENALTY_DENOMINATOR};
pub use types::*;

#[cfg(test)]
mod tests;
