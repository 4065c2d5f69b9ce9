//! Modifier model: one attribute mutation from one source onto one target.

use serde::{Deserialize, Serialize};

use crate::types::{AttributeId, EffectId, ItemKey};

/// Dogma modifier operation, in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Operation {
    PreAssign,
    PreMul,
    PreDiv,
    ModAdd,
    ModSub,
    PostMul,
    PostDiv,
    PostPercent,
    PostAssign,
}

impl Operation {
    /// Every operation, in the order they are applied to a base value.
    pub const APPLICATION_ORDER: [Operation; 9] = [
        Operation::PreAssign,
        Operation::PreMul,
        Operation::PreDiv,
        Operation::ModAdd,
        Operation::ModSub,
        Operation::PostMul,
        Operation::PostDiv,
        Operation::PostPercent,
        Operation::PostAssign,
    ];

    pub const fn code(self) -> i32 {
        match self {
            Self::PreAssign => -1,
            Self::PreMul => 0,
            Self::PreDiv => 1,
            Self::ModAdd => 2,
            Self::ModSub => 3,
            Self::PostMul => 4,
            Self::PostDiv => 5,
            Self::PostPercent => 6,
            Self::PostAssign => 7,
        }
    }

    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Self::PreAssign),
            0 => Some(Self::PreMul),
            1 => Some(Self::PreDiv),
            2 => Some(Self::ModAdd),
            3 => Some(Self::ModSub),
            4 => Some(Self::PostMul),
            5 => Some(Self::PostDiv),
            6 => Some(Self::PostPercent),
            7 => Some(Self::PostAssign),
            _ => None,
        }
    }

    /// Operations that scale the value and are therefore subject to the
    /// stacking penalty.
    pub const fn is_multiplicative(self) -> bool {
        matches!(
            self,
            Self::PreMul | Self::PreDiv | Self::PostMul | Self::PostDiv | Self::PostPercent
        )
    }
}

impl TryFrom<i32> for Operation {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown modifier operation {code}"))
    }
}

impl From<Operation> for i32 {
    fn from(operation: Operation) -> Self {
        operation.code()
    }
}

/// A concrete modifier bound to source and target items of one calculation.
///
/// The magnitude is the source attribute's calculated value, read when the
/// target attribute is aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Modifier {
    pub source: ItemKey,
    pub source_attribute: AttributeId,
    pub target: ItemKey,
    pub target_attribute: AttributeId,
    pub operation: Operation,
    pub stacking_penalized: bool,
    pub effect_id: EffectId,
}

/// A modifier with its magnitude resolved, ready for aggregation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedModifier {
    pub operation: Operation,
    pub value: f64,
    pub stacking_penalized: bool,
}

impl AppliedModifier {
    pub fn new(operation: Operation, value: f64) -> Self {
        Self {
            operation,
            value,
            stacking_penalized: false,
        }
    }

    pub fn penalized(operation: Operation, value: f64) -> Self {
        Self {
            operation,
            value,
            stacking_penalized: true,
        }
    }
}
