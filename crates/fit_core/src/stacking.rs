//! Stacking & aggregation: folds every modifier on one attribute into its
//! final value.
//!
//! Operations apply in dogma order (see [`Operation::APPLICATION_ORDER`]).
//! Multiplicative stages convert each modifier to a factor; penalized factors
//! are split by direction and weighted by [`penalty_weight`] in order of
//! decreasing strength. Every stage sorts its inputs before folding, so the
//! result does not depend on the order modifiers were collected in.

use std::cmp::Ordering;

use crate::modifier::{AppliedModifier, Operation};

/// Denominator of the stacking curve, `2.67²`.
pub const STACKING_PENALTY_DENOMINATOR: f64 = 7.1289;

/// Weight of the `rank`-th strongest same-direction factor (1-indexed):
/// `exp(-((rank - 1)²) / 7.1289)`.
pub fn penalty_weight(rank: usize) -> f64 {
    let n = rank.saturating_sub(1) as f64;
    (-(n * n) / STACKING_PENALTY_DENOMINATOR).exp()
}

/// Combines same-direction penalized factors: the strongest counts fully,
/// each further one at a diminishing weight.
pub fn penalized_product(factors: &[f64]) -> f64 {
    let (mut bonuses, mut maluses): (Vec<f64>, Vec<f64>) =
        factors.iter().copied().partition(|factor| *factor > 1.0);
    chain_product(&mut bonuses) * chain_product(&mut maluses)
}

fn chain_product(factors: &mut [f64]) -> f64 {
    factors.sort_by(|a, b| strength_desc(*a, *b));
    factors
        .iter()
        .enumerate()
        .fold(1.0, |acc, (index, factor)| {
            acc * (1.0 + (factor - 1.0) * penalty_weight(index + 1))
        })
}

fn strength_desc(a: f64, b: f64) -> Ordering {
    (b - 1.0)
        .abs()
        .total_cmp(&(a - 1.0).abs())
        .then_with(|| a.total_cmp(&b))
}

/// Converts a multiplicative modifier value to a factor. `None` for a
/// division by zero.
fn factor(operation: Operation, value: f64) -> Option<f64> {
    match operation {
        Operation::PreMul | Operation::PostMul => Some(value),
        Operation::PreDiv | Operation::PostDiv => {
            if value == 0.0 {
                None
            } else {
                Some(1.0 / value)
            }
        }
        Operation::PostPercent => Some(1.0 + value / 100.0),
        _ => None,
    }
}

fn sorted(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    values
}

/// Applies one operation's modifiers to `value`.
fn apply_stage(value: f64, operation: Operation, modifiers: &[AppliedModifier]) -> f64 {
    let stage: Vec<&AppliedModifier> = modifiers
        .iter()
        .filter(|modifier| modifier.operation == operation)
        .collect();
    if stage.is_empty() {
        return value;
    }

    match operation {
        Operation::PreAssign | Operation::PostAssign => stage
            .iter()
            .map(|modifier| modifier.value)
            .max_by(f64::total_cmp)
            .unwrap_or(value),
        Operation::ModAdd => {
            value + sorted(stage.iter().map(|m| m.value).collect()).iter().sum::<f64>()
        }
        Operation::ModSub => {
            value - sorted(stage.iter().map(|m| m.value).collect()).iter().sum::<f64>()
        }
        _ => {
            let mut plain = Vec::new();
            let mut penalized = Vec::new();
            for modifier in stage {
                let Some(factor) = factor(operation, modifier.value) else {
                    tracing::warn!(?operation, "division by zero in modifier; skipped");
                    continue;
                };
                if modifier.stacking_penalized {
                    penalized.push(factor);
                } else {
                    plain.push(factor);
                }
            }
            let plain_product: f64 = sorted(plain).iter().product();
            value * plain_product * penalized_product(&penalized)
        }
    }
}

/// Final value of one attribute: `base` with every modifier applied.
pub fn aggregate(base: f64, modifiers: &[AppliedModifier]) -> f64 {
    Operation::APPLICATION_ORDER
        .iter()
        .fold(base, |value, operation| {
            apply_stage(value, *operation, modifiers)
        })
}
