//! Module status state machine and same-group activity limits.
//!
//! A requested status is clamped to what the module's effects can reach and
//! always accepted. If that pushes a group over `maxGroupActive` or
//! `maxGroupOnline`, the oldest conflicting modules are demoted instead.

use std::collections::BTreeSet;

use crate::attributes::Attr;
use crate::content::{StaticData, TypeDef};
use crate::effects::EffectCategory;
use crate::types::{
    GroupId, ModuleInput, ModuleStatus, Resolved, SimulationInput, SimulationOutput, SlotFlag,
    TypeId,
};

/// Highest status the effects of `type_id` allow.
pub fn max_reachable_status<D: StaticData + ?Sized>(type_id: TypeId, data: &D) -> ModuleStatus {
    let Some(def) = data.item_type(type_id) else {
        return ModuleStatus::Online;
    };
    let mut reachable = ModuleStatus::Online;
    for effect in def.effects.iter().filter_map(|id| data.effect(*id)) {
        match effect.category {
            EffectCategory::Overload => return ModuleStatus::Overloaded,
            EffectCategory::Active | EffectCategory::Target | EffectCategory::Area => {
                reachable = ModuleStatus::Active;
            }
            _ => {}
        }
    }
    reachable
}

/// Sets one module's status and resolves group limits.
///
/// Limits are read from `previous` when it describes the same module, else
/// from static data. An absent flag leaves the input unchanged.
pub fn set_module_status<D: StaticData + ?Sized>(
    input: &SimulationInput,
    flag: SlotFlag,
    status: ModuleStatus,
    data: &D,
    previous: Option<&SimulationOutput>,
) -> SimulationInput {
    set_modules_status(input, &[(flag, status)], data, previous)
}

/// Sets several statuses at once; group limits cascade once over the batch.
pub fn set_modules_status<D: StaticData + ?Sized>(
    input: &SimulationInput,
    changes: &[(SlotFlag, ModuleStatus)],
    data: &D,
    previous: Option<&SimulationOutput>,
) -> SimulationInput {
    let mut next = input.clone();
    apply_statuses(&mut next, changes, data, previous);
    next
}

/// In-place form used by the edit command layer.
pub(crate) fn apply_statuses<D: StaticData + ?Sized>(
    input: &mut SimulationInput,
    changes: &[(SlotFlag, ModuleStatus)],
    data: &D,
    previous: Option<&SimulationOutput>,
) {
    let mut changed = Vec::with_capacity(changes.len());
    for (flag, requested) in changes {
        let Some(index) = input.module_index(*flag) else {
            tracing::debug!(%flag, "status change for empty slot ignored");
            continue;
        };
        let module = &input.modules[index];
        let reachable = max_reachable_status(
            data.resolved_type(module.type_id, module.mutation.as_ref()),
            data,
        );
        let status = (*requested).min(reachable);
        if status != *requested {
            tracing::debug!(%flag, ?requested, ?status, "status clamped to reachable maximum");
        }
        let stamp = input.next_stamp;
        input.next_stamp += 1;
        let module = &mut input.modules[index];
        module.status = status;
        module.state_stamp = stamp;
        changed.push(index);
    }
    resolve_group_limits(input, &changed, data, previous);
}

/// Demotes modules until every group is within its limits. The active
/// limit resolves first so its demotions count against the online limit.
pub(crate) fn resolve_group_limits<D: StaticData + ?Sized>(
    input: &mut SimulationInput,
    changed: &[usize],
    data: &D,
    previous: Option<&SimulationOutput>,
) {
    for (limit_attr, threshold) in [
        (Attr::MaxGroupActive, ModuleStatus::Active),
        (Attr::MaxGroupOnline, ModuleStatus::Online),
    ] {
        let groups: BTreeSet<GroupId> = (0..input.modules.len())
            .filter(|index| input.modules[*index].status >= threshold)
            .filter_map(|index| group_of(input, index, data))
            .collect();

        for group in groups {
            let Some(limit) = group_limit(input, group, limit_attr, data, previous) else {
                continue;
            };
            loop {
                let members: Vec<usize> = (0..input.modules.len())
                    .filter(|index| input.modules[*index].status >= threshold)
                    .filter(|index| group_of(input, *index, data) == Some(group))
                    .collect();
                if members.len() <= limit {
                    break;
                }
                let Some(victim) = oldest(input, &members, changed) else {
                    break;
                };
                let module = &mut input.modules[victim];
                module.status = threshold.demoted();
                tracing::debug!(
                    flag = %module.flag,
                    %group,
                    limit,
                    status = ?module.status,
                    "group limit exceeded; module demoted"
                );
            }
        }
    }
}

/// Static definition of the type a module resolves to once mutated.
fn resolved_def<'d, D: StaticData + ?Sized>(
    module: &ModuleInput,
    data: &'d D,
) -> Option<&'d TypeDef> {
    data.item_type(data.resolved_type(module.type_id, module.mutation.as_ref()))
}

fn group_of<D: StaticData + ?Sized>(
    input: &SimulationInput,
    index: usize,
    data: &D,
) -> Option<GroupId> {
    resolved_def(&input.modules[index], data).map(|def| def.group_id)
}

/// Smallest positive limit declared by any module of `group`. `None` means
/// unlimited.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // only positive limits are cast
fn group_limit<D: StaticData + ?Sized>(
    input: &SimulationInput,
    group: GroupId,
    attr: Attr,
    data: &D,
    previous: Option<&SimulationOutput>,
) -> Option<usize> {
    input
        .modules
        .iter()
        .filter_map(|module| {
            let def = resolved_def(module, data)?;
            if def.group_id != group {
                return None;
            }
            let base = module
                .mutation
                .as_ref()
                .and_then(|mutation| mutation.attributes.get(&attr.id()))
                .or_else(|| def.attributes.get(&attr.id()))
                .copied()
                .unwrap_or(0.0);
            let calculated = previous
                .and_then(|output| output.module(module.flag))
                .filter(|output| output.item.type_id == def.type_id)
                .and_then(|output| output.item.attributes.get_named(attr));
            let limit = Resolved::new(base, calculated).effective();
            (limit > 0.0).then(|| limit.floor() as usize)
        })
        .min()
}

/// Oldest stamped member not changed in this request, falling back to the
/// oldest changed one.
fn oldest(input: &SimulationInput, members: &[usize], changed: &[usize]) -> Option<usize> {
    let by_age = |index: &&usize| (input.modules[**index].state_stamp, **index);
    members
        .iter()
        .filter(|index| !changed.contains(*index))
        .min_by_key(by_age)
        .or_else(|| members.iter().min_by_key(by_age))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{
        base_content, MODULE_AUTOCANNON, MODULE_GYROSTABILIZER, MODULE_SHIELD_HARDENER,
        MODULE_SMALL_RIG,
    };

    #[test]
    fn reachable_status_follows_effect_categories() {
        let content = base_content();
        assert_eq!(
            max_reachable_status(MODULE_AUTOCANNON, &content),
            ModuleStatus::Overloaded
        );
        assert_eq!(
            max_reachable_status(MODULE_SHIELD_HARDENER, &content),
            ModuleStatus::Active
        );
        assert_eq!(
            max_reachable_status(MODULE_GYROSTABILIZER, &content),
            ModuleStatus::Online
        );
        assert_eq!(
            max_reachable_status(MODULE_SMALL_RIG, &content),
            ModuleStatus::Online
        );
    }

    #[test]
    fn unknown_type_reaches_online() {
        let content = base_content();
        assert_eq!(
            max_reachable_status(TypeId(999_999), &content),
            ModuleStatus::Online
        );
    }
}
