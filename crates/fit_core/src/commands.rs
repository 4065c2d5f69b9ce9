//! Edit commands: validated changes to a [`SimulationInput`].
//!
//! Every edit produces a new input; recalculating it is up to the caller.
//! Commands that address something no longer present (an empty flag, a
//! drone type not in the bay) are ignored.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::attributes::Attr;
use crate::calculator::MAX_SKILL_LEVEL;
use crate::constraints::apply_statuses;
use crate::content::StaticData;
use crate::derived::item_value;
use crate::effects::{slot_kind_of, EFFECT_LAUNCHER_FITTED, EFFECT_TURRET_FITTED};
use crate::types::{
    CargoItem, ChargeInput, DroneInput, EnvironmentInput, FighterInput, GroupId, ImplantInput,
    ItemCategory, ModuleInput, ModuleStatus, Mutation, SimulationInput, SimulationOutput,
    SlotFlag, SlotKind, TypeId,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditCommand {
    InstallModule {
        type_id: TypeId,
        flag: SlotFlag,
        #[serde(default)]
        status: ModuleStatus,
        #[serde(default)]
        charge: Option<TypeId>,
        #[serde(default)]
        mutation: Option<Mutation>,
    },
    RemoveModule {
        flag: SlotFlag,
    },
    SetModuleStatus {
        flag: SlotFlag,
        status: ModuleStatus,
    },
    SetModulesStatus {
        changes: Vec<(SlotFlag, ModuleStatus)>,
    },
    LoadCharge {
        flag: SlotFlag,
        type_id: TypeId,
    },
    UnloadCharge {
        flag: SlotFlag,
    },
    AddDrones {
        type_id: TypeId,
        quantity: u32,
        #[serde(default)]
        active_count: u32,
    },
    RemoveDrones {
        type_id: TypeId,
    },
    SetActiveDrones {
        type_id: TypeId,
        active_count: u32,
    },
    AddFighter {
        type_id: TypeId,
        quantity: u32,
        #[serde(default)]
        tube_id: Option<u8>,
    },
    RemoveFighter {
        index: usize,
    },
    AddImplant {
        type_id: TypeId,
    },
    RemoveImplant {
        type_id: TypeId,
    },
    AddEnvironment {
        type_id: TypeId,
    },
    RemoveEnvironment {
        type_id: TypeId,
    },
    SetSkillLevel {
        type_id: TypeId,
        level: u8,
    },
    SetCargo {
        type_id: TypeId,
        quantity: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("unknown item type {0}")]
    UnknownType(TypeId),
    #[error("type {type_id} is not a {expected:?}")]
    WrongCategory {
        type_id: TypeId,
        expected: ItemCategory,
    },
    #[error("type {0} does not occupy a slot")]
    NoSlot(TypeId),
    #[error("type {type_id} fits a {expected:?} slot, not {flag}")]
    WrongSlot {
        type_id: TypeId,
        expected: SlotKind,
        flag: SlotFlag,
    },
    #[error("slot {flag} is beyond the ship's {available} slots")]
    SlotUnavailable { flag: SlotFlag, available: u32 },
    #[error("rig size {rig_size} does not match ship rig size {ship_rig_size}")]
    RigSizeMismatch { rig_size: f64, ship_rig_size: f64 },
    #[error("type {type_id} cannot be fitted to ship {ship}")]
    ShipRestricted { type_id: TypeId, ship: TypeId },
    #[error("at most {limit} modules of group {group} may be fitted")]
    GroupFitLimit { group: GroupId, limit: u32 },
    #[error("no free hardpoint for type {0}")]
    NoFreeHardpoint(TypeId),
    #[error("module {module} does not take charge {charge}")]
    ChargeGroupMismatch { module: TypeId, charge: TypeId },
    #[error("charge {charge} has the wrong size for module {module}")]
    ChargeSizeMismatch { module: TypeId, charge: TypeId },
    #[error("charge {charge} does not fit in module {module}'s capacity")]
    ChargeTooLarge { module: TypeId, charge: TypeId },
    #[error("fighter tube {0} is already occupied")]
    TubeOccupied(u8),
    #[error("skill level {0} is above the maximum")]
    InvalidSkillLevel(u8),
}

/// Applies `commands` in order. Status changes are collected and resolved
/// against group limits once at the end.
#[allow(clippy::too_many_lines)]
pub fn apply_edits<D: StaticData + ?Sized>(
    input: &SimulationInput,
    commands: &[EditCommand],
    data: &D,
    previous: Option<&SimulationOutput>,
) -> Result<SimulationInput, FitError> {
    let mut next = input.clone();
    let mut status_changes: Vec<(SlotFlag, ModuleStatus)> = Vec::new();

    for command in commands {
        match command {
            EditCommand::InstallModule {
                type_id,
                flag,
                status,
                charge,
                mutation,
            } => {
                handle_install_module(
                    &mut next,
                    *type_id,
                    *flag,
                    *charge,
                    mutation.clone(),
                    data,
                    previous,
                )?;
                status_changes.push((*flag, *status));
            }
            EditCommand::RemoveModule { flag } => handle_remove_module(&mut next, *flag),
            EditCommand::SetModuleStatus { flag, status } => {
                status_changes.push((*flag, *status));
            }
            EditCommand::SetModulesStatus { changes } => {
                status_changes.extend_from_slice(changes);
            }
            EditCommand::LoadCharge { flag, type_id } => {
                handle_load_charge(&mut next, *flag, *type_id, data)?;
            }
            EditCommand::UnloadCharge { flag } => {
                match next.modules.iter_mut().find(|module| module.flag == *flag) {
                    Some(module) => module.charge = None,
                    None => tracing::debug!(%flag, "unload from empty slot ignored"),
                }
            }
            EditCommand::AddDrones {
                type_id,
                quantity,
                active_count,
            } => handle_add_drones(&mut next, *type_id, *quantity, *active_count, data)?,
            EditCommand::RemoveDrones { type_id } => {
                next.drones.retain(|drone| drone.type_id != *type_id);
            }
            EditCommand::SetActiveDrones {
                type_id,
                active_count,
            } => handle_set_active_drones(&mut next, *type_id, *active_count),
            EditCommand::AddFighter {
                type_id,
                quantity,
                tube_id,
            } => handle_add_fighter(&mut next, *type_id, *quantity, *tube_id, data)?,
            EditCommand::RemoveFighter { index } => {
                if *index < next.fighters.len() {
                    next.fighters.remove(*index);
                } else {
                    tracing::debug!(index, "no fighter at index; ignored");
                }
            }
            EditCommand::AddImplant { type_id } => {
                expect_category(*type_id, ItemCategory::Implant, data)?;
                if !next.implants.iter().any(|implant| implant.type_id == *type_id) {
                    next.implants.push(ImplantInput { type_id: *type_id });
                }
            }
            EditCommand::RemoveImplant { type_id } => {
                next.implants.retain(|implant| implant.type_id != *type_id);
            }
            EditCommand::AddEnvironment { type_id } => {
                expect_category(*type_id, ItemCategory::Environment, data)?;
                next.environment.push(EnvironmentInput { type_id: *type_id });
            }
            EditCommand::RemoveEnvironment { type_id } => {
                next.environment.retain(|effect| effect.type_id != *type_id);
            }
            EditCommand::SetSkillLevel { type_id, level } => {
                if *level > MAX_SKILL_LEVEL {
                    return Err(FitError::InvalidSkillLevel(*level));
                }
                expect_category(*type_id, ItemCategory::Skill, data)?;
                next.skills.insert(*type_id, *level);
            }
            EditCommand::SetCargo { type_id, quantity } => {
                handle_set_cargo(&mut next, *type_id, *quantity);
            }
        }
    }

    if !status_changes.is_empty() {
        apply_statuses(&mut next, &status_changes, data, previous);
    }
    Ok(next)
}

fn expect_category<D: StaticData + ?Sized>(
    type_id: TypeId,
    expected: ItemCategory,
    data: &D,
) -> Result<(), FitError> {
    let def = data
        .item_type(type_id)
        .ok_or(FitError::UnknownType(type_id))?;
    if def.category() == expected {
        Ok(())
    } else {
        Err(FitError::WrongCategory { type_id, expected })
    }
}

fn handle_install_module<D: StaticData + ?Sized>(
    input: &mut SimulationInput,
    type_id: TypeId,
    flag: SlotFlag,
    charge: Option<TypeId>,
    mutation: Option<Mutation>,
    data: &D,
    previous: Option<&SimulationOutput>,
) -> Result<(), FitError> {
    can_fit(input, type_id, flag, data, previous)?;
    if let Some(charge) = charge {
        can_load_charge(type_id, mutation.as_ref(), charge, data)?;
    }

    let mut module = ModuleInput::new(type_id, flag);
    module.charge = charge.map(|type_id| ChargeInput { type_id });
    module.mutation = mutation;
    match input.module_index(flag) {
        Some(index) => {
            tracing::debug!(%flag, replaced = %input.modules[index].type_id, "module replaced");
            input.modules[index] = module;
        }
        None => input.modules.push(module),
    }
    Ok(())
}

fn handle_remove_module(input: &mut SimulationInput, flag: SlotFlag) {
    let before = input.modules.len();
    input.modules.retain(|module| module.flag != flag);
    if input.modules.len() == before {
        tracing::debug!(%flag, "remove from empty slot ignored");
    }
}

fn handle_load_charge<D: StaticData + ?Sized>(
    input: &mut SimulationInput,
    flag: SlotFlag,
    charge: TypeId,
    data: &D,
) -> Result<(), FitError> {
    let Some(module) = input.modules.iter_mut().find(|module| module.flag == flag) else {
        tracing::debug!(%flag, "charge for empty slot ignored");
        return Ok(());
    };
    can_load_charge(module.type_id, module.mutation.as_ref(), charge, data)?;
    module.charge = Some(ChargeInput { type_id: charge });
    Ok(())
}

fn handle_add_drones<D: StaticData + ?Sized>(
    input: &mut SimulationInput,
    type_id: TypeId,
    quantity: u32,
    active_count: u32,
    data: &D,
) -> Result<(), FitError> {
    expect_category(type_id, ItemCategory::Drone, data)?;
    if let Some(stack) = input
        .drones
        .iter_mut()
        .find(|drone| drone.type_id == type_id && drone.mutation.is_none())
    {
        stack.quantity = stack.quantity.saturating_add(quantity);
        stack.active_count = stack
            .active_count
            .saturating_add(active_count)
            .min(stack.quantity);
    } else {
        input.drones.push(DroneInput {
            type_id,
            quantity,
            active_count: active_count.min(quantity),
            mutation: None,
        });
    }
    Ok(())
}

fn handle_set_active_drones(input: &mut SimulationInput, type_id: TypeId, active_count: u32) {
    let Some(stack) = input.drones.iter_mut().find(|drone| drone.type_id == type_id) else {
        tracing::debug!(%type_id, "no such drone stack; ignored");
        return;
    };
    stack.active_count = active_count.min(stack.quantity);
}

fn handle_add_fighter<D: StaticData + ?Sized>(
    input: &mut SimulationInput,
    type_id: TypeId,
    quantity: u32,
    tube_id: Option<u8>,
    data: &D,
) -> Result<(), FitError> {
    expect_category(type_id, ItemCategory::Fighter, data)?;
    if let Some(tube) = tube_id {
        if input.fighters.iter().any(|fighter| fighter.tube_id == Some(tube)) {
            return Err(FitError::TubeOccupied(tube));
        }
    }
    input.fighters.push(FighterInput {
        type_id,
        quantity,
        tube_id,
    });
    Ok(())
}

fn handle_set_cargo(input: &mut SimulationInput, type_id: TypeId, quantity: u32) {
    input.cargo.retain(|item| item.type_id != type_id);
    if quantity > 0 {
        input.cargo.push(CargoItem { type_id, quantity });
    }
}

/// Ship attribute: from `previous` if it describes this hull, static data
/// otherwise.
fn ship_value<D: StaticData + ?Sized>(
    input: &SimulationInput,
    attr: Attr,
    data: &D,
    previous: Option<&SimulationOutput>,
) -> f64 {
    item_value(
        input.ship.type_id,
        previous.map(|output| &output.ship.item),
        attr,
        data,
    )
}

/// Sum of `attr` over fitted subsystems other than the one at `skip`.
fn subsystem_sum<D: StaticData + ?Sized>(
    input: &SimulationInput,
    attr: Attr,
    skip: SlotFlag,
    data: &D,
    previous: Option<&SimulationOutput>,
) -> f64 {
    input
        .modules
        .iter()
        .filter(|module| module.flag != skip)
        .filter_map(|module| {
            let type_id = data.resolved_type(module.type_id, module.mutation.as_ref());
            let def = data.item_type(type_id)?;
            (def.category() == ItemCategory::Subsystem).then(|| {
                let item = previous
                    .and_then(|output| output.module(module.flag))
                    .map(|output| &output.item);
                item_value(type_id, item, attr, data)
            })
        })
        .sum()
}

fn slot_count<D: StaticData + ?Sized>(
    input: &SimulationInput,
    kind: SlotKind,
    skip: SlotFlag,
    data: &D,
    previous: Option<&SimulationOutput>,
) -> f64 {
    let ship = |attr| ship_value(input, attr, data, previous);
    let subsystems = |attr| subsystem_sum(input, attr, skip, data, previous);
    match kind {
        SlotKind::Hi => ship(Attr::HiSlots) + subsystems(Attr::HiSlotModifier),
        SlotKind::Med => ship(Attr::MedSlots) + subsystems(Attr::MedSlotModifier),
        SlotKind::Low => ship(Attr::LowSlots) + subsystems(Attr::LowSlotModifier),
        SlotKind::Rig => ship(Attr::RigSlots),
        SlotKind::Subsystem => ship(Attr::MaxSubSystems),
    }
}

/// Checks whether `type_id` may be installed at `flag`. A module already at
/// `flag` is treated as removed.
#[allow(clippy::too_many_lines, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn can_fit<D: StaticData + ?Sized>(
    input: &SimulationInput,
    type_id: TypeId,
    flag: SlotFlag,
    data: &D,
    previous: Option<&SimulationOutput>,
) -> Result<(), FitError> {
    let def = data
        .item_type(type_id)
        .ok_or(FitError::UnknownType(type_id))?;
    if !def.category().is_fittable() {
        return Err(FitError::WrongCategory {
            type_id,
            expected: ItemCategory::Module,
        });
    }
    let expected = slot_kind_of(def).ok_or(FitError::NoSlot(type_id))?;
    if expected != flag.kind {
        return Err(FitError::WrongSlot {
            type_id,
            expected,
            flag,
        });
    }

    let available = slot_count(input, flag.kind, flag, data, previous).max(0.0);
    if f64::from(flag.index) >= available {
        return Err(FitError::SlotUnavailable {
            flag,
            available: available as u32,
        });
    }

    if flag.kind == SlotKind::Rig {
        let rig_size = def.attributes.get(&Attr::RigSize.id()).copied().unwrap_or(0.0);
        let ship_rig_size = ship_value(input, Attr::RigSize, data, previous);
        if rig_size > 0.0 && (rig_size - ship_rig_size).abs() > f64::EPSILON {
            return Err(FitError::RigSizeMismatch {
                rig_size,
                ship_rig_size,
            });
        }
    }

    check_ship_restrictions(input, type_id, data)?;

    let fit_limit = def
        .attributes
        .get(&Attr::MaxGroupFitted.id())
        .copied()
        .unwrap_or(0.0);
    if fit_limit > 0.0 {
        let fitted = input
            .modules
            .iter()
            .filter(|module| module.flag != flag)
            .filter_map(|module| data.item_type(module.type_id))
            .filter(|other| other.group_id == def.group_id)
            .count();
        if fitted as f64 >= fit_limit {
            return Err(FitError::GroupFitLimit {
                group: def.group_id,
                limit: fit_limit as u32,
            });
        }
    }

    for (effect, total_attr, modifier_attr) in [
        (
            EFFECT_TURRET_FITTED,
            Attr::TurretSlotsLeft,
            Attr::TurretHardPointModifier,
        ),
        (
            EFFECT_LAUNCHER_FITTED,
            Attr::LauncherSlotsLeft,
            Attr::LauncherHardPointModifier,
        ),
    ] {
        if !def.has_effect(effect) {
            continue;
        }
        let total = ship_value(input, total_attr, data, previous)
            + subsystem_sum(input, modifier_attr, flag, data, previous);
        let used = input
            .modules
            .iter()
            .filter(|module| module.flag != flag)
            .filter_map(|module| data.item_type(module.type_id))
            .filter(|other| other.has_effect(effect))
            .count();
        if used as f64 >= total {
            return Err(FitError::NoFreeHardpoint(type_id));
        }
    }

    Ok(())
}

#[allow(clippy::cast_possible_truncation)] // type and group ids are stored as floats
fn check_ship_restrictions<D: StaticData + ?Sized>(
    input: &SimulationInput,
    type_id: TypeId,
    data: &D,
) -> Result<(), FitError> {
    let Some(def) = data.item_type(type_id) else {
        return Ok(());
    };
    let listed = |attrs: &[Attr]| -> Vec<i32> {
        attrs
            .iter()
            .filter_map(|attr| def.attributes.get(&attr.id()).copied())
            .filter(|value| *value > 0.0)
            .map(|value| value as i32)
            .collect()
    };
    let groups = listed(&Attr::CAN_FIT_SHIP_GROUPS);
    let types = listed(&Attr::CAN_FIT_SHIP_TYPES);
    if groups.is_empty() && types.is_empty() {
        return Ok(());
    }

    let ship = input.ship.type_id;
    let ship_group = data.item_type(ship).map(|def| def.group_id.0);
    let allowed = types.contains(&ship.0)
        || ship_group.is_some_and(|group| groups.contains(&group));
    if allowed {
        Ok(())
    } else {
        Err(FitError::ShipRestricted { type_id, ship })
    }
}

/// Checks whether `charge` may be loaded into a module of `module_type`.
#[allow(clippy::cast_possible_truncation)]
pub fn can_load_charge<D: StaticData + ?Sized>(
    module_type: TypeId,
    mutation: Option<&Mutation>,
    charge: TypeId,
    data: &D,
) -> Result<(), FitError> {
    let module_type = data.resolved_type(module_type, mutation);
    let module = data
        .item_type(module_type)
        .ok_or(FitError::UnknownType(module_type))?;
    let charge_def = data.item_type(charge).ok_or(FitError::UnknownType(charge))?;
    if charge_def.category() != ItemCategory::Charge {
        return Err(FitError::WrongCategory {
            type_id: charge,
            expected: ItemCategory::Charge,
        });
    }

    let module_attr = |attr: Attr| module.attributes.get(&attr.id()).copied();
    let charge_attr = |attr: Attr| charge_def.attributes.get(&attr.id()).copied();

    let accepts_group = Attr::CHARGE_GROUPS
        .iter()
        .filter_map(|attr| module_attr(*attr))
        .any(|group| group > 0.0 && group as i32 == charge_def.group_id.0);
    if !accepts_group {
        return Err(FitError::ChargeGroupMismatch {
            module: module_type,
            charge,
        });
    }

    if let (Some(module_size), Some(charge_size)) =
        (module_attr(Attr::ChargeSize), charge_attr(Attr::ChargeSize))
    {
        if (module_size - charge_size).abs() > f64::EPSILON {
            return Err(FitError::ChargeSizeMismatch {
                module: module_type,
                charge,
            });
        }
    }

    let capacity = module_attr(Attr::Capacity).unwrap_or(0.0);
    let volume = charge_attr(Attr::Volume).unwrap_or(0.0);
    if volume > capacity {
        return Err(FitError::ChargeTooLarge {
            module: module_type,
            charge,
        });
    }
    Ok(())
}
