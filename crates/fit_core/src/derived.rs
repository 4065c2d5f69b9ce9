//! Fitting resources computed from a finished calculation: slots, hardpoints,
//! CPU/powergrid/calibration, drone bandwidth and bay, fighter tubes.
//!
//! Capacities come from the output. Per-item costs come from the output when
//! it describes the item, otherwise from static data, so a summary can be
//! drawn for an input that was edited after the last calculation.

use serde::{Deserialize, Serialize};

use crate::attributes::Attr;
use crate::content::StaticData;
use crate::effects::{slot_kind_of, EFFECT_LAUNCHER_FITTED, EFFECT_TURRET_FITTED};
use crate::types::{
    ItemCategory, ItemOutput, ModuleStatus, Resolved, SimulationInput, SimulationOutput,
    SlotKind, TypeId,
};

/// One consumed resource against its capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub used: f64,
    pub total: f64,
}

impl Usage {
    pub fn new(used: f64, total: f64) -> Self {
        Self { used, total }
    }

    pub fn remaining(&self) -> f64 {
        self.total - self.used
    }

    /// Using exactly the total is allowed.
    pub fn is_exceeded(&self) -> bool {
        self.used > self.total
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotUsage {
    pub hi: Usage,
    pub med: Usage,
    pub low: Usage,
    pub rig: Usage,
    pub subsystem: Usage,
}

impl SlotUsage {
    pub fn get(&self, kind: SlotKind) -> Usage {
        match kind {
            SlotKind::Hi => self.hi,
            SlotKind::Med => self.med,
            SlotKind::Low => self.low,
            SlotKind::Rig => self.rig,
            SlotKind::Subsystem => self.subsystem,
        }
    }

    fn get_mut(&mut self, kind: SlotKind) -> &mut Usage {
        match kind {
            SlotKind::Hi => &mut self.hi,
            SlotKind::Med => &mut self.med,
            SlotKind::Low => &mut self.low,
            SlotKind::Rig => &mut self.rig,
            SlotKind::Subsystem => &mut self.subsystem,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FighterUsage {
    pub tubes: Usage,
    pub light: Usage,
    pub support: Usage,
    pub heavy: Usage,
}

/// Derived fitting resources of one fit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FittingSummary {
    pub turret_hardpoints: Usage,
    pub launcher_hardpoints: Usage,
    pub slots: SlotUsage,
    pub cpu: Usage,
    pub power: Usage,
    pub calibration: Usage,
    pub drone_bandwidth: Usage,
    pub drone_capacity: Usage,
    pub active_drones: Usage,
    pub fighters: FighterUsage,
}

/// Attribute of one item: calculated if `output` describes `type_id`, base
/// otherwise.
pub(crate) fn item_value<D: StaticData + ?Sized>(
    type_id: TypeId,
    output: Option<&ItemOutput>,
    attr: Attr,
    data: &D,
) -> f64 {
    let base = data
        .item_type(type_id)
        .and_then(|def| def.attributes.get(&attr.id()).copied())
        .unwrap_or_else(|| attr.default_value());
    let calculated = output
        .filter(|item| item.type_id == type_id)
        .and_then(|item| item.attributes.get_named(attr));
    Resolved::new(base, calculated).effective()
}

fn category_of<D: StaticData + ?Sized>(type_id: TypeId, data: &D) -> ItemCategory {
    data.item_type(type_id)
        .map_or(ItemCategory::Other, |def| def.category())
}

impl FittingSummary {
    pub fn compute<D: StaticData + ?Sized>(
        input: &SimulationInput,
        output: &SimulationOutput,
        data: &D,
    ) -> Self {
        let ship = &output.ship.item.attributes;
        let mut summary = FittingSummary::default();

        // Subsystems add to the hull's hardpoints and slots.
        let subsystems: Vec<_> = input
            .modules
            .iter()
            .map(|module| data.resolved_type(module.type_id, module.mutation.as_ref()))
            .zip(&input.modules)
            .filter(|(type_id, _)| category_of(*type_id, data) == ItemCategory::Subsystem)
            .map(|(type_id, module)| (type_id, output.module(module.flag).map(|m| &m.item)))
            .collect();
        let subsystem_sum = |attr: Attr| -> f64 {
            subsystems
                .iter()
                .map(|(type_id, item)| item_value(*type_id, *item, attr, data))
                .sum()
        };

        summary.turret_hardpoints.total =
            ship.named(Attr::TurretSlotsLeft) + subsystem_sum(Attr::TurretHardPointModifier);
        summary.launcher_hardpoints.total =
            ship.named(Attr::LauncherSlotsLeft) + subsystem_sum(Attr::LauncherHardPointModifier);

        summary.slots.hi.total = ship.named(Attr::HiSlots) + subsystem_sum(Attr::HiSlotModifier);
        summary.slots.med.total =
            ship.named(Attr::MedSlots) + subsystem_sum(Attr::MedSlotModifier);
        summary.slots.low.total =
            ship.named(Attr::LowSlots) + subsystem_sum(Attr::LowSlotModifier);
        summary.slots.rig.total = ship.named(Attr::RigSlots);
        summary.slots.subsystem.total = ship.named(Attr::MaxSubSystems);

        summary.cpu.total = ship.named(Attr::CpuOutput);
        summary.power.total = ship.named(Attr::PowerOutput);
        summary.calibration.total = ship.named(Attr::UpgradeCapacity);

        for module in &input.modules {
            summary.slots.get_mut(module.flag.kind).used += 1.0;

            let type_id = data.resolved_type(module.type_id, module.mutation.as_ref());
            let Some(def) = data.item_type(type_id) else {
                continue;
            };
            if def.has_effect(EFFECT_TURRET_FITTED) {
                summary.turret_hardpoints.used += 1.0;
            }
            if def.has_effect(EFFECT_LAUNCHER_FITTED) {
                summary.launcher_hardpoints.used += 1.0;
            }

            let item = output.module(module.flag).map(|m| &m.item);
            if slot_kind_of(def) == Some(SlotKind::Rig) {
                summary.calibration.used += item_value(type_id, item, Attr::UpgradeCost, data);
            }
            if module.status >= ModuleStatus::Online {
                summary.cpu.used += item_value(type_id, item, Attr::Cpu, data);
                summary.power.used += item_value(type_id, item, Attr::Power, data);
            }
        }

        summary.drone_bandwidth.total = ship.named(Attr::DroneBandwidth);
        summary.drone_capacity.total = ship.named(Attr::DroneCapacity);
        summary.active_drones.total = output
            .ship
            .character_attributes
            .named(Attr::MaxActiveDrones);
        for (index, drone) in input.drones.iter().enumerate() {
            let type_id = data.resolved_type(drone.type_id, drone.mutation.as_ref());
            let item = output.drones.get(index).map(|d| &d.item);
            let bandwidth = item_value(type_id, item, Attr::DroneBandwidthUsed, data);
            let volume = item_value(type_id, item, Attr::Volume, data);
            summary.drone_bandwidth.used += bandwidth * f64::from(drone.active_count);
            summary.drone_capacity.used += volume * f64::from(drone.quantity);
            summary.active_drones.used += f64::from(drone.active_count);
        }

        summary.fighters.tubes.total = ship.named(Attr::FighterTubes);
        summary.fighters.light.total = ship.named(Attr::FighterLightSlots);
        summary.fighters.support.total = ship.named(Attr::FighterSupportSlots);
        summary.fighters.heavy.total = ship.named(Attr::FighterHeavySlots);
        for (index, fighter) in input.fighters.iter().enumerate() {
            if fighter.tube_id.is_none() {
                continue;
            }
            summary.fighters.tubes.used += 1.0;
            let item = output.fighters.get(index).map(|f| &f.item);
            let flagged = |attr: Attr| item_value(fighter.type_id, item, attr, data) > 0.0;
            if flagged(Attr::FighterSquadronIsLight) {
                summary.fighters.light.used += 1.0;
            } else if flagged(Attr::FighterSquadronIsSupport) {
                summary.fighters.support.used += 1.0;
            } else if flagged(Attr::FighterSquadronIsHeavy) {
                summary.fighters.heavy.used += 1.0;
            }
        }

        summary
    }

    /// Free hardpoints of the given kind; `None` for modules that need none.
    pub fn free_hardpoints<D: StaticData + ?Sized>(&self, type_id: TypeId, data: &D) -> Option<f64> {
        let def = data.item_type(type_id)?;
        if def.has_effect(EFFECT_TURRET_FITTED) {
            Some(self.turret_hardpoints.remaining())
        } else if def.has_effect(EFFECT_LAUNCHER_FITTED) {
            Some(self.launcher_hardpoints.remaining())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_at_capacity_is_not_exceeded() {
        let usage = Usage::new(50.0, 50.0);
        assert!(!usage.is_exceeded());
        assert!(usage.remaining().abs() < f64::EPSILON);
        assert!(Usage::new(51.0, 50.0).is_exceeded());
    }
}
