//! Attribute store and the symbolic names business rules refer to.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::content::StaticData;
use crate::types::AttributeId;

macro_rules! known_attributes {
    ($($variant:ident = ($id:literal, $name:literal)),* $(,)?) => {
        /// Attributes referenced by name in fitting rules.
        ///
        /// Each variant maps to exactly one dogma attribute id and one SDE name,
        /// so id and name lookups for these attributes can never disagree.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Attr {
            $($variant),*
        }

        impl Attr {
            pub const ALL: &'static [Attr] = &[$(Attr::$variant),*];

            pub const fn id(self) -> AttributeId {
                match self {
                    $(Attr::$variant => AttributeId($id)),*
                }
            }

            pub const fn name(self) -> &'static str {
                match self {
                    $(Attr::$variant => $name),*
                }
            }

            pub fn from_id(id: AttributeId) -> Option<Attr> {
                match id.0 {
                    $($id => Some(Attr::$variant),)*
                    _ => None,
                }
            }

            pub fn from_name(name: &str) -> Option<Attr> {
                match name {
                    $($name => Some(Attr::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

known_attributes! {
    Mass = (4, "mass"),
    PowerOutput = (11, "powerOutput"),
    LowSlots = (12, "lowSlots"),
    MedSlots = (13, "medSlots"),
    HiSlots = (14, "hiSlots"),
    Power = (30, "power"),
    Capacity = (38, "capacity"),
    CpuOutput = (48, "cpuOutput"),
    Cpu = (50, "cpu"),
    LauncherSlotsLeft = (101, "launcherSlotsLeft"),
    TurretSlotsLeft = (102, "turretSlotsLeft"),
    ChargeSize = (128, "chargeSize"),
    Volume = (161, "volume"),
    RequiredSkill1 = (182, "requiredSkill1"),
    RequiredSkill2 = (183, "requiredSkill2"),
    RequiredSkill3 = (184, "requiredSkill3"),
    SkillLevel = (280, "skillLevel"),
    DroneCapacity = (283, "droneCapacity"),
    MaxActiveDrones = (352, "maxActiveDrones"),
    ChargeGroup1 = (604, "chargeGroup1"),
    ChargeGroup2 = (605, "chargeGroup2"),
    ChargeGroup3 = (606, "chargeGroup3"),
    ChargeGroup4 = (609, "chargeGroup4"),
    ChargeGroup5 = (610, "chargeGroup5"),
    MaxGroupActive = (763, "maxGroupActive"),
    MaxGroupOnline = (978, "maxGroupOnline"),
    UpgradeCapacity = (1132, "upgradeCapacity"),
    RigSlots = (1137, "rigSlots"),
    UpgradeCost = (1153, "upgradeCost"),
    DroneBandwidth = (1271, "droneBandwidth"),
    DroneBandwidthUsed = (1272, "droneBandwidthUsed"),
    RequiredSkill4 = (1285, "requiredSkill4"),
    RequiredSkill5 = (1289, "requiredSkill5"),
    RequiredSkill6 = (1290, "requiredSkill6"),
    CanFitShipGroup01 = (1298, "canFitShipGroup01"),
    CanFitShipGroup02 = (1299, "canFitShipGroup02"),
    CanFitShipGroup03 = (1300, "canFitShipGroup03"),
    CanFitShipGroup04 = (1301, "canFitShipGroup04"),
    CanFitShipType1 = (1302, "canFitShipType1"),
    CanFitShipType2 = (1303, "canFitShipType2"),
    CanFitShipType3 = (1304, "canFitShipType3"),
    MaxSubSystems = (1367, "maxSubSystems"),
    TurretHardPointModifier = (1368, "turretHardPointModifier"),
    LauncherHardPointModifier = (1369, "launcherHardPointModifier"),
    HiSlotModifier = (1374, "hiSlotModifier"),
    MedSlotModifier = (1375, "medSlotModifier"),
    LowSlotModifier = (1376, "lowSlotModifier"),
    MaxGroupFitted = (1544, "maxGroupFitted"),
    RigSize = (1547, "rigSize"),
    FighterSquadronIsLight = (2212, "fighterSquadronIsLight"),
    FighterSquadronIsSupport = (2213, "fighterSquadronIsSupport"),
    FighterSquadronIsHeavy = (2214, "fighterSquadronIsHeavy"),
    FighterTubes = (2216, "fighterTubes"),
    FighterLightSlots = (2217, "fighterLightSlots"),
    FighterSupportSlots = (2218, "fighterSupportSlots"),
    FighterHeavySlots = (2219, "fighterHeavySlots"),
}

impl Attr {
    pub const REQUIRED_SKILLS: [Attr; 6] = [
        Attr::RequiredSkill1,
        Attr::RequiredSkill2,
        Attr::RequiredSkill3,
        Attr::RequiredSkill4,
        Attr::RequiredSkill5,
        Attr::RequiredSkill6,
    ];

    pub const CHARGE_GROUPS: [Attr; 5] = [
        Attr::ChargeGroup1,
        Attr::ChargeGroup2,
        Attr::ChargeGroup3,
        Attr::ChargeGroup4,
        Attr::ChargeGroup5,
    ];

    pub const CAN_FIT_SHIP_GROUPS: [Attr; 4] = [
        Attr::CanFitShipGroup01,
        Attr::CanFitShipGroup02,
        Attr::CanFitShipGroup03,
        Attr::CanFitShipGroup04,
    ];

    pub const CAN_FIT_SHIP_TYPES: [Attr; 3] = [
        Attr::CanFitShipType1,
        Attr::CanFitShipType2,
        Attr::CanFitShipType3,
    ];

    /// Value used when an item carries no value for this attribute.
    ///
    /// Every attribute the rules read defaults to zero; in particular an
    /// unset `maxActiveDrones` means no drones may be launched.
    pub const fn default_value(self) -> f64 {
        0.0
    }
}

/// Numeric attribute bag of one item, keyed by attribute id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeStore {
    values: BTreeMap<AttributeId, f64>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: AttributeId) -> Option<f64> {
        self.values.get(&id).copied()
    }

    pub fn value(&self, id: AttributeId) -> f64 {
        self.value_or(id, 0.0)
    }

    pub fn value_or(&self, id: AttributeId, default: f64) -> f64 {
        self.get(id).unwrap_or(default)
    }

    pub fn named(&self, attr: Attr) -> f64 {
        self.value_or(attr.id(), attr.default_value())
    }

    pub fn get_named(&self, attr: Attr) -> Option<f64> {
        self.get(attr.id())
    }

    /// Looks up an attribute by its SDE name. Known names resolve without
    /// touching static data.
    pub fn by_name<D: StaticData + ?Sized>(&self, name: &str, data: &D) -> Option<f64> {
        let id = Attr::from_name(name)
            .map(Attr::id)
            .or_else(|| data.attribute_by_name(name).map(|def| def.attribute_id))?;
        self.get(id)
    }

    /// Name-keyed view for display; attributes without a known name are keyed
    /// by their numeric id.
    pub fn to_named_map<D: StaticData + ?Sized>(&self, data: &D) -> BTreeMap<String, f64> {
        self.values
            .iter()
            .map(|(id, value)| {
                let name = Attr::from_id(*id)
                    .map(|attr| attr.name().to_string())
                    .or_else(|| data.attribute(*id).map(|def| def.name.clone()))
                    .unwrap_or_else(|| id.to_string());
                (name, *value)
            })
            .collect()
    }

    pub fn set(&mut self, id: AttributeId, value: f64) {
        self.values.insert(id, value);
    }

    pub fn contains(&self, id: AttributeId) -> bool {
        self.values.contains_key(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = AttributeId> + '_ {
        self.values.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttributeId, f64)> + '_ {
        self.values.iter().map(|(id, value)| (*id, *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(AttributeId, f64)> for AttributeStore {
    fn from_iter<I: IntoIterator<Item = (AttributeId, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<AttributeId, f64>> for AttributeStore {
    fn from(values: BTreeMap<AttributeId, f64>) -> Self {
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::base_content;

    #[test]
    fn known_attribute_ids_and_names_are_a_bijection() {
        for attr in Attr::ALL {
            assert_eq!(Attr::from_id(attr.id()), Some(*attr));
            assert_eq!(Attr::from_name(attr.name()), Some(*attr));
        }
    }

    #[test]
    fn missing_max_active_drones_defaults_to_zero() {
        let store = AttributeStore::new();
        assert_eq!(store.get_named(Attr::MaxActiveDrones), None);
        assert!(store.named(Attr::MaxActiveDrones).abs() < f64::EPSILON);
    }

    #[test]
    fn id_and_name_lookups_agree() {
        let content = base_content();
        let store: AttributeStore = [(Attr::Capacity.id(), 50.0), (AttributeId(64), 1.5)]
            .into_iter()
            .collect();
        assert_eq!(store.by_name("capacity", &content), Some(50.0));
        assert_eq!(store.by_name("damageMultiplier", &content), Some(1.5));
        assert_eq!(store.by_name("noSuchAttribute", &content), None);

        let named = store.to_named_map(&content);
        assert_eq!(named.get("capacity"), Some(&50.0));
        assert_eq!(named.get("damageMultiplier"), Some(&1.5));
    }

    #[test]
    fn value_or_falls_back_only_when_absent() {
        let store: AttributeStore = [(Attr::Cpu.id(), 0.0)].into_iter().collect();
        assert!(store.value_or(Attr::Cpu.id(), 7.0).abs() < f64::EPSILON);
        assert!((store.value_or(Attr::Power.id(), 7.0) - 7.0).abs() < f64::EPSILON);
    }
}
