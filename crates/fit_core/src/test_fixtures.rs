//! Shared test fixtures for fit_core and downstream crates.
//!
//! `base_content()` is a small but complete static-data set: a frigate, a
//! strategic cruiser with subsystems and a carrier with fighter tubes, a
//! handful of modules, charges, drones, skills, one implant, one environment
//! effect and one mutaplasmid. Ids follow the game's where one exists.

use std::collections::BTreeMap;

use crate::attributes::Attr;
use crate::content::{AttributeDef, EffectDef, GameContent, MutationDef, TypeDef};
use crate::effects::{
    EffectCategory, ModifierDomain, ModifierFunc, ModifierInfo, EFFECT_HI_POWER,
    EFFECT_LAUNCHER_FITTED, EFFECT_LO_POWER, EFFECT_MED_POWER, EFFECT_ONLINE, EFFECT_RIG_SLOT,
    EFFECT_SUBSYSTEM, EFFECT_TURRET_FITTED,
};
use crate::modifier::Operation;
use crate::types::{
    AttributeId, ChargeInput, EffectId, GroupId, ModuleInput, ModuleStatus, SimulationInput,
    SlotFlag, SlotKind, TypeId, CHARACTER_TYPE_ID,
};

// Gameplay attributes that are not part of the fitting rules.
pub const ATTR_MAX_VELOCITY: AttributeId = AttributeId(37);
pub const ATTR_SPEED: AttributeId = AttributeId(51);
pub const ATTR_MAX_RANGE: AttributeId = AttributeId(54);
pub const ATTR_DAMAGE_MULTIPLIER: AttributeId = AttributeId(64);
pub const ATTR_WEAPON_RANGE_MULTIPLIER: AttributeId = AttributeId(120);
pub const ATTR_SHIELD_CAPACITY_MULTIPLIER: AttributeId = AttributeId(146);
pub const ATTR_SHIELD_CAPACITY: AttributeId = AttributeId(263);
pub const ATTR_SHIELD_EM_RESONANCE: AttributeId = AttributeId(271);
pub const ATTR_DAMAGE_MULTIPLIER_BONUS: AttributeId = AttributeId(292);
pub const ATTR_VELOCITY_BONUS: AttributeId = AttributeId(315);
pub const ATTR_CAPACITOR_CAPACITY: AttributeId = AttributeId(482);
pub const ATTR_EM_RESISTANCE_BONUS: AttributeId = AttributeId(984);
pub const ATTR_CAPACITOR_CAPACITY_BONUS: AttributeId = AttributeId(1079);
pub const ATTR_OVERLOAD_ROF_BONUS: AttributeId = AttributeId(1205);

pub const GROUP_CHARACTER: GroupId = GroupId(1);
pub const GROUP_FRIGATE: GroupId = GroupId(25);
pub const GROUP_PROJECTILE_WEAPON: GroupId = GroupId(55);
pub const GROUP_GYROSTABILIZER: GroupId = GroupId(59);
pub const GROUP_DAMAGE_CONTROL: GroupId = GroupId(60);
pub const GROUP_SHIELD_HARDENER: GroupId = GroupId(77);
pub const GROUP_PROJECTILE_AMMO: GroupId = GroupId(83);
pub const GROUP_COMBAT_DRONE: GroupId = GroupId(100);
pub const GROUP_SCAN_PROBE_LAUNCHER: GroupId = GroupId(481);
pub const GROUP_CARRIER: GroupId = GroupId(547);
pub const GROUP_RIG_PROJECTILE: GroupId = GroupId(779);
pub const GROUP_STRATEGIC_CRUISER: GroupId = GroupId(963);
pub const GROUP_OFFENSIVE_SUBSYSTEM: GroupId = GroupId(956);
pub const GROUP_ENTOSIS_LINK: GroupId = GroupId(1313);
pub const GROUP_FIGHTER: GroupId = GroupId(1652);
pub const GROUP_SKILL_GUNNERY: GroupId = GroupId(255);
pub const GROUP_SKILL_ENGINEERING: GroupId = GroupId(1216);
pub const GROUP_SKILL_DRONES: GroupId = GroupId(273);
pub const GROUP_IMPLANT: GroupId = GroupId(300);
pub const GROUP_EFFECT_BEACON: GroupId = GroupId(920);
pub const GROUP_MUTAPLASMID: GroupId = GroupId(1964);

pub const SHIP_RIFTER: TypeId = TypeId(587);
pub const SHIP_TENGU: TypeId = TypeId(29_984);
pub const SHIP_THANATOS: TypeId = TypeId(23_911);

pub const MODULE_AUTOCANNON: TypeId = TypeId(484);
pub const MODULE_PROBE_LAUNCHER: TypeId = TypeId(17_938);
pub const MODULE_GYROSTABILIZER: TypeId = TypeId(519);
pub const MODULE_SHIELD_HARDENER: TypeId = TypeId(2_281);
pub const MODULE_DAMAGE_CONTROL: TypeId = TypeId(2_046);
pub const MODULE_ENTOSIS_LINK: TypeId = TypeId(34_593);
pub const MODULE_CARRIER_UPGRADE: TypeId = TypeId(24_283);
pub const MODULE_SMALL_RIG: TypeId = TypeId(31_668);
pub const MODULE_LARGE_RIG: TypeId = TypeId(26_082);
pub const SUBSYSTEM_LAUNCHER: TypeId = TypeId(45_592);
pub const MUTATED_AUTOCANNON: TypeId = TypeId(47_800);

pub const CHARGE_EMP_S: TypeId = TypeId(185);
pub const CHARGE_EMP_L: TypeId = TypeId(201);

pub const DRONE_HOBGOBLIN: TypeId = TypeId(2_454);
pub const FIGHTER_LIGHT: TypeId = TypeId(40_556);
pub const FIGHTER_SUPPORT: TypeId = TypeId(40_557);
pub const FIGHTER_HEAVY: TypeId = TypeId(40_362);

pub const SKILL_SMALL_PROJECTILE: TypeId = TypeId(3_300);
pub const SKILL_CAPACITOR_MANAGEMENT: TypeId = TypeId(3_418);
pub const SKILL_DRONES: TypeId = TypeId(3_436);

pub const IMPLANT_NAVIGATION: TypeId = TypeId(27_097);
pub const ENVIRONMENT_PULSAR: TypeId = TypeId(30_883);
pub const MUTAPLASMID_GUN: TypeId = TypeId(47_700);

pub const EFFECT_PROJECTILE_FIRED: EffectId = EffectId(34);
pub const EFFECT_AMMO_RANGE: EffectId = EffectId(1_851);
pub const EFFECT_GYRO_DAMAGE: EffectId = EffectId(1_225);
pub const EFFECT_OVERLOAD_ROF: EffectId = EffectId(3_001);
pub const EFFECT_HARDENER: EffectId = EffectId(4_928);
pub const EFFECT_DAMAGE_CONTROL: EffectId = EffectId(5_275);
pub const EFFECT_ENTOSIS: EffectId = EffectId(6_063);
pub const EFFECT_DAMAGE_BONUS_PER_LEVEL: EffectId = EffectId(7_001);
pub const EFFECT_SMALL_PROJECTILE_DAMAGE: EffectId = EffectId(7_002);
pub const EFFECT_CAPACITOR_BONUS_PER_LEVEL: EffectId = EffectId(7_003);
pub const EFFECT_CAPACITOR_CAPACITY: EffectId = EffectId(7_004);
pub const EFFECT_DRONES_PER_LEVEL: EffectId = EffectId(7_005);
pub const EFFECT_IMPLANT_VELOCITY: EffectId = EffectId(7_006);
pub const EFFECT_PULSAR_SHIELD: EffectId = EffectId(7_007);

const CATEGORY_CHARACTER: i32 = 1;
const CATEGORY_CELESTIAL: i32 = 2;
const CATEGORY_SHIP: i32 = 6;
const CATEGORY_MODULE: i32 = 7;
const CATEGORY_CHARGE: i32 = 8;
const CATEGORY_SKILL: i32 = 16;
const CATEGORY_COMMODITY: i32 = 17;
const CATEGORY_DRONE: i32 = 18;
const CATEGORY_IMPLANT: i32 = 20;
const CATEGORY_SUBSYSTEM: i32 = 32;
const CATEGORY_FIGHTER: i32 = 87;

fn attribute(id: AttributeId, name: &str, stackable: bool) -> AttributeDef {
    AttributeDef {
        attribute_id: id,
        name: name.to_string(),
        default_value: 0.0,
        stackable,
        high_is_good: true,
    }
}

fn item_type(
    type_id: TypeId,
    name: &str,
    group_id: GroupId,
    category_id: i32,
    attributes: &[(AttributeId, f64)],
    effects: &[EffectId],
) -> TypeDef {
    TypeDef {
        type_id,
        name: name.to_string(),
        group_id,
        category_id,
        attributes: attributes.iter().copied().collect::<BTreeMap<_, _>>(),
        effects: effects.iter().copied().collect(),
        icon_file: None,
    }
}

fn effect(
    effect_id: EffectId,
    name: &str,
    category: EffectCategory,
    modifier_info: Vec<ModifierInfo>,
) -> EffectDef {
    EffectDef {
        effect_id,
        name: name.to_string(),
        category,
        is_default: false,
        is_offensive: false,
        is_assistance: false,
        modifier_info,
        target_type_name: None,
        target_group_id: None,
    }
}

fn modifier(
    domain: ModifierDomain,
    func: ModifierFunc,
    modified: AttributeId,
    modifying: AttributeId,
    operation: Operation,
) -> ModifierInfo {
    ModifierInfo {
        domain,
        func,
        modified_attribute_id: modified,
        modifying_attribute_id: modifying,
        operation,
        group_id: None,
        skill_type_id: None,
    }
}

fn attributes() -> Vec<AttributeDef> {
    let mut defs: Vec<AttributeDef> = Attr::ALL
        .iter()
        .map(|attr| attribute(attr.id(), attr.name(), true))
        .collect();
    defs.extend([
        attribute(ATTR_MAX_VELOCITY, "maxVelocity", false),
        attribute(ATTR_SPEED, "speed", false),
        attribute(ATTR_MAX_RANGE, "maxRange", false),
        attribute(ATTR_DAMAGE_MULTIPLIER, "damageMultiplier", false),
        attribute(ATTR_WEAPON_RANGE_MULTIPLIER, "weaponRangeMultiplier", true),
        attribute(ATTR_SHIELD_CAPACITY_MULTIPLIER, "shieldCapacityMultiplier", true),
        attribute(ATTR_SHIELD_CAPACITY, "shieldCapacity", false),
        attribute(ATTR_SHIELD_EM_RESONANCE, "shieldEmDamageResonance", false),
        attribute(ATTR_DAMAGE_MULTIPLIER_BONUS, "damageMultiplierBonus", true),
        attribute(ATTR_VELOCITY_BONUS, "velocityBonus", true),
        attribute(ATTR_CAPACITOR_CAPACITY, "capacitorCapacity", false),
        attribute(ATTR_EM_RESISTANCE_BONUS, "emDamageResistanceBonus", true),
        attribute(ATTR_CAPACITOR_CAPACITY_BONUS, "capacitorCapacityBonus", true),
        attribute(ATTR_OVERLOAD_ROF_BONUS, "overloadRofBonus", true),
    ]);
    defs
}

#[allow(clippy::too_many_lines)]
fn effects() -> Vec<EffectDef> {
    use ModifierDomain::{Character, Item, Other, Ship};
    use ModifierFunc::{Item as ItemMod, LocationGroup, OwnerRequiredSkill};

    let mut gyro = modifier(
        Ship,
        LocationGroup,
        ATTR_DAMAGE_MULTIPLIER,
        ATTR_DAMAGE_MULTIPLIER,
        Operation::PostMul,
    );
    gyro.group_id = Some(GROUP_PROJECTILE_WEAPON);

    let mut small_projectile = modifier(
        Character,
        OwnerRequiredSkill,
        ATTR_DAMAGE_MULTIPLIER,
        ATTR_DAMAGE_MULTIPLIER_BONUS,
        Operation::PostPercent,
    );
    small_projectile.skill_type_id = Some(-1);

    let mut projectile_fired = effect(
        EFFECT_PROJECTILE_FIRED,
        "projectileFired",
        EffectCategory::Active,
        Vec::new(),
    );
    projectile_fired.is_offensive = true;

    vec![
        effect(EFFECT_LO_POWER, "loPower", EffectCategory::Passive, Vec::new()),
        effect(EFFECT_HI_POWER, "hiPower", EffectCategory::Passive, Vec::new()),
        effect(EFFECT_MED_POWER, "medPower", EffectCategory::Passive, Vec::new()),
        effect(EFFECT_ONLINE, "online", EffectCategory::Online, Vec::new()),
        effect(
            EFFECT_LAUNCHER_FITTED,
            "launcherFitted",
            EffectCategory::Passive,
            Vec::new(),
        ),
        effect(
            EFFECT_TURRET_FITTED,
            "turretFitted",
            EffectCategory::Passive,
            Vec::new(),
        ),
        effect(EFFECT_RIG_SLOT, "rigSlot", EffectCategory::Passive, Vec::new()),
        effect(EFFECT_SUBSYSTEM, "subSystem", EffectCategory::Passive, Vec::new()),
        projectile_fired,
        effect(
            EFFECT_AMMO_RANGE,
            "ammoInfluenceRange",
            EffectCategory::Passive,
            vec![modifier(
                Other,
                ItemMod,
                ATTR_MAX_RANGE,
                ATTR_WEAPON_RANGE_MULTIPLIER,
                Operation::PostMul,
            )],
        ),
        effect(
            EFFECT_GYRO_DAMAGE,
            "projectileWeaponDamageMultiplier",
            EffectCategory::Online,
            vec![gyro],
        ),
        effect(
            EFFECT_OVERLOAD_ROF,
            "overloadRofBonus",
            EffectCategory::Overload,
            vec![modifier(
                Item,
                ItemMod,
                ATTR_SPEED,
                ATTR_OVERLOAD_ROF_BONUS,
                Operation::PostPercent,
            )],
        ),
        effect(
            EFFECT_HARDENER,
            "shieldHardener",
            EffectCategory::Active,
            vec![modifier(
                Ship,
                ItemMod,
                ATTR_SHIELD_EM_RESONANCE,
                ATTR_EM_RESISTANCE_BONUS,
                Operation::PostPercent,
            )],
        ),
        effect(
            EFFECT_DAMAGE_CONTROL,
            "damageControl",
            EffectCategory::Active,
            Vec::new(),
        ),
        effect(EFFECT_ENTOSIS, "entosisLink", EffectCategory::Active, Vec::new()),
        effect(
            EFFECT_DAMAGE_BONUS_PER_LEVEL,
            "damageMultiplierBonusPerLevel",
            EffectCategory::Passive,
            vec![modifier(
                Item,
                ItemMod,
                ATTR_DAMAGE_MULTIPLIER_BONUS,
                Attr::SkillLevel.id(),
                Operation::PostMul,
            )],
        ),
        effect(
            EFFECT_SMALL_PROJECTILE_DAMAGE,
            "smallProjectileDamage",
            EffectCategory::Passive,
            vec![small_projectile],
        ),
        effect(
            EFFECT_CAPACITOR_BONUS_PER_LEVEL,
            "capacitorCapacityBonusPerLevel",
            EffectCategory::Passive,
            vec![modifier(
                Item,
                ItemMod,
                ATTR_CAPACITOR_CAPACITY_BONUS,
                Attr::SkillLevel.id(),
                Operation::PostMul,
            )],
        ),
        effect(
            EFFECT_CAPACITOR_CAPACITY,
            "capacitorCapacityBonusPostPercent",
            EffectCategory::Passive,
            vec![modifier(
                Ship,
                ItemMod,
                ATTR_CAPACITOR_CAPACITY,
                ATTR_CAPACITOR_CAPACITY_BONUS,
                Operation::PostPercent,
            )],
        ),
        effect(
            EFFECT_DRONES_PER_LEVEL,
            "maxActiveDroneBonus",
            EffectCategory::Passive,
            vec![modifier(
                Character,
                ItemMod,
                Attr::MaxActiveDrones.id(),
                Attr::SkillLevel.id(),
                Operation::ModAdd,
            )],
        ),
        effect(
            EFFECT_IMPLANT_VELOCITY,
            "implantVelocityBonus",
            EffectCategory::Passive,
            vec![modifier(
                Ship,
                ItemMod,
                ATTR_MAX_VELOCITY,
                ATTR_VELOCITY_BONUS,
                Operation::PostPercent,
            )],
        ),
        effect(
            EFFECT_PULSAR_SHIELD,
            "pulsarShieldCapacity",
            EffectCategory::System,
            vec![modifier(
                Ship,
                ItemMod,
                ATTR_SHIELD_CAPACITY,
                ATTR_SHIELD_CAPACITY_MULTIPLIER,
                Operation::PostMul,
            )],
        ),
    ]
}

fn autocannon_attributes(max_range: f64) -> Vec<(AttributeId, f64)> {
    vec![
        (Attr::Cpu.id(), 8.0),
        (Attr::Power.id(), 3.0),
        (Attr::Capacity.id(), 100.0),
        (Attr::ChargeGroup1.id(), f64::from(GROUP_PROJECTILE_AMMO.0)),
        (Attr::ChargeSize.id(), 1.0),
        (Attr::RequiredSkill1.id(), f64::from(SKILL_SMALL_PROJECTILE.0)),
        (ATTR_DAMAGE_MULTIPLIER, 2.0),
        (ATTR_SPEED, 2_500.0),
        (ATTR_MAX_RANGE, max_range),
        (ATTR_OVERLOAD_ROF_BONUS, -15.0),
    ]
}

const AUTOCANNON_EFFECTS: [EffectId; 5] = [
    EFFECT_HI_POWER,
    EFFECT_TURRET_FITTED,
    EFFECT_ONLINE,
    EFFECT_PROJECTILE_FIRED,
    EFFECT_OVERLOAD_ROF,
];

#[allow(clippy::too_many_lines)]
fn types() -> Vec<TypeDef> {
    vec![
        item_type(
            CHARACTER_TYPE_ID,
            "Character",
            GROUP_CHARACTER,
            CATEGORY_CHARACTER,
            &[],
            &[],
        ),
        // Ships
        item_type(
            SHIP_RIFTER,
            "Rifter",
            GROUP_FRIGATE,
            CATEGORY_SHIP,
            &[
                (Attr::Mass.id(), 1_067_000.0),
                (Attr::HiSlots.id(), 4.0),
                (Attr::MedSlots.id(), 3.0),
                (Attr::LowSlots.id(), 3.0),
                (Attr::RigSlots.id(), 3.0),
                (Attr::TurretSlotsLeft.id(), 3.0),
                (Attr::LauncherSlotsLeft.id(), 2.0),
                (Attr::CpuOutput.id(), 130.0),
                (Attr::PowerOutput.id(), 41.0),
                (Attr::UpgradeCapacity.id(), 400.0),
                (Attr::RigSize.id(), 1.0),
                (Attr::Capacity.id(), 0.0),
                (Attr::DroneBandwidth.id(), 50.0),
                (Attr::DroneCapacity.id(), 50.0),
                (ATTR_MAX_VELOCITY, 355.0),
                (ATTR_SHIELD_CAPACITY, 450.0),
                (ATTR_SHIELD_EM_RESONANCE, 1.0),
                (ATTR_CAPACITOR_CAPACITY, 250.0),
            ],
            &[],
        ),
        item_type(
            SHIP_TENGU,
            "Tengu",
            GROUP_STRATEGIC_CRUISER,
            CATEGORY_SHIP,
            &[
                (Attr::HiSlots.id(), 0.0),
                (Attr::MedSlots.id(), 0.0),
                (Attr::LowSlots.id(), 0.0),
                (Attr::RigSlots.id(), 3.0),
                (Attr::TurretSlotsLeft.id(), 0.0),
                (Attr::LauncherSlotsLeft.id(), 0.0),
                (Attr::MaxSubSystems.id(), 4.0),
                (Attr::RigSize.id(), 2.0),
                (Attr::CpuOutput.id(), 400.0),
                (Attr::PowerOutput.id(), 900.0),
                (Attr::UpgradeCapacity.id(), 400.0),
            ],
            &[],
        ),
        item_type(
            SHIP_THANATOS,
            "Thanatos",
            GROUP_CARRIER,
            CATEGORY_SHIP,
            &[
                (Attr::HiSlots.id(), 3.0),
                (Attr::MedSlots.id(), 5.0),
                (Attr::LowSlots.id(), 6.0),
                (Attr::RigSlots.id(), 3.0),
                (Attr::RigSize.id(), 4.0),
                (Attr::FighterTubes.id(), 3.0),
                (Attr::FighterLightSlots.id(), 3.0),
                (Attr::FighterSupportSlots.id(), 1.0),
                (Attr::FighterHeavySlots.id(), 0.0),
            ],
            &[],
        ),
        // Modules
        item_type(
            MODULE_AUTOCANNON,
            "125mm Gatling AutoCannon I",
            GROUP_PROJECTILE_WEAPON,
            CATEGORY_MODULE,
            &autocannon_attributes(1_000.0),
            &AUTOCANNON_EFFECTS,
        ),
        item_type(
            MUTATED_AUTOCANNON,
            "125mm Gatling AutoCannon I (mutated)",
            GROUP_PROJECTILE_WEAPON,
            CATEGORY_MODULE,
            &autocannon_attributes(1_200.0),
            &AUTOCANNON_EFFECTS,
        ),
        item_type(
            MODULE_PROBE_LAUNCHER,
            "Core Probe Launcher I",
            GROUP_SCAN_PROBE_LAUNCHER,
            CATEGORY_MODULE,
            &[
                (Attr::Cpu.id(), 20.0),
                (Attr::Power.id(), 1.0),
                (Attr::Capacity.id(), 50.0),
            ],
            &[EFFECT_HI_POWER, EFFECT_LAUNCHER_FITTED, EFFECT_ONLINE],
        ),
        item_type(
            MODULE_GYROSTABILIZER,
            "Gyrostabilizer I",
            GROUP_GYROSTABILIZER,
            CATEGORY_MODULE,
            &[
                (Attr::Cpu.id(), 30.0),
                (Attr::Power.id(), 1.0),
                (ATTR_DAMAGE_MULTIPLIER, 1.1),
            ],
            &[EFFECT_LO_POWER, EFFECT_ONLINE, EFFECT_GYRO_DAMAGE],
        ),
        item_type(
            MODULE_SHIELD_HARDENER,
            "Multispectrum Shield Hardener I",
            GROUP_SHIELD_HARDENER,
            CATEGORY_MODULE,
            &[
                (Attr::Cpu.id(), 44.0),
                (Attr::Power.id(), 1.0),
                (Attr::MaxGroupActive.id(), 2.0),
                (ATTR_EM_RESISTANCE_BONUS, -30.0),
            ],
            &[EFFECT_MED_POWER, EFFECT_ONLINE, EFFECT_HARDENER],
        ),
        item_type(
            MODULE_DAMAGE_CONTROL,
            "Damage Control I",
            GROUP_DAMAGE_CONTROL,
            CATEGORY_MODULE,
            &[
                (Attr::Cpu.id(), 25.0),
                (Attr::Power.id(), 1.0),
                (Attr::MaxGroupFitted.id(), 1.0),
                (Attr::MaxGroupActive.id(), 1.0),
            ],
            &[EFFECT_LO_POWER, EFFECT_ONLINE, EFFECT_DAMAGE_CONTROL],
        ),
        item_type(
            MODULE_ENTOSIS_LINK,
            "Entosis Link I",
            GROUP_ENTOSIS_LINK,
            CATEGORY_MODULE,
            &[
                (Attr::Cpu.id(), 40.0),
                (Attr::Power.id(), 1.0),
                (Attr::MaxGroupOnline.id(), 1.0),
            ],
            &[EFFECT_HI_POWER, EFFECT_ONLINE, EFFECT_ENTOSIS],
        ),
        item_type(
            MODULE_CARRIER_UPGRADE,
            "Networked Sensor Array",
            GroupId(1_706),
            CATEGORY_MODULE,
            &[(Attr::CanFitShipGroup01.id(), f64::from(GROUP_CARRIER.0))],
            &[EFFECT_LO_POWER, EFFECT_ONLINE],
        ),
        item_type(
            MODULE_SMALL_RIG,
            "Small Projectile Burst Aerator I",
            GROUP_RIG_PROJECTILE,
            CATEGORY_MODULE,
            &[(Attr::RigSize.id(), 1.0), (Attr::UpgradeCost.id(), 50.0)],
            &[EFFECT_RIG_SLOT],
        ),
        item_type(
            MODULE_LARGE_RIG,
            "Large Projectile Burst Aerator I",
            GROUP_RIG_PROJECTILE,
            CATEGORY_MODULE,
            &[(Attr::RigSize.id(), 3.0), (Attr::UpgradeCost.id(), 150.0)],
            &[EFFECT_RIG_SLOT],
        ),
        item_type(
            SUBSYSTEM_LAUNCHER,
            "Tengu Offensive - Accelerated Ejection Bay",
            GROUP_OFFENSIVE_SUBSYSTEM,
            CATEGORY_SUBSYSTEM,
            &[
                (Attr::HiSlotModifier.id(), 5.0),
                (Attr::MedSlotModifier.id(), 1.0),
                (Attr::LowSlotModifier.id(), 0.0),
                (Attr::LauncherHardPointModifier.id(), 5.0),
                (Attr::TurretHardPointModifier.id(), 0.0),
            ],
            &[EFFECT_SUBSYSTEM],
        ),
        // Charges
        item_type(
            CHARGE_EMP_S,
            "EMP S",
            GROUP_PROJECTILE_AMMO,
            CATEGORY_CHARGE,
            &[
                (Attr::Volume.id(), 5.0),
                (Attr::ChargeSize.id(), 1.0),
                (ATTR_WEAPON_RANGE_MULTIPLIER, 0.5),
            ],
            &[EFFECT_AMMO_RANGE],
        ),
        item_type(
            CHARGE_EMP_L,
            "EMP L",
            GROUP_PROJECTILE_AMMO,
            CATEGORY_CHARGE,
            &[
                (Attr::Volume.id(), 25.0),
                (Attr::ChargeSize.id(), 3.0),
                (ATTR_WEAPON_RANGE_MULTIPLIER, 0.5),
            ],
            &[EFFECT_AMMO_RANGE],
        ),
        // Drones and fighters
        item_type(
            DRONE_HOBGOBLIN,
            "Hobgoblin I",
            GROUP_COMBAT_DRONE,
            CATEGORY_DRONE,
            &[
                (Attr::DroneBandwidthUsed.id(), 25.0),
                (Attr::Volume.id(), 5.0),
                (ATTR_MAX_VELOCITY, 3_000.0),
            ],
            &[],
        ),
        item_type(
            FIGHTER_LIGHT,
            "Templar I",
            GROUP_FIGHTER,
            CATEGORY_FIGHTER,
            &[(Attr::FighterSquadronIsLight.id(), 1.0), (Attr::Volume.id(), 5_000.0)],
            &[],
        ),
        item_type(
            FIGHTER_SUPPORT,
            "Cenobite I",
            GROUP_FIGHTER,
            CATEGORY_FIGHTER,
            &[(Attr::FighterSquadronIsSupport.id(), 1.0), (Attr::Volume.id(), 5_000.0)],
            &[],
        ),
        item_type(
            FIGHTER_HEAVY,
            "Mantis I",
            GROUP_FIGHTER,
            CATEGORY_FIGHTER,
            &[(Attr::FighterSquadronIsHeavy.id(), 1.0), (Attr::Volume.id(), 12_000.0)],
            &[],
        ),
        // Skills
        item_type(
            SKILL_SMALL_PROJECTILE,
            "Small Projectile Turret",
            GROUP_SKILL_GUNNERY,
            CATEGORY_SKILL,
            &[(ATTR_DAMAGE_MULTIPLIER_BONUS, 5.0)],
            &[EFFECT_DAMAGE_BONUS_PER_LEVEL, EFFECT_SMALL_PROJECTILE_DAMAGE],
        ),
        item_type(
            SKILL_CAPACITOR_MANAGEMENT,
            "Capacitor Management",
            GROUP_SKILL_ENGINEERING,
            CATEGORY_SKILL,
            &[(ATTR_CAPACITOR_CAPACITY_BONUS, 5.0)],
            &[EFFECT_CAPACITOR_BONUS_PER_LEVEL, EFFECT_CAPACITOR_CAPACITY],
        ),
        item_type(
            SKILL_DRONES,
            "Drones",
            GROUP_SKILL_DRONES,
            CATEGORY_SKILL,
            &[],
            &[EFFECT_DRONES_PER_LEVEL],
        ),
        // Implants, environment, mutaplasmids
        item_type(
            IMPLANT_NAVIGATION,
            "Eifyr and Co. 'Rogue' Navigation NN-605",
            GROUP_IMPLANT,
            CATEGORY_IMPLANT,
            &[(ATTR_VELOCITY_BONUS, 5.0)],
            &[EFFECT_IMPLANT_VELOCITY],
        ),
        item_type(
            ENVIRONMENT_PULSAR,
            "Pulsar Effect Beacon Class 1",
            GROUP_EFFECT_BEACON,
            CATEGORY_CELESTIAL,
            &[(ATTR_SHIELD_CAPACITY_MULTIPLIER, 1.3)],
            &[EFFECT_PULSAR_SHIELD],
        ),
        item_type(
            MUTAPLASMID_GUN,
            "Decayed Small Projectile Mutaplasmid",
            GROUP_MUTAPLASMID,
            CATEGORY_COMMODITY,
            &[],
            &[],
        ),
    ]
}

/// Full fixture content.
pub fn base_content() -> GameContent {
    GameContent::new(
        "test",
        types(),
        attributes(),
        effects(),
        vec![MutationDef {
            base_type_id: MODULE_AUTOCANNON,
            mutaplasmid_id: MUTAPLASMID_GUN,
            result_type_id: MUTATED_AUTOCANNON,
            name: "Mutated 125mm Gatling AutoCannon I".to_string(),
            icon_file: None,
        }],
    )
}

/// Empty fixture content: no types, effects or attributes at all.
pub fn minimal_content() -> GameContent {
    GameContent::new("test-minimal", Vec::new(), Vec::new(), Vec::new(), Vec::new())
}

pub fn hi(index: u8) -> SlotFlag {
    SlotFlag::new(SlotKind::Hi, index)
}

pub fn med(index: u8) -> SlotFlag {
    SlotFlag::new(SlotKind::Med, index)
}

pub fn low(index: u8) -> SlotFlag {
    SlotFlag::new(SlotKind::Low, index)
}

pub fn rig(index: u8) -> SlotFlag {
    SlotFlag::new(SlotKind::Rig, index)
}

/// Rifter with an active autocannon in `HiSlot0`, loaded with EMP S.
pub fn fit_with_autocannon() -> SimulationInput {
    let mut input = SimulationInput::new(SHIP_RIFTER);
    let mut gun = ModuleInput::new(MODULE_AUTOCANNON, hi(0));
    gun.status = ModuleStatus::Active;
    gun.charge = Some(ChargeInput {
        type_id: CHARGE_EMP_S,
    });
    gun.state_stamp = 1;
    input.modules.push(gun);
    input.next_stamp = 2;
    input
}
