use super::*;
use crate::test_fixtures::{
    base_content, fit_with_autocannon, hi, low, med, rig, ATTR_CAPACITOR_CAPACITY,
    ATTR_DAMAGE_MULTIPLIER, ATTR_DAMAGE_MULTIPLIER_BONUS, ATTR_MAX_RANGE, ATTR_MAX_VELOCITY,
    ATTR_SHIELD_CAPACITY, ATTR_SHIELD_EM_RESONANCE, ATTR_SPEED, CHARGE_EMP_L, CHARGE_EMP_S,
    DRONE_HOBGOBLIN, ENVIRONMENT_PULSAR, FIGHTER_HEAVY, FIGHTER_LIGHT, FIGHTER_SUPPORT,
    IMPLANT_NAVIGATION, MODULE_AUTOCANNON, MODULE_CARRIER_UPGRADE, MODULE_DAMAGE_CONTROL,
    MODULE_ENTOSIS_LINK, MODULE_GYROSTABILIZER, MODULE_LARGE_RIG, MODULE_PROBE_LAUNCHER,
    MODULE_SHIELD_HARDENER, MODULE_SMALL_RIG, MUTAPLASMID_GUN, MUTATED_AUTOCANNON, SHIP_RIFTER,
    SHIP_TENGU, SHIP_THANATOS, SKILL_CAPACITOR_MANAGEMENT, SKILL_DRONES, SKILL_SMALL_PROJECTILE,
    SUBSYSTEM_LAUNCHER,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

mod calculator;
mod constraints;
mod derived;

// --- Shared test helpers ------------------------------------------------

const TOLERANCE: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

fn make_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

fn module(type_id: TypeId, flag: SlotFlag, status: ModuleStatus) -> ModuleInput {
    let mut module = ModuleInput::new(type_id, flag);
    module.status = status;
    module
}

fn calculate(input: &SimulationInput) -> SimulationOutput {
    calculate_and_generate_output(input, &base_content())
}

fn module_attr(output: &SimulationOutput, flag: SlotFlag, attribute: AttributeId) -> f64 {
    output
        .module(flag)
        .unwrap_or_else(|| panic!("no module at {flag}"))
        .item
        .attributes
        .value(attribute)
}

/// Rifter with most kinds of items: guns, a gyro, hardeners, drones, an
/// implant, an environment effect and a few skills.
fn busy_fit() -> SimulationInput {
    let mut input = fit_with_autocannon();
    let mut second_gun = module(MODULE_AUTOCANNON, hi(1), ModuleStatus::Active);
    second_gun.charge = Some(ChargeInput {
        type_id: CHARGE_EMP_S,
    });
    input.modules.push(second_gun);
    input
        .modules
        .push(module(MODULE_GYROSTABILIZER, low(0), ModuleStatus::Online));
    input
        .modules
        .push(module(MODULE_GYROSTABILIZER, low(1), ModuleStatus::Online));
    input
        .modules
        .push(module(MODULE_SHIELD_HARDENER, med(0), ModuleStatus::Active));
    input
        .modules
        .push(module(MODULE_SHIELD_HARDENER, med(1), ModuleStatus::Active));
    input
        .modules
        .push(module(MODULE_SMALL_RIG, rig(0), ModuleStatus::Online));
    input.drones.push(DroneInput {
        type_id: DRONE_HOBGOBLIN,
        quantity: 2,
        active_count: 2,
        mutation: None,
    });
    input.implants.push(ImplantInput {
        type_id: IMPLANT_NAVIGATION,
    });
    input.environment.push(EnvironmentInput {
        type_id: ENVIRONMENT_PULSAR,
    });
    input.skills.insert(SKILL_SMALL_PROJECTILE, 5);
    input.skills.insert(SKILL_CAPACITOR_MANAGEMENT, 4);
    input.skills.insert(SKILL_DRONES, 3);
    input
}
