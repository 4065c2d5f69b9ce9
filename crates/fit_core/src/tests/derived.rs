use super::*;

fn summarize(input: &SimulationInput) -> FittingSummary {
    let content = base_content();
    let output = calculate_and_generate_output(input, &content);
    FittingSummary::compute(input, &output, &content)
}

#[test]
fn slots_and_hardpoints_of_a_busy_fit() {
    let summary = summarize(&busy_fit());

    assert_eq!(summary.slots.hi, Usage::new(2.0, 4.0));
    assert_eq!(summary.slots.med, Usage::new(2.0, 3.0));
    assert_eq!(summary.slots.low, Usage::new(2.0, 3.0));
    assert_eq!(summary.slots.get(SlotKind::Rig), Usage::new(1.0, 3.0));
    assert_eq!(summary.turret_hardpoints, Usage::new(2.0, 3.0));
    assert_eq!(summary.launcher_hardpoints, Usage::new(0.0, 2.0));
}

#[test]
fn cpu_and_power_count_online_modules() {
    let summary = summarize(&busy_fit());
    // Two guns, two gyros, two hardeners.
    assert_close(summary.cpu.used, 8.0 * 2.0 + 30.0 * 2.0 + 44.0 * 2.0);
    assert_close(summary.cpu.total, 130.0);
    assert!(summary.cpu.is_exceeded());
    assert_close(summary.power.used, 3.0 * 2.0 + 4.0);
    assert!(!summary.power.is_exceeded());

    let mut input = busy_fit();
    for module in &mut input.modules {
        module.status = ModuleStatus::Offline;
    }
    let offline = summarize(&input);
    assert_close(offline.cpu.used, 0.0);
    assert_close(offline.power.used, 0.0);
}

#[test]
fn rigs_use_calibration() {
    let summary = summarize(&busy_fit());
    assert_eq!(summary.calibration, Usage::new(50.0, 400.0));
}

#[test]
fn drones_use_bandwidth_and_bay() {
    let summary = summarize(&busy_fit());
    // Two active hobgoblins use the whole bandwidth without exceeding it.
    assert_eq!(summary.drone_bandwidth, Usage::new(50.0, 50.0));
    assert!(!summary.drone_bandwidth.is_exceeded());
    assert_eq!(summary.drone_capacity, Usage::new(10.0, 50.0));
    // Drones III allows three.
    assert_eq!(summary.active_drones, Usage::new(2.0, 3.0));
}

#[test]
fn active_drones_without_the_skill_exceed_zero() {
    let mut input = SimulationInput::new(SHIP_RIFTER);
    input.drones.push(DroneInput {
        type_id: DRONE_HOBGOBLIN,
        quantity: 3,
        active_count: 1,
        mutation: None,
    });
    let summary = summarize(&input);
    assert_eq!(summary.active_drones, Usage::new(1.0, 0.0));
    assert!(summary.active_drones.is_exceeded());
    assert_close(summary.drone_bandwidth.used, 25.0);
    assert_close(summary.drone_capacity.used, 15.0);
}

#[test]
fn subsystems_provide_slots_and_launchers() {
    let mut input = SimulationInput::new(SHIP_TENGU);
    input.modules.push(module(
        SUBSYSTEM_LAUNCHER,
        SlotFlag::new(SlotKind::Subsystem, 0),
        ModuleStatus::Online,
    ));
    input
        .modules
        .push(module(MODULE_PROBE_LAUNCHER, hi(0), ModuleStatus::Online));

    let content = base_content();
    let output = calculate_and_generate_output(&input, &content);
    let summary = FittingSummary::compute(&input, &output, &content);

    assert_eq!(summary.slots.hi, Usage::new(1.0, 5.0));
    assert_eq!(summary.slots.med, Usage::new(0.0, 1.0));
    assert_eq!(summary.slots.low, Usage::new(0.0, 0.0));
    assert_eq!(summary.slots.subsystem, Usage::new(1.0, 4.0));
    assert_eq!(summary.launcher_hardpoints, Usage::new(1.0, 5.0));
    assert_eq!(
        summary.free_hardpoints(MODULE_PROBE_LAUNCHER, &content),
        Some(4.0)
    );
}

#[test]
fn fighters_count_by_squadron_size_in_tubes() {
    let mut input = SimulationInput::new(SHIP_THANATOS);
    for (type_id, tube_id) in [
        (FIGHTER_LIGHT, Some(0)),
        (FIGHTER_SUPPORT, Some(1)),
        (FIGHTER_HEAVY, None),
    ] {
        input.fighters.push(FighterInput {
            type_id,
            quantity: 9,
            tube_id,
        });
    }

    let fighters = summarize(&input).fighters;
    assert_eq!(fighters.tubes, Usage::new(2.0, 3.0));
    assert_eq!(fighters.light, Usage::new(1.0, 3.0));
    assert_eq!(fighters.support, Usage::new(1.0, 1.0));
    // The heavy squadron waits in the bay and takes no tube.
    assert_eq!(fighters.heavy, Usage::new(0.0, 0.0));
}

#[test]
fn free_hardpoints_by_module_kind() {
    let content = base_content();
    let summary = summarize(&fit_with_autocannon());
    assert_eq!(summary.free_hardpoints(MODULE_AUTOCANNON, &content), Some(2.0));
    assert_eq!(
        summary.free_hardpoints(MODULE_PROBE_LAUNCHER, &content),
        Some(2.0)
    );
    assert_eq!(summary.free_hardpoints(MODULE_GYROSTABILIZER, &content), None);
    assert_eq!(summary.free_hardpoints(TypeId(999_999), &content), None);
}

#[test]
fn summary_of_an_edited_input_falls_back_to_static_costs() {
    let content = base_content();
    let input = fit_with_autocannon();
    let output = calculate_and_generate_output(&input, &content);

    let mut edited = input.clone();
    edited
        .modules
        .push(module(MODULE_GYROSTABILIZER, low(0), ModuleStatus::Online));
    let summary = FittingSummary::compute(&edited, &output, &content);
    assert_close(summary.cpu.used, 8.0 + 30.0);
}
