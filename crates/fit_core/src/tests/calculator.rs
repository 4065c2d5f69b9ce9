use super::*;

#[test]
fn simple_install_keeps_base_capacity() {
    let mut input = SimulationInput::new(SHIP_RIFTER);
    input
        .modules
        .push(module(MODULE_PROBE_LAUNCHER, hi(0), ModuleStatus::Online));

    let output = calculate(&input);

    assert_close(output.ship.item.attributes.named(Attr::Capacity), 0.0);
    assert_close(module_attr(&output, hi(0), Attr::Capacity.id()), 50.0);
}

#[test]
fn charge_quantity_is_capacity_over_volume() {
    let output = calculate(&fit_with_autocannon());
    let gun = output.module(hi(0)).unwrap();
    assert_eq!(gun.charge_quantity, 20);
    assert_eq!(gun.charge.as_ref().unwrap().type_id, CHARGE_EMP_S);
}

#[test]
fn charge_multiplies_its_modules_range() {
    let output = calculate(&fit_with_autocannon());
    assert_close(module_attr(&output, hi(0), ATTR_MAX_RANGE), 500.0);
}

#[test]
fn online_gyro_boosts_gun_damage() {
    let mut input = fit_with_autocannon();
    input
        .modules
        .push(module(MODULE_GYROSTABILIZER, low(0), ModuleStatus::Online));

    let output = calculate(&input);
    assert_close(module_attr(&output, hi(0), ATTR_DAMAGE_MULTIPLIER), 2.2);
}

#[test]
fn offline_gyro_contributes_nothing() {
    let mut input = fit_with_autocannon();
    input
        .modules
        .push(module(MODULE_GYROSTABILIZER, low(0), ModuleStatus::Offline));

    let output = calculate(&input);
    assert_close(module_attr(&output, hi(0), ATTR_DAMAGE_MULTIPLIER), 2.0);
}

#[test]
fn second_gyro_is_stacking_penalized() {
    let mut input = fit_with_autocannon();
    for index in 0..2 {
        input
            .modules
            .push(module(MODULE_GYROSTABILIZER, low(index), ModuleStatus::Online));
    }

    let output = calculate(&input);
    let expected = 2.0 * 1.1 * (1.0 + 0.1 * penalty_weight(2));
    assert_close(module_attr(&output, hi(0), ATTR_DAMAGE_MULTIPLIER), expected);
}

#[test]
fn three_bonuses_follow_the_penalty_curve() {
    let modifiers = [
        AppliedModifier::penalized(Operation::PostPercent, 10.0),
        AppliedModifier::penalized(Operation::PostPercent, 5.0),
        AppliedModifier::penalized(Operation::PostPercent, 2.0),
    ];
    assert_close(aggregate(1.0, &modifiers), 1.160_899_923_833_060_6);
}

#[test]
fn active_hardeners_penalize_each_other() {
    let mut input = SimulationInput::new(SHIP_RIFTER);
    for index in 0..2 {
        input
            .modules
            .push(module(MODULE_SHIELD_HARDENER, med(index), ModuleStatus::Active));
    }

    let output = calculate(&input);
    let expected = 0.7 * (1.0 - 0.3 * penalty_weight(2));
    assert_close(
        output.ship.item.attributes.value(ATTR_SHIELD_EM_RESONANCE),
        expected,
    );
}

#[test]
fn overload_bonus_needs_overloaded_status() {
    let mut input = fit_with_autocannon();
    assert_close(module_attr(&calculate(&input), hi(0), ATTR_SPEED), 2_500.0);

    input.modules[0].status = ModuleStatus::Overloaded;
    assert_close(module_attr(&calculate(&input), hi(0), ATTR_SPEED), 2_125.0);
}

#[test]
fn skill_bonus_scales_with_level() {
    let mut input = fit_with_autocannon();
    input.skills.insert(SKILL_SMALL_PROJECTILE, 5);

    let output = calculate(&input);
    assert_close(module_attr(&output, hi(0), ATTR_DAMAGE_MULTIPLIER), 2.5);

    let skill = &output.skills[0];
    assert_eq!(skill.level, 5);
    assert_close(skill.item.attributes.value(ATTR_DAMAGE_MULTIPLIER_BONUS), 25.0);
}

#[test]
fn skill_levels_above_five_are_capped() {
    let mut input = fit_with_autocannon();
    input.skills.insert(SKILL_SMALL_PROJECTILE, 9);

    let output = calculate(&input);
    assert_eq!(output.skills[0].level, MAX_SKILL_LEVEL);
    assert_close(module_attr(&output, hi(0), ATTR_DAMAGE_MULTIPLIER), 2.5);
}

#[test]
fn ship_skill_bonus_is_not_penalized() {
    let mut input = SimulationInput::new(SHIP_RIFTER);
    input.skills.insert(SKILL_CAPACITOR_MANAGEMENT, 4);

    let output = calculate(&input);
    assert_close(
        output.ship.item.attributes.value(ATTR_CAPACITOR_CAPACITY),
        250.0 * 1.2,
    );
}

#[test]
fn max_active_drones_defaults_to_zero() {
    let output = calculate(&SimulationInput::new(SHIP_RIFTER));
    assert_eq!(
        output
            .ship
            .character_attributes
            .get_named(Attr::MaxActiveDrones),
        None
    );
    assert_close(
        output
            .ship
            .character_attributes
            .named(Attr::MaxActiveDrones),
        0.0,
    );
}

#[test]
fn drone_skill_raises_max_active_drones() {
    let mut input = SimulationInput::new(SHIP_RIFTER);
    input.skills.insert(SKILL_DRONES, 5);

    let output = calculate(&input);
    assert_close(
        output
            .ship
            .character_attributes
            .named(Attr::MaxActiveDrones),
        5.0,
    );
}

#[test]
fn implant_and_environment_modify_the_ship() {
    let mut input = SimulationInput::new(SHIP_RIFTER);
    input.implants.push(ImplantInput {
        type_id: IMPLANT_NAVIGATION,
    });
    input.environment.push(EnvironmentInput {
        type_id: ENVIRONMENT_PULSAR,
    });

    let output = calculate(&input);
    let ship = &output.ship.item.attributes;
    assert_close(ship.value(ATTR_MAX_VELOCITY), 355.0 * 1.05);
    assert_close(ship.value(ATTR_SHIELD_CAPACITY), 450.0 * 1.3);
    assert_eq!(output.implants.len(), 1);
    assert_eq!(output.environment.len(), 1);
}

#[test]
fn mutated_module_uses_rolled_attributes() {
    let mut input = fit_with_autocannon();
    input.modules[0].mutation = Some(Mutation {
        mutaplasmid_id: MUTAPLASMID_GUN,
        attributes: [(ATTR_DAMAGE_MULTIPLIER, 2.4)].into_iter().collect(),
    });

    let output = calculate(&input);
    let gun = output.module(hi(0)).unwrap();
    assert_eq!(gun.item.type_id, MUTATED_AUTOCANNON);
    assert_close(gun.item.attributes.value(ATTR_DAMAGE_MULTIPLIER), 2.4);
    // 1200 rolled range, halved by the loaded charge.
    assert_close(gun.item.attributes.value(ATTR_MAX_RANGE), 600.0);
}

#[test]
fn unknown_types_produce_empty_items() {
    let mut input = SimulationInput::new(TypeId(999_998));
    input
        .modules
        .push(module(TypeId(999_999), hi(0), ModuleStatus::Online));

    let output = calculate(&input);
    assert!(output.ship.item.attributes.is_empty());
    let unknown = output.module(hi(0)).unwrap();
    assert_eq!(unknown.item.type_id, TypeId(999_999));
    assert!(unknown.item.attributes.is_empty());
}

#[test]
fn calculation_is_idempotent() {
    let input = busy_fit();
    let content = base_content();
    let first = calculate_and_generate_output(&input, &content);
    let second = calculate_and_generate_output(&input, &content);
    assert_eq!(first, second);
}

#[test]
fn item_order_does_not_change_results() {
    let input = busy_fit();
    let baseline = calculate(&input);

    let mut rng = make_rng();
    for _ in 0..8 {
        let mut shuffled = input.clone();
        shuffled.modules.shuffle(&mut rng);
        shuffled.drones.shuffle(&mut rng);
        shuffled.implants.shuffle(&mut rng);
        let output = calculate(&shuffled);

        assert_eq!(output.ship, baseline.ship);
        for expected in &baseline.modules {
            let actual = output.module(expected.flag).unwrap();
            assert_eq!(actual, expected);
        }
    }
}

#[test]
fn cyclic_modifiers_fall_back_to_base_values() {
    let mut content = base_content();
    let cycle = EffectId(9_001);
    let info = |modified: AttributeId, modifying: AttributeId| ModifierInfo {
        domain: ModifierDomain::Item,
        func: ModifierFunc::Item,
        modified_attribute_id: modified,
        modifying_attribute_id: modifying,
        operation: Operation::ModAdd,
        group_id: None,
        skill_type_id: None,
    };
    content.insert_effect(EffectDef {
        effect_id: cycle,
        name: "cycle".to_string(),
        category: EffectCategory::Passive,
        is_default: false,
        is_offensive: false,
        is_assistance: false,
        modifier_info: vec![
            info(ATTR_MAX_RANGE, ATTR_SPEED),
            info(ATTR_SPEED, ATTR_MAX_RANGE),
        ],
        target_type_name: None,
        target_group_id: None,
    });
    let mut def = content.item_type(MODULE_PROBE_LAUNCHER).unwrap().clone();
    def.attributes.insert(ATTR_MAX_RANGE, 10.0);
    def.attributes.insert(ATTR_SPEED, 1.0);
    def.effects.push(cycle);
    content.insert_type(def);

    let mut input = SimulationInput::new(SHIP_RIFTER);
    input
        .modules
        .push(module(MODULE_PROBE_LAUNCHER, hi(0), ModuleStatus::Online));

    // Terminates and yields finite values.
    let output = calculate_and_generate_output(&input, &content);
    let launcher = &output.module(hi(0)).unwrap().item.attributes;
    assert!(launcher.value(ATTR_MAX_RANGE).is_finite());
    assert!(launcher.value(ATTR_SPEED).is_finite());
}

#[test]
fn cycles_across_items_resolve_the_same_in_any_order() {
    let mut content = base_content();
    let location_add = |effect_id: EffectId, modified: AttributeId, modifying: AttributeId| {
        EffectDef {
            effect_id,
            name: format!("loop{effect_id}"),
            category: EffectCategory::Passive,
            is_default: false,
            is_offensive: false,
            is_assistance: false,
            modifier_info: vec![ModifierInfo {
                domain: ModifierDomain::Ship,
                func: ModifierFunc::Location,
                modified_attribute_id: modified,
                modifying_attribute_id: modifying,
                operation: Operation::ModAdd,
                group_id: None,
                skill_type_id: None,
            }],
            target_type_name: None,
            target_group_id: None,
        }
    };
    content.insert_effect(location_add(EffectId(9_002), ATTR_SPEED, ATTR_MAX_RANGE));
    content.insert_effect(location_add(EffectId(9_003), ATTR_MAX_RANGE, ATTR_SPEED));

    let launcher = content.item_type(MODULE_PROBE_LAUNCHER).unwrap().clone();
    for (type_id, effect_id, range, speed) in [
        (TypeId(900_001), EffectId(9_002), 10.0, 1.0),
        (TypeId(900_002), EffectId(9_003), 20.0, 2.0),
    ] {
        let mut def = launcher.clone();
        def.type_id = type_id;
        def.attributes.insert(ATTR_MAX_RANGE, range);
        def.attributes.insert(ATTR_SPEED, speed);
        def.effects.push(effect_id);
        content.insert_type(def);
    }

    let mut forward = SimulationInput::new(SHIP_RIFTER);
    forward
        .modules
        .push(module(TypeId(900_001), hi(0), ModuleStatus::Online));
    forward
        .modules
        .push(module(TypeId(900_002), hi(1), ModuleStatus::Online));
    let mut reversed = forward.clone();
    reversed.modules.reverse();

    let a = calculate_and_generate_output(&forward, &content);
    let b = calculate_and_generate_output(&reversed, &content);
    for flag in [hi(0), hi(1)] {
        assert_eq!(
            a.module(flag).unwrap().item.attributes,
            b.module(flag).unwrap().item.attributes,
            "{flag}"
        );
    }
    assert!(module_attr(&a, hi(0), ATTR_MAX_RANGE).is_finite());
}
