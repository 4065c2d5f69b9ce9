use super::*;

fn three_hardeners() -> SimulationInput {
    let mut input = SimulationInput::new(SHIP_RIFTER);
    for index in 0..3 {
        let mut hardener = module(MODULE_SHIELD_HARDENER, med(index), ModuleStatus::Online);
        hardener.state_stamp = u64::from(index);
        input.modules.push(hardener);
    }
    input.next_stamp = 3;
    input
}

fn count_at_least(input: &SimulationInput, status: ModuleStatus) -> usize {
    input
        .modules
        .iter()
        .filter(|module| module.status >= status)
        .count()
}

#[test]
fn third_active_module_demotes_exactly_one() {
    let content = base_content();
    let mut input = three_hardeners();
    input = set_module_status(&input, med(0), ModuleStatus::Active, &content, None);
    input = set_module_status(&input, med(1), ModuleStatus::Active, &content, None);
    assert_eq!(count_at_least(&input, ModuleStatus::Active), 2);

    let next = set_module_status(&input, med(2), ModuleStatus::Active, &content, None);

    assert_eq!(count_at_least(&next, ModuleStatus::Active), 2);
    // The newly requested module wins; the oldest active one steps down.
    assert_eq!(next.module(med(2)).unwrap().status, ModuleStatus::Active);
    assert_eq!(next.module(med(0)).unwrap().status, ModuleStatus::Online);
    assert_eq!(next.module(med(1)).unwrap().status, ModuleStatus::Active);
}

#[test]
fn status_is_clamped_to_what_effects_allow() {
    let content = base_content();
    let mut input = SimulationInput::new(SHIP_RIFTER);
    input
        .modules
        .push(module(MODULE_GYROSTABILIZER, low(0), ModuleStatus::Offline));

    let next = set_module_status(&input, low(0), ModuleStatus::Overloaded, &content, None);
    assert_eq!(next.module(low(0)).unwrap().status, ModuleStatus::Online);
}

#[test]
fn status_change_stamps_the_module() {
    let content = base_content();
    let input = three_hardeners();
    let next = set_module_status(&input, med(0), ModuleStatus::Active, &content, None);
    assert_eq!(next.module(med(0)).unwrap().state_stamp, 3);
    assert_eq!(next.next_stamp, 4);
}

#[test]
fn online_limit_takes_oldest_module_offline() {
    let content = base_content();
    let mut input = SimulationInput::new(SHIP_RIFTER);
    input
        .modules
        .push(module(MODULE_ENTOSIS_LINK, hi(0), ModuleStatus::Offline));
    input
        .modules
        .push(module(MODULE_ENTOSIS_LINK, hi(1), ModuleStatus::Offline));

    let input = set_module_status(&input, hi(0), ModuleStatus::Online, &content, None);
    let next = set_module_status(&input, hi(1), ModuleStatus::Active, &content, None);

    assert_eq!(next.module(hi(0)).unwrap().status, ModuleStatus::Offline);
    assert_eq!(next.module(hi(1)).unwrap().status, ModuleStatus::Active);
}

#[test]
fn batch_changes_cascade_once() {
    let content = base_content();
    let input = three_hardeners();
    let next = set_modules_status(
        &input,
        &[
            (med(0), ModuleStatus::Active),
            (med(1), ModuleStatus::Active),
            (med(2), ModuleStatus::Active),
        ],
        &content,
        None,
    );

    // All three were requested together; the oldest requested one yields.
    assert_eq!(count_at_least(&next, ModuleStatus::Active), 2);
    assert_eq!(next.module(med(0)).unwrap().status, ModuleStatus::Online);
}

#[test]
fn calculated_limit_overrides_static_data() {
    let content = base_content();
    let mut input = three_hardeners();
    input.modules[0].status = ModuleStatus::Active;
    input.modules[1].status = ModuleStatus::Active;

    // A previous calculation that raised the limit to three.
    let mut previous = calculate(&input);
    for module in &mut previous.modules {
        module
            .item
            .attributes
            .set(Attr::MaxGroupActive.id(), 3.0);
    }

    let next = set_module_status(
        &input,
        med(2),
        ModuleStatus::Active,
        &content,
        Some(&previous),
    );
    assert_eq!(count_at_least(&next, ModuleStatus::Active), 3);
}

/// Fixture content where the mutated autocannon allows two active per group.
fn content_with_mutated_gun_limit() -> GameContent {
    let mut content = base_content();
    let mut def = content.item_type(MUTATED_AUTOCANNON).unwrap().clone();
    def.attributes.insert(Attr::MaxGroupActive.id(), 2.0);
    content.insert_type(def);
    content
}

fn three_mutated_guns(rolled: &[(AttributeId, f64)]) -> SimulationInput {
    let mut input = SimulationInput::new(SHIP_RIFTER);
    for index in 0..3 {
        let mut gun = module(MODULE_AUTOCANNON, hi(index), ModuleStatus::Online);
        gun.mutation = Some(Mutation {
            mutaplasmid_id: MUTAPLASMID_GUN,
            attributes: rolled.iter().copied().collect(),
        });
        gun.state_stamp = u64::from(index);
        input.modules.push(gun);
    }
    input.next_stamp = 3;
    input
}

#[test]
fn mutated_modules_use_the_result_type_limit() {
    let content = content_with_mutated_gun_limit();
    let mut input = three_mutated_guns(&[]);
    for index in 0..3 {
        input = set_module_status(&input, hi(index), ModuleStatus::Active, &content, None);
    }
    assert_eq!(count_at_least(&input, ModuleStatus::Active), 2);
    assert_eq!(input.module(hi(0)).unwrap().status, ModuleStatus::Online);
}

#[test]
fn mutated_modules_use_calculated_limit() {
    let content = content_with_mutated_gun_limit();
    let mut input = three_mutated_guns(&[]);
    input.modules[0].status = ModuleStatus::Active;
    input.modules[1].status = ModuleStatus::Active;

    let mut previous = calculate_and_generate_output(&input, &content);
    for module in &mut previous.modules {
        assert_eq!(module.item.type_id, MUTATED_AUTOCANNON);
        module
            .item
            .attributes
            .set(Attr::MaxGroupActive.id(), 3.0);
    }

    let next = set_module_status(
        &input,
        hi(2),
        ModuleStatus::Active,
        &content,
        Some(&previous),
    );
    assert_eq!(count_at_least(&next, ModuleStatus::Active), 3);
}

#[test]
fn rolled_limit_overrides_the_result_type() {
    let content = content_with_mutated_gun_limit();
    let mut input = three_mutated_guns(&[(Attr::MaxGroupActive.id(), 1.0)]);
    input = set_module_status(&input, hi(0), ModuleStatus::Active, &content, None);
    input = set_module_status(&input, hi(1), ModuleStatus::Active, &content, None);

    assert_eq!(count_at_least(&input, ModuleStatus::Active), 1);
    assert_eq!(input.module(hi(1)).unwrap().status, ModuleStatus::Active);
}

#[test]
fn empty_flag_is_ignored() {
    let content = base_content();
    let input = three_hardeners();
    let next = set_module_status(&input, med(7), ModuleStatus::Active, &content, None);
    assert_eq!(next, input);
}
