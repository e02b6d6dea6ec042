use super::*;

/// Player 0 at (0,0) with an asteroid in launch-bay range at (2,0).
fn state_with_nearby_asteroid(rules: &Rules) -> GameState {
    let mut state = open_state(rules);
    state
        .asteroids
        .push(asteroid(1, Cell::new(2, 0), AsteroidKind::Hematite, 500.0, 1.0));
    state
}

#[test]
fn test_remote_plant_deploys_with_frozen_capacity() {
    let rules = test_rules();
    let mut state = state_with_nearby_asteroid(&rules);

    let outcome = remote_plant_robot(&mut state, &rules, Cell::new(2, 0)).unwrap();
    assert!(!outcome.ends_turn, "planting does not consume the turn");
    assert_close(state.players[0].money, 400.0, "fixed cost of 100 debited");

    let robot = state.asteroids[0].robot.unwrap();
    assert_eq!(robot.owner, PlayerId(0));
    assert_close(robot.capacity, 10.0, "capacity copied from the factory");

    // Upgrading the factory afterwards must not touch the deployed robot.
    state.players[0].modules.factory.as_mut().unwrap().robot_capacity = 50.0;
    assert_close(
        state.asteroids[0].robot.unwrap().capacity,
        10.0,
        "deployed capacity is frozen",
    );
}

#[test]
fn test_remote_plant_rejects_occupied_asteroid() {
    let rules = test_rules();
    let mut state = state_with_nearby_asteroid(&rules);
    state.asteroids[0].robot = Some(RobotState {
        owner: PlayerId(1),
        capacity: 10.0,
    });
    let money = state.players[0].money;

    let err = remote_plant_robot(&mut state, &rules, Cell::new(2, 0)).unwrap_err();
    assert_eq!(err, ActionError::RobotAlreadyPresent(AsteroidId(1)));
    assert_close(state.players[0].money, money, "no charge on failure");
    assert_eq!(state.asteroids[0].robot.unwrap().owner, PlayerId(1));
}

#[test]
fn test_remote_plant_enforces_quota_per_turn() {
    let rules = test_rules();
    let mut state = state_with_nearby_asteroid(&rules);
    state
        .asteroids
        .push(asteroid(2, Cell::new(0, 2), AsteroidKind::Hematite, 500.0, 1.0));

    remote_plant_robot(&mut state, &rules, Cell::new(2, 0)).unwrap();
    let err = remote_plant_robot(&mut state, &rules, Cell::new(0, 2)).unwrap_err();
    assert_eq!(err, ActionError::QuotaExceeded);

    // The quota resets with the turn.
    next_turn(&mut state);
    next_turn(&mut state);
    assert_eq!(state.active_player, 0);
    remote_plant_robot(&mut state, &rules, Cell::new(0, 2)).unwrap();
}

#[test]
fn test_remote_plant_range_funds_and_visibility_checks() {
    let rules = test_rules();
    let mut state = state_with_nearby_asteroid(&rules);

    // Out of launch-bay range (range 3, target at distance 9).
    state
        .asteroids
        .push(asteroid(2, Cell::new(9, 0), AsteroidKind::Hematite, 500.0, 1.0));
    let err = remote_plant_robot(&mut state, &rules, Cell::new(9, 0)).unwrap_err();
    assert_eq!(err, ActionError::OutOfRange(Cell::new(9, 0)));

    // Undiscovered target.
    state.discovered.remove(&Cell::new(2, 0));
    let err = remote_plant_robot(&mut state, &rules, Cell::new(2, 0)).unwrap_err();
    assert_eq!(err, ActionError::Undiscovered(Cell::new(2, 0)));
    state.discovered.insert(Cell::new(2, 0));

    // Exhausted asteroid.
    state.asteroids[0].resource = 0.0;
    let err = remote_plant_robot(&mut state, &rules, Cell::new(2, 0)).unwrap_err();
    assert_eq!(err, ActionError::Exhausted(AsteroidId(1)));
    state.asteroids[0].resource = 500.0;

    // Broke player.
    state.players[0].money = 50.0;
    let err = remote_plant_robot(&mut state, &rules, Cell::new(2, 0)).unwrap_err();
    assert!(matches!(err, ActionError::InsufficientFunds { .. }));
    assert!(state.asteroids[0].robot.is_none(), "all failures leave the rock empty");
    assert_eq!(
        state.players[0].modules.factory.as_ref().unwrap().robots_produced_this_turn,
        0,
        "quota untouched by failures"
    );
}

#[test]
fn test_remote_plant_targets_query_matches_preconditions() {
    let rules = test_rules();
    let mut state = state_with_nearby_asteroid(&rules);
    // One occupied, one exhausted, one out of range.
    state
        .asteroids
        .push(asteroid(2, Cell::new(0, 2), AsteroidKind::Ice, 500.0, 1.0));
    state.asteroids[1].robot = Some(RobotState {
        owner: PlayerId(0),
        capacity: 10.0,
    });
    state
        .asteroids
        .push(asteroid(3, Cell::new(1, 1), AsteroidKind::Ice, 0.0, 1.0));
    state
        .asteroids
        .push(asteroid(4, Cell::new(9, 0), AsteroidKind::Ice, 500.0, 1.0));

    let targets = remote_plant_targets(&state, &rules);
    assert_eq!(targets.len(), 1);
    assert!(targets.contains(&Cell::new(2, 0)));

    state.players[0].modules.launch_bay = None;
    assert!(
        remote_plant_targets(&state, &rules).is_empty(),
        "no launch bay means no targets at all"
    );
}

#[test]
fn test_hijack_transfers_ownership_and_resets_capacity() {
    let rules = test_rules();
    let mut state = state_with_nearby_asteroid(&rules);
    state.asteroids[0].robot = Some(RobotState {
        owner: PlayerId(1),
        capacity: 25.0,
    });
    state.players[0].pos = Cell::new(2, 0);
    let money = state.players[0].money;

    let outcome = hijack_robot(&mut state, &rules).unwrap();
    assert!(outcome.ends_turn, "hijack consumes the turn");
    assert_close(state.players[0].money, money, "hijacking is free");

    let robot = state.asteroids[0].robot.unwrap();
    assert_eq!(robot.owner, PlayerId(0));
    assert_close(robot.capacity, 10.0, "capacity resets to the hijacker's factory");
}

#[test]
fn test_hijack_rejects_own_robot_and_empty_rock() {
    let rules = test_rules();
    let mut state = state_with_nearby_asteroid(&rules);
    state.players[0].pos = Cell::new(2, 0);

    assert_eq!(
        hijack_robot(&mut state, &rules).unwrap_err(),
        ActionError::NoRobot(AsteroidId(1))
    );

    state.asteroids[0].robot = Some(RobotState {
        owner: PlayerId(0),
        capacity: 10.0,
    });
    assert_eq!(
        hijack_robot(&mut state, &rules).unwrap_err(),
        ActionError::RobotAlreadyOwned(AsteroidId(1))
    );

    state.players[0].pos = Cell::new(0, 0);
    assert_eq!(hijack_robot(&mut state, &rules).unwrap_err(), ActionError::NotOnAsteroid);
}

#[test]
fn test_hijack_cost_variant_charges_the_hijacker() {
    let mut rules = test_rules();
    rules.variants.hijack_cost = 150.0;
    rules.variants.hijack_ends_turn = false;
    let mut state = state_with_nearby_asteroid(&rules);
    state.asteroids[0].robot = Some(RobotState {
        owner: PlayerId(1),
        capacity: 25.0,
    });
    state.players[0].pos = Cell::new(2, 0);

    let outcome = hijack_robot(&mut state, &rules).unwrap();
    assert!(!outcome.ends_turn);
    assert_close(state.players[0].money, 350.0, "variant cost debited");
}

#[test]
fn test_upgrade_all_robots_raises_only_eligible_ones() {
    let rules = test_rules();
    let mut state = state_with_nearby_asteroid(&rules);
    // In range, below capacity — upgraded.
    state.asteroids[0].robot = Some(RobotState {
        owner: PlayerId(0),
        capacity: 5.0,
    });
    // Out of range — untouched.
    state
        .asteroids
        .push(asteroid(2, Cell::new(9, 0), AsteroidKind::Ice, 500.0, 1.0));
    state.asteroids[1].robot = Some(RobotState {
        owner: PlayerId(0),
        capacity: 5.0,
    });
    // In range but someone else's — untouched.
    state
        .asteroids
        .push(asteroid(3, Cell::new(0, 2), AsteroidKind::Ice, 500.0, 1.0));
    state.asteroids[2].robot = Some(RobotState {
        owner: PlayerId(1),
        capacity: 5.0,
    });

    let outcome = upgrade_all_robots(&mut state).unwrap();
    assert!(!outcome.ends_turn, "upgrading robots is a free action");
    assert_eq!(outcome.upgraded, 1);
    assert_close(state.asteroids[0].robot.unwrap().capacity, 10.0, "raised to factory capacity");
    assert_close(state.asteroids[1].robot.unwrap().capacity, 5.0, "out of range untouched");
    assert_close(state.asteroids[2].robot.unwrap().capacity, 5.0, "foreign robot untouched");
    assert_eq!(
        outcome.messages.last().map(String::as_str),
        Some("All eligible robots have been upgraded.")
    );
}

#[test]
fn test_upgrade_all_robots_requires_both_modules() {
    let rules = test_rules();
    let mut state = open_state(&rules);
    state.players[0].modules.factory = None;
    assert_eq!(
        upgrade_all_robots(&mut state).unwrap_err(),
        ActionError::MissingModule(ModuleKind::Factory)
    );
}

#[test]
fn test_robot_mining_pays_owner_in_asteroid_id_order() {
    let rules = test_rules();
    let mut state = open_state(&rules);
    state
        .asteroids
        .push(asteroid(1, Cell::new(2, 0), AsteroidKind::Ice, 500.0, 2.0));
    state
        .asteroids
        .push(asteroid(2, Cell::new(0, 2), AsteroidKind::Ice, 4.0, 1.0));
    state.asteroids[0].robot = Some(RobotState {
        owner: PlayerId(0),
        capacity: 10.0,
    });
    state.asteroids[1].robot = Some(RobotState {
        owner: PlayerId(1),
        capacity: 10.0,
    });
    let money_before = state.players[0].money;

    let entries = robot_mining(&mut state);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].asteroid, AsteroidId(1), "ascending id order");
    assert_eq!(entries[1].asteroid, AsteroidId(2));

    assert_close(entries[0].extracted, 10.0, "full capacity");
    assert_close(entries[1].extracted, 4.0, "clamped to remaining resource");
    assert_close(state.players[0].money - money_before, 20.0, "10 × value 2.0");
    assert_close(state.players[0].robot_earnings_this_turn, 20.0, "per-turn counter");
    assert_close(state.players[0].total_mined, 10.0, "owner total mined");
    assert!(state.asteroids[1].is_exhausted());
}

#[test]
fn test_robot_mining_skips_exhausted_asteroids() {
    let rules = test_rules();
    let mut state = open_state(&rules);
    state
        .asteroids
        .push(asteroid(1, Cell::new(2, 0), AsteroidKind::Ice, 0.0, 1.0));
    state.asteroids[0].robot = Some(RobotState {
        owner: PlayerId(0),
        capacity: 10.0,
    });

    let entries = robot_mining(&mut state);
    assert!(entries.is_empty(), "a dead rock pays nobody");
    assert_close(state.asteroids[0].resource, 0.0, "still zero, never negative");
}
