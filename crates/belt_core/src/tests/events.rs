use super::*;
use crate::events::roll_discovery_event;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Player 0 parked on a robot-free asteroid, full base module set.
fn event_state(rules: &Rules) -> GameState {
    let mut state = open_state(rules);
    state
        .asteroids
        .push(asteroid(1, Cell::new(5, 5), AsteroidKind::Ice, 1000.0, 1.0));
    state.players[0].pos = Cell::new(5, 5);
    state
}

#[test]
fn test_event_roll_is_deterministic_for_a_seed() {
    let rules = test_rules();
    let state_a = event_state(&rules);
    let mut state_b = state_a.clone();
    let mut state_a = state_a;

    let mut rng_a = ChaCha8Rng::seed_from_u64(7);
    let mut rng_b = ChaCha8Rng::seed_from_u64(7);
    let msg_a = roll_discovery_event(&mut state_a, 0, 0, &mut rng_a);
    let msg_b = roll_discovery_event(&mut state_b, 0, 0, &mut rng_b);

    assert_eq!(msg_a, msg_b, "same seed, same outcome message");
    assert_eq!(state_a, state_b, "same seed, same state mutation");
}

#[test]
fn test_event_roll_invariants_hold_across_seeds() {
    let rules = test_rules();
    for seed in 0..100 {
        let mut state = event_state(&rules);
        let money_before = state.players[0].money;
        let drill_before = state.players[0].modules.drill.as_ref().unwrap().mining_capacity;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let message = roll_discovery_event(&mut state, 0, 0, &mut rng);
        assert!(!message.is_empty());

        // Money only moves via the bonus event, and only inside [100, 500].
        let delta = state.players[0].money - money_before;
        assert!(
            delta.abs() < 1e-3 || (100.0..=500.0).contains(&delta),
            "seed {seed}: unexpected money delta {delta}"
        );
        // Boosts never shrink a capability.
        assert!(
            state.players[0].modules.drill.as_ref().unwrap().mining_capacity >= drill_before,
            "seed {seed}: drill capacity decreased"
        );
        // A free robot belongs to the visitor at current factory capacity.
        if let Some(robot) = state.asteroids[0].robot {
            assert_eq!(robot.owner, PlayerId(0), "seed {seed}");
            assert_close(robot.capacity, 10.0, "free robot capacity");
        }
    }
}

#[test]
fn test_event_roll_without_modules_reports_no_effect() {
    let rules = test_rules();
    for seed in 0..30 {
        let mut state = event_state(&rules);
        state.players[0].modules = ModuleSet::default();
        let money_before = state.players[0].money;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let message = roll_discovery_event(&mut state, 0, 0, &mut rng);
        assert!(!message.is_empty(), "module-less rolls still report something");
        assert!(
            state.asteroids[0].robot.is_none(),
            "seed {seed}: no factory, no free robot"
        );
        let delta = state.players[0].money - money_before;
        assert!(
            delta.abs() < 1e-3 || (100.0..=500.0).contains(&delta),
            "seed {seed}: only the money bonus may pay out"
        );
    }
}

#[test]
fn test_deployed_robot_is_never_altered_by_events() {
    let rules = test_rules();
    for seed in 0..30 {
        let mut state = event_state(&rules);
        let existing = RobotState {
            owner: PlayerId(1),
            capacity: 25.0,
        };
        state.asteroids[0].robot = Some(existing);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        roll_discovery_event(&mut state, 0, 0, &mut rng);
        assert_eq!(
            state.asteroids[0].robot,
            Some(existing),
            "seed {seed}: the free-robot event must not displace a live robot"
        );
    }
}

#[test]
fn test_first_visit_rolls_the_event_exactly_once() {
    let mut rules = test_rules();
    // Force the roll so the visited gate is the only variable.
    rules.spawn.ice.event_probability_override = Some(1.0);
    let mut state = open_state(&rules);
    state
        .asteroids
        .push(asteroid(1, Cell::new(2, 0), AsteroidKind::Ice, 1000.0, 1.0));
    let mut rng = make_rng();

    let outcome = move_player(&mut state, &rules, Cell::new(2, 0), &mut rng).unwrap();
    assert!(outcome.event.is_some(), "first arrival triggers at probability 1");
    assert!(state.asteroids[0].visited);

    move_player(&mut state, &rules, Cell::new(0, 0), &mut rng).unwrap();
    let outcome = move_player(&mut state, &rules, Cell::new(2, 0), &mut rng).unwrap();
    assert!(outcome.event.is_none(), "revisits never roll again");
}

#[test]
fn test_sperrylite_override_suppresses_events() {
    let rules = test_rules();
    for seed in 0..20 {
        let mut state = open_state(&rules);
        state
            .asteroids
            .push(asteroid(1, Cell::new(2, 0), AsteroidKind::Sperrylite, 200.0, 5.0));
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let outcome = move_player(&mut state, &rules, Cell::new(2, 0), &mut rng).unwrap();
        assert!(
            outcome.event.is_none(),
            "seed {seed}: a zero override never triggers"
        );
        assert!(state.asteroids[0].visited, "the visit still counts");
    }
}

#[test]
fn test_small_deposits_trigger_more_often_than_large() {
    let rules = test_rules();
    let tiny = asteroid(1, Cell::new(0, 0), AsteroidKind::Ice, 1.0, 1.0);
    let huge = asteroid(2, Cell::new(1, 0), AsteroidKind::Ice, 10_000.0, 1.0);
    assert!(tiny.event_probability(&rules) > huge.event_probability(&rules));
    assert!(tiny.event_probability(&rules) <= 1.0);
    assert!(huge.event_probability(&rules) > 0.0);
}
