use super::*;
use crate::test_fixtures::{asteroid, base_rules, base_state, discover_all, make_rng};

mod discovery;
mod events;
mod integration;
mod robots;
mod turns;

// --- Shared test helpers ------------------------------------------------

fn test_rules() -> Rules {
    base_rules()
}

/// Fresh two-player state with the whole grid visible.
fn open_state(rules: &Rules) -> GameState {
    let mut state = base_state(rules);
    discover_all(&mut state, rules);
    state
}

/// Player 0 standing on a fresh ice asteroid at (5,5), full visibility.
fn state_on_ice(rules: &Rules) -> GameState {
    let mut state = open_state(rules);
    state
        .asteroids
        .push(asteroid(1, Cell::new(5, 5), AsteroidKind::Ice, 1000.0, 1.0));
    state.players[0].pos = Cell::new(5, 5);
    state
}

fn assert_close(actual: f32, expected: f32, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "{what}: expected {expected}, got {actual}"
    );
}
