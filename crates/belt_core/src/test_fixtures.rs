//! Shared test fixtures for `belt_core` and downstream crates.
//!
//! `base_rules()` is a compressed, fully deterministic rule set: small
//! grid, two players, fixed spawn ranges. `base_state()` is the matching
//! fresh state with no asteroids — tests add exactly what they need.

use ahash::AHashSet;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::types::{
    AddonConfig, AsteroidId, AsteroidKind, AsteroidKindDef, AsteroidState, CapacityModuleConfig,
    Cell, GameState, MetaState, PlayerId, PlayerState, RangeModuleConfig, Rules, SpawnTable,
    VariantRules,
};

pub fn base_rules() -> Rules {
    Rules {
        grid_width: 10,
        grid_height: 10,
        num_players: 2,
        initial_money: 500.0,
        player_colors: vec!["#FF7F50".to_string(), "#00FA9A".to_string()],
        min_asteroids: 0,
        max_asteroids: 0,
        spawn: SpawnTable {
            // Fixed ranges so generated asteroids are deterministic.
            ice: AsteroidKindDef {
                resource_range: (1000, 1000),
                value_range: (1.0, 1.0),
                event_probability_override: None,
            },
            hematite: AsteroidKindDef {
                resource_range: (800, 800),
                value_range: (1.0, 1.0),
                event_probability_override: None,
            },
            malachite: AsteroidKindDef {
                resource_range: (600, 600),
                value_range: (2.0, 2.0),
                event_probability_override: None,
            },
            sperrylite: AsteroidKindDef {
                resource_range: (100, 100),
                value_range: (5.0, 5.0),
                event_probability_override: Some(0.0),
            },
        },
        drill: CapacityModuleConfig {
            initial: 100.0,
            build_cost: 1000.0,
            upgrade_cost: 200.0,
            upgrade_increment: 10.0,
            cost_increase: 10.0,
        },
        telescope: RangeModuleConfig {
            initial: 2,
            build_cost: 1000.0,
            upgrade_cost: 150.0,
            upgrade_increment: 1,
            cost_increase: 20.0,
        },
        reactor: RangeModuleConfig {
            initial: 2,
            build_cost: 1000.0,
            upgrade_cost: 150.0,
            upgrade_increment: 1,
            cost_increase: 20.0,
        },
        // Non-zero out of the box so robot tests reach nearby rocks.
        launch_bay: RangeModuleConfig {
            initial: 3,
            build_cost: 1000.0,
            upgrade_cost: 200.0,
            upgrade_increment: 1,
            cost_increase: 50.0,
        },
        factory: CapacityModuleConfig {
            initial: 10.0,
            build_cost: 1000.0,
            upgrade_cost: 200.0,
            upgrade_increment: 5.0,
            cost_increase: 50.0,
        },
        ice_penetrator: AddonConfig {
            build_cost: 1000.0,
            upgrade_cost: 500.0,
        },
        fusion_reactor: AddonConfig {
            build_cost: 800.0,
            upgrade_cost: 600.0,
        },
        explosives_lab: AddonConfig {
            build_cost: 1000.0,
            upgrade_cost: 500.0,
        },
        warp_drive: AddonConfig {
            build_cost: 2000.0,
            upgrade_cost: 4000.0,
        },
        robot_cost: 100.0,
        debris_cost: 200.0,
        debris_reach_bonus: 3,
        module_slot_cap: 8,
        turn_timer_secs: 30,
        variants: VariantRules::default(),
    }
}

/// Two players at opposite corners, no asteroids, nothing discovered.
pub fn base_state(rules: &Rules) -> GameState {
    GameState {
        meta: MetaState {
            turn: 1,
            seed: 42,
            schema_version: 1,
        },
        players: vec![
            PlayerState::new(PlayerId(0), Cell::new(0, 0), rules),
            PlayerState::new(PlayerId(1), Cell::new(9, 9), rules),
        ],
        asteroids: Vec::new(),
        discovered: AHashSet::new(),
        debris: AHashSet::new(),
        active_player: 0,
    }
}

/// Mark the whole grid discovered — most action tests don't exercise fog.
pub fn discover_all(state: &mut GameState, rules: &Rules) {
    for x in 0..rules.grid_width {
        for y in 0..rules.grid_height {
            state.discovered.insert(Cell::new(x, y));
        }
    }
}

pub fn asteroid(id: u32, pos: Cell, kind: AsteroidKind, resource: f32, value: f32) -> AsteroidState {
    AsteroidState {
        id: AsteroidId(id),
        pos,
        kind,
        resource,
        initial_resource: resource,
        value,
        robot: None,
        visited: false,
    }
}

/// Deterministic RNG seeded with 42.
pub fn make_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}
