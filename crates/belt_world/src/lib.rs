//! Rule-set loading and world generation shared between drivers.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use belt_core::{
    update_discovered, AddonConfig, AsteroidId, AsteroidKind, AsteroidKindDef, AsteroidState,
    CapacityModuleConfig, Cell, GameState, MetaState, PlayerId, PlayerState, RangeModuleConfig,
    Rules, SpawnTable, VariantRules,
};
use rand::Rng;

/// The canonical rule set: a 16×16 grid, three players, and the spawn
/// table the game shipped with.
pub fn default_rules() -> Rules {
    Rules {
        grid_width: 16,
        grid_height: 16,
        num_players: 3,
        initial_money: 500.0,
        player_colors: vec![
            "#FF7F50".to_string(),
            "#00FA9A".to_string(),
            "#1E90FF".to_string(),
            "#FFD700".to_string(),
            "#FF69B4".to_string(),
            "#ADFF2F".to_string(),
        ],
        min_asteroids: 5,
        max_asteroids: 10,
        spawn: SpawnTable {
            ice: AsteroidKindDef {
                resource_range: (1000, 3000),
                value_range: (0.6, 1.0),
                event_probability_override: None,
            },
            hematite: AsteroidKindDef {
                resource_range: (800, 1800),
                value_range: (0.8, 2.0),
                event_probability_override: None,
            },
            malachite: AsteroidKindDef {
                resource_range: (600, 1200),
                value_range: (1.2, 3.0),
                event_probability_override: None,
            },
            // High value, small deposits, never triggers discovery events.
            sperrylite: AsteroidKindDef {
                resource_range: (100, 400),
                value_range: (5.0, 10.0),
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
        launch_bay: RangeModuleConfig {
            initial: 0,
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

/// Validates a rule set, panicking on any authoring error.
///
/// Catches mistakes like: an empty grid, a spawn range with min above
/// max, or more mandatory placements than cells.
pub fn validate_rules(rules: &Rules) {
    assert!(rules.grid_width > 0 && rules.grid_height > 0, "grid must be non-empty");
    assert!(rules.num_players >= 1, "at least one player required");
    assert!(!rules.player_colors.is_empty(), "player color palette is empty");
    assert!(
        rules.min_asteroids <= rules.max_asteroids,
        "min_asteroids {} exceeds max_asteroids {}",
        rules.min_asteroids,
        rules.max_asteroids,
    );
    let cells = (rules.grid_width as u64) * (rules.grid_height as u64);
    assert!(
        u64::from(rules.max_asteroids) + rules.num_players as u64 <= cells,
        "grid too small for {} asteroids and {} players",
        rules.max_asteroids,
        rules.num_players,
    );
    assert!(
        rules.module_slot_cap >= 5,
        "slot cap below the five starting modules"
    );
    for kind in AsteroidKind::ALL {
        let def = rules.spawn.get(kind);
        assert!(
            def.resource_range.0 <= def.resource_range.1,
            "{kind}: resource range min exceeds max"
        );
        assert!(
            def.value_range.0 <= def.value_range.1,
            "{kind}: value range min exceeds max"
        );
        if let Some(p) = def.event_probability_override {
            assert!((0.0..=1.0).contains(&p), "{kind}: event probability {p} outside [0, 1]");
        }
    }
}

pub fn load_rules(path: &Path) -> Result<Rules> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading rules file: {}", path.display()))?;
    let rules: Rules = serde_json::from_str(&json)
        .with_context(|| format!("parsing rules file: {}", path.display()))?;
    validate_rules(&rules);
    Ok(rules)
}

fn random_free_cell(rules: &Rules, used: &HashSet<Cell>, rng: &mut impl Rng) -> Cell {
    loop {
        let cell = Cell::new(
            rng.gen_range(0..rules.grid_width),
            rng.gen_range(0..rules.grid_height),
        );
        if !used.contains(&cell) {
            return cell;
        }
    }
}

/// Builds a fresh game: players and asteroids placed randomly without
/// collisions, then an initial telescope sweep so the opening render has
/// something to show.
pub fn build_initial_state(rules: &Rules, seed: u64, rng: &mut impl Rng) -> GameState {
    let mut used: HashSet<Cell> = HashSet::new();

    let players: Vec<PlayerState> = (0..rules.num_players)
        .map(|i| {
            let pos = random_free_cell(rules, &used, rng);
            used.insert(pos);
            PlayerState::new(PlayerId(i), pos, rules)
        })
        .collect();

    let count = rng.gen_range(rules.min_asteroids..=rules.max_asteroids);
    let asteroids: Vec<AsteroidState> = (1..=count)
        .map(|id| {
            let pos = random_free_cell(rules, &used, rng);
            used.insert(pos);
            let kind = AsteroidKind::ALL[rng.gen_range(0..AsteroidKind::ALL.len())];
            let def = rules.spawn.get(kind);
            let resource = rng.gen_range(def.resource_range.0..=def.resource_range.1) as f32;
            let value = rng.gen_range(def.value_range.0..=def.value_range.1);
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
        })
        .collect();

    let mut state = GameState {
        meta: MetaState {
            turn: 1,
            seed,
            schema_version: 1,
        },
        players,
        asteroids,
        discovered: ahash::AHashSet::new(),
        debris: ahash::AHashSet::new(),
        active_player: 0,
    };
    update_discovered(&mut state, rules);
    state
}
