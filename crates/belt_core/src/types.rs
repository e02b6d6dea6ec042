//! Type definitions for `belt_core`.
//!
//! All public state, configuration, and ID types used by the game core.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::modules::ModuleSet;

// ---------------------------------------------------------------------------
// ID newtypes
// ---------------------------------------------------------------------------

/// Index into `GameState::players`. Assigned sequentially at world-gen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub usize);

/// Stable 1-based asteroid id, also the deterministic passive-mining order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AsteroidId(pub u32);

impl std::fmt::Display for AsteroidId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "A{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Grid cells
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Asteroids and robots
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AsteroidKind {
    Ice,
    Hematite,
    Malachite,
    Sperrylite,
}

impl AsteroidKind {
    pub const ALL: [AsteroidKind; 4] = [
        AsteroidKind::Ice,
        AsteroidKind::Hematite,
        AsteroidKind::Malachite,
        AsteroidKind::Sperrylite,
    ];
}

impl std::fmt::Display for AsteroidKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AsteroidKind::Ice => "ice",
            AsteroidKind::Hematite => "hematite",
            AsteroidKind::Malachite => "malachite",
            AsteroidKind::Sperrylite => "sperrylite",
        };
        f.write_str(name)
    }
}

/// A deployed mining robot, embedded 1:1 in its asteroid.
///
/// `capacity` is frozen at (re)deployment — later Factory upgrades do not
/// retroactively change it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RobotState {
    pub owner: PlayerId,
    pub capacity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidState {
    pub id: AsteroidId,
    pub pos: Cell,
    pub kind: AsteroidKind,
    /// Remaining extractable quantity. Never increases, floored at 0.
    pub resource: f32,
    pub initial_resource: f32,
    /// Per-unit price, fixed at spawn.
    pub value: f32,
    pub robot: Option<RobotState>,
    /// Set once on first player arrival; gates the discovery-event roll.
    pub visited: bool,
}

impl AsteroidState {
    pub fn is_exhausted(&self) -> bool {
        self.resource <= 0.0
    }

    /// Probability that landing here for the first time triggers a
    /// discovery event: the per-kind override if configured, else
    /// `exp(-0.001 × initial_resource)` — bigger deposits trigger less.
    pub fn event_probability(&self, rules: &Rules) -> f32 {
        rules
            .spawn
            .get(self.kind)
            .event_probability_override
            .unwrap_or_else(|| (-0.001 * self.initial_resource).exp())
    }
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    /// Display handle, `P1`, `P2`, ... Used in every log message.
    pub symbol: String,
    /// Cosmetic only; the core never reads it.
    pub color: String,
    pub pos: Cell,
    pub money: f32,
    pub modules: ModuleSet,
    pub total_mined: f32,
    pub upgrades_purchased: u32,
    /// Robot income accrued since this player's previous turn began.
    /// Reset when their next turn starts.
    pub robot_earnings_this_turn: f32,
}

impl PlayerState {
    pub fn new(id: PlayerId, pos: Cell, rules: &Rules) -> Self {
        let color = rules
            .player_colors
            .get(id.0 % rules.player_colors.len().max(1))
            .cloned()
            .unwrap_or_default();
        Self {
            id,
            symbol: format!("P{}", id.0 + 1),
            color,
            pos,
            money: rules.initial_money,
            modules: ModuleSet::base(rules),
            total_mined: 0.0,
            upgrades_purchased: 0,
            robot_earnings_this_turn: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Game state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaState {
    /// Global round counter; increments when play wraps back to player 0.
    pub turn: u32,
    pub seed: u64,
    pub schema_version: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub meta: MetaState,
    pub players: Vec<PlayerState>,
    /// Ascending-id creation order; never shrinks (exhausted asteroids stay).
    pub asteroids: Vec<AsteroidState>,
    /// Shared fog-of-war state. Append-only.
    pub discovered: AHashSet<Cell>,
    /// Impassable, non-mineable cells. Append-only.
    pub debris: AHashSet<Cell>,
    pub active_player: usize,
}

impl GameState {
    pub fn current_player(&self) -> &PlayerState {
        &self.players[self.active_player]
    }

    pub fn current_player_mut(&mut self) -> &mut PlayerState {
        &mut self.players[self.active_player]
    }

    /// Index into `asteroids` of the asteroid occupying `cell`, if any.
    pub fn asteroid_at(&self, cell: Cell) -> Option<usize> {
        self.asteroids.iter().position(|a| a.pos == cell)
    }

    /// Display-neutral projection of one tile for rendering. Undiscovered
    /// tiles reveal nothing but the flag itself.
    pub fn tile_info(&self, cell: Cell) -> TileInfo {
        if !self.discovered.contains(&cell) {
            return TileInfo {
                discovered: false,
                debris: false,
                occupant: Occupant::Empty,
                players: SmallVec::new(),
            };
        }
        let occupant = match self.asteroid_at(cell) {
            Some(idx) => {
                let a = &self.asteroids[idx];
                Occupant::Asteroid {
                    id: a.id,
                    kind: a.kind,
                    exhausted: a.is_exhausted(),
                    robot_owner: a.robot.map(|r| r.owner),
                }
            }
            None => Occupant::Empty,
        };
        let players = self
            .players
            .iter()
            .filter(|p| p.pos == cell)
            .map(|p| p.id)
            .collect();
        TileInfo {
            discovered: true,
            debris: self.debris.contains(&cell),
            occupant,
            players,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Occupant {
    Empty,
    Asteroid {
        id: AsteroidId,
        kind: AsteroidKind,
        exhausted: bool,
        robot_owner: Option<PlayerId>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileInfo {
    pub discovered: bool,
    pub debris: bool,
    pub occupant: Occupant,
    pub players: SmallVec<[PlayerId; 2]>,
}

// ---------------------------------------------------------------------------
// Rules (configuration — consumed at construction, never mutated)
// ---------------------------------------------------------------------------

/// Base stats and upgrade economics for a capacity-valued module
/// (Drill, Factory).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityModuleConfig {
    pub initial: f32,
    pub build_cost: f32,
    pub upgrade_cost: f32,
    pub upgrade_increment: f32,
    pub cost_increase: f32,
}

/// Base stats and upgrade economics for a range-valued module
/// (Telescope, Reactor, LaunchBay).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeModuleConfig {
    pub initial: i32,
    pub build_cost: f32,
    pub upgrade_cost: f32,
    pub upgrade_increment: i32,
    pub cost_increase: f32,
}

/// Purchase and upgrade pricing for a two-level add-on module. The
/// add-on effect values themselves are fixed per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddonConfig {
    pub build_cost: f32,
    pub upgrade_cost: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidKindDef {
    pub resource_range: (u32, u32),
    pub value_range: (f32, f32),
    /// Fixed discovery-event probability for this kind, overriding the
    /// resource-based formula (sperrylite: 0.0 — never triggers).
    pub event_probability_override: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTable {
    pub ice: AsteroidKindDef,
    pub hematite: AsteroidKindDef,
    pub malachite: AsteroidKindDef,
    pub sperrylite: AsteroidKindDef,
}

impl SpawnTable {
    pub fn get(&self, kind: AsteroidKind) -> &AsteroidKindDef {
        match kind {
            AsteroidKind::Ice => &self.ice,
            AsteroidKind::Hematite => &self.hematite,
            AsteroidKind::Malachite => &self.malachite,
            AsteroidKind::Sperrylite => &self.sperrylite,
        }
    }
}

/// Knobs for the rule points where historical variants of the game
/// disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantRules {
    /// Cost charged to the hijacker. The canonical ruleset makes it free.
    pub hijack_cost: f32,
    pub hijack_ends_turn: bool,
    /// When false, a level-2 WarpDrive move leaves the turn with the mover.
    pub instant_warp_consumes_turn: bool,
}

impl Default for VariantRules {
    fn default() -> Self {
        Self {
            hijack_cost: 0.0,
            hijack_ends_turn: true,
            instant_warp_consumes_turn: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    pub grid_width: i32,
    pub grid_height: i32,
    pub num_players: usize,
    pub initial_money: f32,
    pub player_colors: Vec<String>,
    pub min_asteroids: u32,
    pub max_asteroids: u32,
    pub spawn: SpawnTable,
    pub drill: CapacityModuleConfig,
    pub telescope: RangeModuleConfig,
    pub reactor: RangeModuleConfig,
    pub launch_bay: RangeModuleConfig,
    pub factory: CapacityModuleConfig,
    pub ice_penetrator: AddonConfig,
    pub fusion_reactor: AddonConfig,
    pub explosives_lab: AddonConfig,
    pub warp_drive: AddonConfig,
    /// Fixed price of a remote robot deployment.
    pub robot_cost: f32,
    /// Fixed price of a debris deployment.
    pub debris_cost: f32,
    /// Debris targeting reach beyond launch-bay range when no
    /// ExplosivesLab is installed.
    pub debris_reach_bonus: i32,
    pub module_slot_cap: usize,
    /// Per-turn countdown owned by the UI layer; the core never reads it.
    pub turn_timer_secs: u32,
    #[serde(default)]
    pub variants: VariantRules,
}
