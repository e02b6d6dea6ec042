//! The action engine: validates and applies each player action.
//!
//! Every command operates on the active player, returns
//! `Result<Outcome, ActionError>`, and is atomic — all checks run before
//! the first state write, so a failing action leaves the game untouched.
//! Outcomes carry the log message, structured payload for UI feedback,
//! and whether the action consumes the turn.

use ahash::AHashSet;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::discovery::reveal_around;
use crate::error::ActionError;
use crate::grid::{self, manhattan, neighbors};
use crate::modules::{ModuleKind, ModuleSet};
use crate::reach::{find_path, player_mobility, reachable_cells, reachable_within};
use crate::types::{AsteroidId, AsteroidKind, Cell, GameState, RobotState, Rules};

/// Footprint radius of a debris charge before any ExplosivesLab bonus.
const DEBRIS_BASE_RADIUS: i32 = 1;

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub message: String,
    /// Discovery-event message, when the landing triggered one.
    pub event: Option<String>,
    /// Travelled route, start and destination included. Empty for a warp.
    pub path: Vec<Cell>,
    /// Asteroid occupying the destination, if any.
    pub asteroid: Option<AsteroidId>,
    pub ends_turn: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MineOutcome {
    pub message: String,
    pub asteroid: AsteroidId,
    pub extracted: f32,
    pub gain: f32,
    pub ends_turn: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantOutcome {
    pub message: String,
    pub asteroid: AsteroidId,
    pub capacity: f32,
    pub ends_turn: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HijackOutcome {
    pub message: String,
    pub asteroid: AsteroidId,
    pub ends_turn: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotUpgradeOutcome {
    /// Per-robot lines plus a trailing summary.
    pub messages: Vec<String>,
    pub upgraded: u32,
    pub ends_turn: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebrisOutcome {
    pub message: String,
    /// Footprint cells actually added (asteroid-occupied ones are skipped).
    pub cells: Vec<Cell>,
    pub ends_turn: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeOutcome {
    pub message: String,
    pub kind: ModuleKind,
    pub ends_turn: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOutcome {
    pub message: String,
    pub kind: ModuleKind,
    pub ends_turn: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveOutcome {
    pub message: String,
    pub kind: ModuleKind,
    pub ends_turn: bool,
}

// ---------------------------------------------------------------------------
// Movement
// ---------------------------------------------------------------------------

/// Every cell the active player may move to this turn.
pub fn allowed_moves(state: &GameState, rules: &Rules) -> Result<AHashSet<Cell>, ActionError> {
    reachable_cells(state, rules, state.current_player().id)
}

pub fn move_player(
    state: &mut GameState,
    rules: &Rules,
    dest: Cell,
    rng: &mut impl Rng,
) -> Result<MoveOutcome, ActionError> {
    let idx = state.active_player;
    let mobility = player_mobility(state, rules, state.players[idx].id)?;
    if !mobility.contains(dest) {
        return Err(ActionError::Unreachable(dest));
    }
    let start = state.players[idx].pos;
    // A destination inside the step set is a walk even when a warp could
    // also reach it — the jump is saved for when it is the only way.
    let warped = !mobility.steps.contains(&dest);
    let path = if warped {
        Vec::new()
    } else {
        find_path(start, dest, &mobility.steps)
    };

    // Telescope sweep along the travelled route.
    let telescope_range = state.players[idx]
        .modules
        .telescope
        .as_ref()
        .map(|t| t.discovery_range);
    if let Some(range) = telescope_range {
        for cell in &path {
            reveal_around(&mut state.discovered, rules, *cell, range);
        }
    }

    state.players[idx].pos = dest;

    let mut instant = false;
    if warped {
        if let Some(warp) = state.players[idx].modules.warp_drive.as_mut() {
            warp.used_this_turn = true;
            instant = warp.instant();
        }
    }
    let keeps_turn = instant && !rules.variants.instant_warp_consumes_turn;

    let symbol = state.players[idx].symbol.clone();
    let mut message = if warped {
        format!("{symbol} warps from {start} to {dest}.")
    } else {
        format!(
            "{symbol} moves from {start} to {dest} ({} steps).",
            path.len().saturating_sub(1)
        )
    };
    if keeps_turn {
        message.push_str(" (instant warp: turn not consumed)");
    }

    // First arrival on an asteroid may trigger a discovery event.
    let asteroid = state.asteroid_at(dest);
    let mut event = None;
    if let Some(a_idx) = asteroid {
        if !state.asteroids[a_idx].visited {
            state.asteroids[a_idx].visited = true;
            let chance = state.asteroids[a_idx].event_probability(rules).min(1.0);
            if rng.gen::<f32>() < chance {
                event = Some(crate::events::roll_discovery_event(state, idx, a_idx, rng));
            }
        }
    }

    Ok(MoveOutcome {
        message,
        event,
        path,
        asteroid: asteroid.map(|i| state.asteroids[i].id),
        ends_turn: !keeps_turn,
    })
}

// ---------------------------------------------------------------------------
// Mining
// ---------------------------------------------------------------------------

/// Extract from the asteroid under the active player, up to drill capacity
/// (times the IcePenetrator multiplier on ice).
pub fn manual_mine(state: &mut GameState) -> Result<MineOutcome, ActionError> {
    let idx = state.active_player;
    let pos = state.players[idx].pos;
    let a_idx = state.asteroid_at(pos).ok_or(ActionError::NotOnAsteroid)?;
    let player = &state.players[idx];
    let Some(drill) = player.modules.drill.as_ref() else {
        return Err(ActionError::MissingModule(ModuleKind::Drill));
    };
    let a = &state.asteroids[a_idx];
    if a.is_exhausted() {
        return Err(ActionError::Exhausted(a.id));
    }
    let mut capacity = drill.mining_capacity;
    if a.kind == AsteroidKind::Ice {
        if let Some(ip) = &player.modules.ice_penetrator {
            capacity *= ip.multiplier;
        }
    }
    let extracted = capacity.min(a.resource);
    let gain = extracted * a.value;
    let id = a.id;

    state.asteroids[a_idx].resource -= extracted;
    let p = &mut state.players[idx];
    p.money += gain;
    p.total_mined += extracted;
    Ok(MineOutcome {
        message: format!(
            "{} manually mines {extracted:.1} from {id} and receives ${gain:.1}.",
            p.symbol
        ),
        asteroid: id,
        extracted,
        gain,
        ends_turn: true,
    })
}

// ---------------------------------------------------------------------------
// Robots
// ---------------------------------------------------------------------------

/// Discovered, non-exhausted, robot-free asteroids within launch-bay
/// range. Empty when the required modules are missing or the factory
/// quota is spent.
pub fn remote_plant_targets(state: &GameState, rules: &Rules) -> AHashSet<Cell> {
    let p = state.current_player();
    let (Some(lb), Some(factory)) = (p.modules.launch_bay.as_ref(), p.modules.factory.as_ref())
    else {
        return AHashSet::new();
    };
    if factory.quota_spent() {
        return AHashSet::new();
    }
    let reachable = reachable_within(state, rules, p.pos, lb.robot_range);
    state
        .asteroids
        .iter()
        .filter(|a| reachable.contains(&a.pos) && !a.is_exhausted() && a.robot.is_none())
        .map(|a| a.pos)
        .collect()
}

pub fn remote_plant_robot(
    state: &mut GameState,
    rules: &Rules,
    target: Cell,
) -> Result<PlantOutcome, ActionError> {
    let idx = state.active_player;
    let a_idx = state
        .asteroid_at(target)
        .ok_or(ActionError::NoAsteroid(target))?;
    if !state.discovered.contains(&target) {
        return Err(ActionError::Undiscovered(target));
    }
    let a = &state.asteroids[a_idx];
    if a.is_exhausted() {
        return Err(ActionError::Exhausted(a.id));
    }
    if a.robot.is_some() {
        return Err(ActionError::RobotAlreadyPresent(a.id));
    }
    let player = &state.players[idx];
    let Some(lb) = player.modules.launch_bay.as_ref() else {
        return Err(ActionError::MissingModule(ModuleKind::LaunchBay));
    };
    let Some(factory) = player.modules.factory.as_ref() else {
        return Err(ActionError::MissingModule(ModuleKind::Factory));
    };
    if factory.quota_spent() {
        return Err(ActionError::QuotaExceeded);
    }
    if !reachable_within(state, rules, player.pos, lb.robot_range).contains(&target) {
        return Err(ActionError::OutOfRange(target));
    }
    if player.money < rules.robot_cost {
        return Err(ActionError::InsufficientFunds {
            needed: rules.robot_cost,
            available: player.money,
        });
    }
    // Capacity freezes at deployment; later Factory upgrades don't
    // touch robots already in the field.
    let capacity = factory.robot_capacity;
    let owner = player.id;
    let id = a.id;

    let p = &mut state.players[idx];
    p.money -= rules.robot_cost;
    if let Some(f) = p.modules.factory.as_mut() {
        f.robots_produced_this_turn += 1;
    }
    let symbol = p.symbol.clone();
    state.asteroids[a_idx].robot = Some(RobotState { owner, capacity });
    Ok(PlantOutcome {
        message: format!("{symbol} plants a robot on {id} with capacity {capacity:.0}."),
        asteroid: id,
        capacity,
        ends_turn: false,
    })
}

/// Seize the robot on the asteroid under the active player. The robot's
/// capacity resets to the hijacker's current factory capacity.
pub fn hijack_robot(state: &mut GameState, rules: &Rules) -> Result<HijackOutcome, ActionError> {
    let idx = state.active_player;
    let pos = state.players[idx].pos;
    let a_idx = state.asteroid_at(pos).ok_or(ActionError::NotOnAsteroid)?;
    let a = &state.asteroids[a_idx];
    if a.is_exhausted() {
        return Err(ActionError::Exhausted(a.id));
    }
    let Some(robot) = a.robot else {
        return Err(ActionError::NoRobot(a.id));
    };
    let me = state.players[idx].id;
    if robot.owner == me {
        return Err(ActionError::RobotAlreadyOwned(a.id));
    }
    let Some(factory) = state.players[idx].modules.factory.as_ref() else {
        return Err(ActionError::MissingModule(ModuleKind::Factory));
    };
    let cost = rules.variants.hijack_cost;
    if state.players[idx].money < cost {
        return Err(ActionError::InsufficientFunds {
            needed: cost,
            available: state.players[idx].money,
        });
    }
    let capacity = factory.robot_capacity;
    let id = a.id;

    state.players[idx].money -= cost;
    state.asteroids[a_idx].robot = Some(RobotState {
        owner: me,
        capacity,
    });
    Ok(HijackOutcome {
        message: format!(
            "{} hijacks the robot on {id} and now controls it.",
            state.players[idx].symbol
        ),
        asteroid: id,
        ends_turn: rules.variants.hijack_ends_turn,
    })
}

/// Raise every owned robot within launch-bay range to the current factory
/// capacity. Free action.
pub fn upgrade_all_robots(state: &mut GameState) -> Result<RobotUpgradeOutcome, ActionError> {
    let idx = state.active_player;
    let player = &state.players[idx];
    let Some(lb) = player.modules.launch_bay.as_ref() else {
        return Err(ActionError::MissingModule(ModuleKind::LaunchBay));
    };
    let Some(factory) = player.modules.factory.as_ref() else {
        return Err(ActionError::MissingModule(ModuleKind::Factory));
    };
    let range = lb.robot_range;
    let target_capacity = factory.robot_capacity;
    let pos = player.pos;
    let me = player.id;
    let symbol = player.symbol.clone();

    let mut messages = Vec::new();
    let mut upgraded = 0u32;
    for a in &mut state.asteroids {
        let Some(robot) = &mut a.robot else { continue };
        if robot.owner != me || manhattan(pos, a.pos) > range {
            continue;
        }
        if robot.capacity < target_capacity {
            let old = robot.capacity;
            robot.capacity = target_capacity;
            upgraded += 1;
            messages.push(format!(
                "{symbol} upgrades robot on {} from capacity {old:.0} to {target_capacity:.0}.",
                a.id
            ));
        }
    }
    messages.push(if upgraded > 0 {
        "All eligible robots have been upgraded.".to_string()
    } else {
        "No eligible robots found to upgrade.".to_string()
    });
    Ok(RobotUpgradeOutcome {
        messages,
        upgraded,
        ends_turn: false,
    })
}

// ---------------------------------------------------------------------------
// Debris
// ---------------------------------------------------------------------------

/// Proximity check for a debris deployment at `target`: the footprint and
/// every cell 4-adjacent to it must be player-free. Returns the footprint
/// on success.
pub fn can_deploy_debris(
    state: &GameState,
    target: Cell,
) -> Result<Vec<Cell>, ActionError> {
    let radius = DEBRIS_BASE_RADIUS
        + state
            .current_player()
            .modules
            .explosives_lab
            .as_ref()
            .map_or(0, |lab| lab.debris_radius);
    let footprint = grid::diamond(target, radius);
    let mut forbidden: AHashSet<Cell> = AHashSet::new();
    for cell in &footprint {
        forbidden.insert(*cell);
        for n in neighbors(*cell) {
            forbidden.insert(n);
        }
    }
    if state.players.iter().any(|p| forbidden.contains(&p.pos)) {
        return Err(ActionError::TooCloseToPlayer);
    }
    Ok(footprint)
}

/// Asteroid-free cells in debris-targeting range whose footprint passes
/// the proximity check.
pub fn debris_targets(state: &GameState, rules: &Rules) -> AHashSet<Cell> {
    let p = state.current_player();
    let Some(lb) = p.modules.launch_bay.as_ref() else {
        return AHashSet::new();
    };
    let bonus = p
        .modules
        .explosives_lab
        .as_ref()
        .map_or(rules.debris_reach_bonus, |lab| lab.extra_range);
    reachable_within(state, rules, p.pos, lb.robot_range + bonus)
        .into_iter()
        .filter(|cell| state.asteroid_at(*cell).is_none())
        .filter(|cell| can_deploy_debris(state, *cell).is_ok())
        .collect()
}

pub fn deploy_debris(
    state: &mut GameState,
    rules: &Rules,
    target: Cell,
) -> Result<DebrisOutcome, ActionError> {
    let idx = state.active_player;
    let player = &state.players[idx];
    let Some(lb) = player.modules.launch_bay.as_ref() else {
        return Err(ActionError::MissingModule(ModuleKind::LaunchBay));
    };
    let bonus = player
        .modules
        .explosives_lab
        .as_ref()
        .map_or(rules.debris_reach_bonus, |lab| lab.extra_range);
    if !reachable_within(state, rules, player.pos, lb.robot_range + bonus).contains(&target) {
        return Err(ActionError::OutOfRange(target));
    }
    if state.asteroid_at(target).is_some() {
        return Err(ActionError::CellOccupied(target));
    }
    let footprint = can_deploy_debris(state, target)?;
    if player.money < rules.debris_cost {
        return Err(ActionError::InsufficientFunds {
            needed: rules.debris_cost,
            available: player.money,
        });
    }

    state.players[idx].money -= rules.debris_cost;
    let mut cells = Vec::new();
    for cell in footprint {
        if grid::in_bounds(rules, cell)
            && state.asteroid_at(cell).is_none()
            && state.debris.insert(cell)
        {
            cells.push(cell);
        }
    }
    Ok(DebrisOutcome {
        message: format!(
            "{} deploys debris around {target} ({} cells).",
            state.players[idx].symbol,
            cells.len()
        ),
        cells,
        ends_turn: true,
    })
}

// ---------------------------------------------------------------------------
// Module purchase / upgrade / removal
// ---------------------------------------------------------------------------

pub fn upgrade_module(
    state: &mut GameState,
    rules: &Rules,
    kind: ModuleKind,
) -> Result<UpgradeOutcome, ActionError> {
    let p = &mut state.players[state.active_player];
    let money = &mut p.money;
    let missing = ActionError::MissingModule(kind);
    let message = match kind {
        ModuleKind::Drill => p
            .modules
            .drill
            .as_mut()
            .ok_or(missing)?
            .upgrade(money, &rules.drill)?,
        ModuleKind::Telescope => p
            .modules
            .telescope
            .as_mut()
            .ok_or(missing)?
            .upgrade(money, &rules.telescope)?,
        ModuleKind::Reactor => p
            .modules
            .reactor
            .as_mut()
            .ok_or(missing)?
            .upgrade(money, &rules.reactor)?,
        ModuleKind::LaunchBay => p
            .modules
            .launch_bay
            .as_mut()
            .ok_or(missing)?
            .upgrade(money, &rules.launch_bay)?,
        ModuleKind::Factory => p
            .modules
            .factory
            .as_mut()
            .ok_or(missing)?
            .upgrade(money, &rules.factory)?,
        ModuleKind::IcePenetrator => p
            .modules
            .ice_penetrator
            .as_mut()
            .ok_or(missing)?
            .upgrade(money)?,
        ModuleKind::FusionReactor => p
            .modules
            .fusion_reactor
            .as_mut()
            .ok_or(missing)?
            .upgrade(money)?,
        ModuleKind::ExplosivesLab => p
            .modules
            .explosives_lab
            .as_mut()
            .ok_or(missing)?
            .upgrade(money)?,
        ModuleKind::WarpDrive => p
            .modules
            .warp_drive
            .as_mut()
            .ok_or(missing)?
            .upgrade(money)?,
    };
    p.upgrades_purchased += 1;
    Ok(UpgradeOutcome {
        message,
        kind,
        ends_turn: false,
    })
}

pub fn purchase_module(
    state: &mut GameState,
    rules: &Rules,
    kind: ModuleKind,
) -> Result<PurchaseOutcome, ActionError> {
    let p = &mut state.players[state.active_player];
    if p.modules.has(kind) {
        return Err(ActionError::AlreadyInstalled(kind));
    }
    if p.modules.installed_count() >= rules.module_slot_cap {
        return Err(ActionError::SlotsFull(rules.module_slot_cap));
    }
    let cost = ModuleSet::build_cost(kind, rules);
    if p.money < cost {
        return Err(ActionError::InsufficientFunds {
            needed: cost,
            available: p.money,
        });
    }
    p.money -= cost;
    p.modules.install(kind, rules);
    Ok(PurchaseOutcome {
        message: format!("{} builds a {kind} for ${cost:.0}.", p.symbol),
        kind,
        ends_turn: false,
    })
}

pub fn remove_module(state: &mut GameState, kind: ModuleKind) -> Result<RemoveOutcome, ActionError> {
    let p = state.current_player_mut();
    if !p.modules.remove(kind) {
        return Err(ActionError::MissingModule(kind));
    }
    Ok(RemoveOutcome {
        message: format!("{} dismantles the {kind}. That capability is gone.", p.symbol),
        kind,
        ends_turn: false,
    })
}
