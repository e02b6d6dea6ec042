//! Weighted discovery-event table.
//!
//! Rolled at most once per asteroid, on a player's first arrival. All
//! randomness comes from the caller's Rng, so a seeded stream replays the
//! exact same outcomes.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{GameState, RobotState};

const MINING_BOOST: f32 = 10.0;
const RANGE_BOOST: i32 = 1;
const ROBOT_CAPACITY_BOOST: f32 = 5.0;
const MONEY_BONUS_MIN: u32 = 100;
const MONEY_BONUS_MAX: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventKind {
    Mining,
    Discovery,
    Movement,
    RobotRange,
    RobotCapacity,
    Money,
    FreeRobot,
    DoubleUpgrade,
}

const EVENT_TABLE: [(EventKind, u32); 8] = [
    (EventKind::Mining, 20),
    (EventKind::Discovery, 10),
    (EventKind::Movement, 5),
    (EventKind::RobotRange, 5),
    (EventKind::RobotCapacity, 5),
    (EventKind::Money, 15),
    (EventKind::FreeRobot, 35),
    (EventKind::DoubleUpgrade, 5),
];

/// The module-boost outcomes eligible for the double-upgrade draw.
const BOOSTABLE: [EventKind; 5] = [
    EventKind::Mining,
    EventKind::Discovery,
    EventKind::Movement,
    EventKind::RobotRange,
    EventKind::RobotCapacity,
];

fn pick_event(rng: &mut impl Rng) -> EventKind {
    let total: u32 = EVENT_TABLE.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen_range(0..total);
    for (kind, weight) in EVENT_TABLE {
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    // The weights cover the whole roll range; not reached.
    EventKind::DoubleUpgrade
}

/// Draw and apply one event for `player_idx` standing on `asteroid_idx`.
/// Returns the message the UI shows the player.
pub(crate) fn roll_discovery_event(
    state: &mut GameState,
    player_idx: usize,
    asteroid_idx: usize,
    rng: &mut impl Rng,
) -> String {
    match pick_event(rng) {
        EventKind::Money => {
            let bonus = rng.gen_range(MONEY_BONUS_MIN..=MONEY_BONUS_MAX) as f32;
            state.players[player_idx].money += bonus;
            format!("You received a bonus of ${bonus:.0}!")
        }
        EventKind::FreeRobot => free_robot(state, player_idx, asteroid_idx),
        EventKind::DoubleUpgrade => double_upgrade(state, player_idx, rng),
        kind => apply_boost(state, player_idx, kind).unwrap_or_else(|| no_effect(kind)),
    }
}

/// Apply one module boost, or `None` when the target module is absent.
fn apply_boost(state: &mut GameState, player_idx: usize, kind: EventKind) -> Option<String> {
    let modules = &mut state.players[player_idx].modules;
    match kind {
        EventKind::Mining => modules.drill.as_mut().map(|d| {
            let old = d.mining_capacity;
            d.mining_capacity += MINING_BOOST;
            format!(
                "Mining capacity increased by {MINING_BOOST:.0}! {old:.0} -> {:.0}",
                d.mining_capacity
            )
        }),
        EventKind::Discovery => modules.telescope.as_mut().map(|t| {
            let old = t.discovery_range;
            t.discovery_range += RANGE_BOOST;
            format!(
                "Discovery range increased by {RANGE_BOOST}! {old} -> {}",
                t.discovery_range
            )
        }),
        EventKind::Movement => modules.reactor.as_mut().map(|r| {
            let old = r.movement_range;
            r.movement_range += RANGE_BOOST;
            format!(
                "Movement range increased by {RANGE_BOOST}! {old} -> {}",
                r.movement_range
            )
        }),
        EventKind::RobotRange => modules.launch_bay.as_mut().map(|lb| {
            let old = lb.robot_range;
            lb.robot_range += RANGE_BOOST;
            format!(
                "Robot range increased by {RANGE_BOOST}! {old} -> {}",
                lb.robot_range
            )
        }),
        EventKind::RobotCapacity => modules.factory.as_mut().map(|f| {
            let old = f.robot_capacity;
            f.robot_capacity += ROBOT_CAPACITY_BOOST;
            format!(
                "Robot capacity increased by {ROBOT_CAPACITY_BOOST:.0}! {old:.0} -> {:.0}",
                f.robot_capacity
            )
        }),
        EventKind::Money | EventKind::FreeRobot | EventKind::DoubleUpgrade => None,
    }
}

fn no_effect(kind: EventKind) -> String {
    let message = match kind {
        EventKind::Mining => "No Drill available. Cannot increase mining capacity.",
        EventKind::Discovery => "No Telescope available. Cannot increase discovery range.",
        EventKind::Movement => "No Reactor available. Cannot increase movement range.",
        EventKind::RobotRange => "No LaunchBay available. Cannot increase robot range.",
        EventKind::RobotCapacity => "No Factory available. Cannot increase robot capacity.",
        EventKind::Money | EventKind::FreeRobot | EventKind::DoubleUpgrade => {
            "A mysterious event fizzles out."
        }
    };
    message.to_string()
}

fn free_robot(state: &mut GameState, player_idx: usize, asteroid_idx: usize) -> String {
    if state.asteroids[asteroid_idx].robot.is_some() {
        return "A free robot event was triggered, but a robot is already present. No effect."
            .to_string();
    }
    let Some(factory) = state.players[player_idx].modules.factory.as_ref() else {
        return "No Factory available. Cannot plant a free robot.".to_string();
    };
    let capacity = factory.robot_capacity;
    let owner = state.players[player_idx].id;
    state.asteroids[asteroid_idx].robot = Some(RobotState { owner, capacity });
    "A robot has been planted for you for free on this asteroid!".to_string()
}

/// Two distinct module boosts, drawn without replacement. Boosts whose
/// module is missing are skipped.
fn double_upgrade(state: &mut GameState, player_idx: usize, rng: &mut impl Rng) -> String {
    let chosen: Vec<EventKind> = BOOSTABLE.choose_multiple(rng, 2).copied().collect();
    let applied: Vec<String> = chosen
        .into_iter()
        .filter_map(|kind| apply_boost(state, player_idx, kind))
        .collect();
    if applied.is_empty() {
        "Double upgrade! No applicable modules. No effect.".to_string()
    } else {
        format!("Double upgrade! {}", applied.join(" "))
    }
}
