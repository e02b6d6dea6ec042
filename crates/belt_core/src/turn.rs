//! Turn sequencing: passive robot mining, game-over detection, and the
//! cyclic player advance.

use serde::{Deserialize, Serialize};

use crate::types::{AsteroidId, GameState, PlayerId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotMiningEntry {
    pub asteroid: AsteroidId,
    pub owner: PlayerId,
    pub extracted: f32,
    pub gain: f32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub mining: Vec<RobotMiningEntry>,
    pub game_over: bool,
}

/// One extraction pass for every live robot, in ascending asteroid id
/// order. Runs over all asteroids regardless of discovery.
pub fn robot_mining(state: &mut GameState) -> Vec<RobotMiningEntry> {
    let mut entries = Vec::new();
    for a_idx in 0..state.asteroids.len() {
        let (id, owner, capacity, extracted, gain) = {
            let a = &mut state.asteroids[a_idx];
            let Some(robot) = a.robot else { continue };
            if a.is_exhausted() {
                continue;
            }
            let extracted = robot.capacity.min(a.resource);
            let gain = extracted * a.value;
            a.resource -= extracted;
            (a.id, robot.owner, robot.capacity, extracted, gain)
        };
        let p = &mut state.players[owner.0];
        p.money += gain;
        p.total_mined += extracted;
        p.robot_earnings_this_turn += gain;
        entries.push(RobotMiningEntry {
            asteroid: id,
            owner,
            extracted,
            gain,
            message: format!(
                "Robot on {id} (owned by {}, capacity {capacity:.0}) extracts {extracted:.1} and earns ${gain:.1}.",
                p.symbol
            ),
        });
    }
    entries
}

/// The game is over once every asteroid is mined out. Observational only —
/// the core never refuses further turns on its own.
pub fn is_game_over(state: &GameState) -> bool {
    state.asteroids.iter().all(|a| a.is_exhausted())
}

/// Reset per-turn module state everywhere, hand the turn to the next
/// player, and bump the round counter when play wraps back to player 0.
pub fn next_turn(state: &mut GameState) {
    for p in &mut state.players {
        p.modules.next_turn();
    }
    state.active_player = (state.active_player + 1) % state.players.len();
    if state.active_player == 0 {
        state.meta.turn += 1;
    }
    // The incoming player's robot-earnings window restarts now.
    state.players[state.active_player].robot_earnings_this_turn = 0.0;
}

/// The end-of-turn sequence every turn-consuming action triggers:
/// passive mining, then the game-over check, then the player advance
/// (skipped once the game is over).
pub fn end_turn(state: &mut GameState) -> TurnReport {
    let mining = robot_mining(state);
    let game_over = is_game_over(state);
    if !game_over {
        next_turn(state);
    }
    TurnReport { mining, game_over }
}
