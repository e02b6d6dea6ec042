//! Budgeted BFS reachability and path reconstruction.

use std::collections::VecDeque;

use ahash::{AHashMap, AHashSet};

use crate::error::ActionError;
use crate::grid::{self, neighbors};
use crate::types::{Cell, GameState, PlayerId, Rules};

/// Cells reachable from `start` in at most `steps` 4-directional moves
/// across discovered, debris-free terrain. `start` is included at
/// distance 0.
pub fn reachable_within(state: &GameState, rules: &Rules, start: Cell, steps: i32) -> AHashSet<Cell> {
    let mut dist: AHashMap<Cell, i32> = AHashMap::new();
    let mut queue = VecDeque::new();
    dist.insert(start, 0);
    queue.push_back((start, 0));
    while let Some((cell, d)) = queue.pop_front() {
        if d >= steps {
            continue;
        }
        for n in neighbors(cell) {
            if !grid::in_bounds(rules, n)
                || !state.discovered.contains(&n)
                || state.debris.contains(&n)
            {
                continue;
            }
            if !dist.contains_key(&n) {
                dist.insert(n, d + 1);
                queue.push_back((n, d + 1));
            }
        }
    }
    dist.keys().copied().collect()
}

/// A player's step-reachable set and the extra cells an unused WarpDrive
/// opens up this turn. Kept separate so the move action can tell a walk
/// from a jump.
pub(crate) struct Mobility {
    pub steps: AHashSet<Cell>,
    pub warp: AHashSet<Cell>,
}

impl Mobility {
    pub fn contains(&self, cell: Cell) -> bool {
        self.steps.contains(&cell) || self.warp.contains(&cell)
    }

    pub fn union(&self) -> AHashSet<Cell> {
        self.steps.union(&self.warp).copied().collect()
    }
}

pub(crate) fn player_mobility(
    state: &GameState,
    rules: &Rules,
    player: PlayerId,
) -> Result<Mobility, ActionError> {
    let p = &state.players[player.0];
    let reactor = p.modules.reactor.as_ref();
    let warp = p.modules.warp_drive.as_ref();
    if reactor.is_none() && warp.is_none() {
        return Err(ActionError::NoPropulsion);
    }

    let mut budget = reactor.map_or(0, |r| r.movement_range);
    if let Some(fusion) = &p.modules.fusion_reactor {
        budget = (budget as f32 * fusion.movement_multiplier).floor() as i32;
    }
    let steps = reachable_within(state, rules, p.pos, budget);

    // Warp ignores distance and path, but not discovery, debris, or
    // asteroid occupancy.
    let mut warp_cells = AHashSet::new();
    if warp.is_some_and(|w| !w.used_this_turn) {
        let occupied: AHashSet<Cell> = state.asteroids.iter().map(|a| a.pos).collect();
        for cell in &state.discovered {
            if !state.debris.contains(cell) && !occupied.contains(cell) {
                warp_cells.insert(*cell);
            }
        }
    }

    Ok(Mobility {
        steps,
        warp: warp_cells,
    })
}

/// Every cell the player can end a move on this turn. Fails with
/// `NoPropulsion` when the player has neither a Reactor nor a WarpDrive —
/// distinct from an empty set.
pub fn reachable_cells(
    state: &GameState,
    rules: &Rules,
    player: PlayerId,
) -> Result<AHashSet<Cell>, ActionError> {
    Ok(player_mobility(state, rules, player)?.union())
}

/// Shortest path from `start` to `end` restricted to `allowed`, endpoints
/// included. Empty when `end` is unreachable. Legality of the destination
/// is the caller's concern — membership in `allowed` already settled it.
pub fn find_path(start: Cell, end: Cell, allowed: &AHashSet<Cell>) -> Vec<Cell> {
    if start == end {
        return vec![start];
    }
    let mut prev: AHashMap<Cell, Cell> = AHashMap::new();
    let mut visited: AHashSet<Cell> = AHashSet::new();
    visited.insert(start);
    let mut queue = VecDeque::from([start]);
    while let Some(cur) = queue.pop_front() {
        if cur == end {
            break;
        }
        for n in neighbors(cur) {
            if allowed.contains(&n) && visited.insert(n) {
                prev.insert(n, cur);
                queue.push_back(n);
            }
        }
    }
    if !prev.contains_key(&end) {
        return Vec::new();
    }
    let mut path = vec![end];
    let mut cur = end;
    while let Some(&p) = prev.get(&cur) {
        path.push(p);
        cur = p;
    }
    path.reverse();
    path
}
