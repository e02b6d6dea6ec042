//! Fog-of-war accumulation.

use ahash::AHashSet;

use crate::grid;
use crate::types::{Cell, GameState, Rules};

/// Reveal every tile within each telescope-holder's discovery range of
/// their current position. Monotonic — tiles are never un-discovered.
/// Called before rendering and before reachability queries.
pub fn update_discovered(state: &mut GameState, rules: &Rules) {
    let sweeps: Vec<(Cell, i32)> = state
        .players
        .iter()
        .filter_map(|p| {
            p.modules
                .telescope
                .as_ref()
                .map(|t| (p.pos, t.discovery_range))
        })
        .collect();
    for (center, range) in sweeps {
        reveal_around(&mut state.discovered, rules, center, range);
    }
}

pub(crate) fn reveal_around(
    discovered: &mut AHashSet<Cell>,
    rules: &Rules,
    center: Cell,
    range: i32,
) {
    for cell in grid::diamond(center, range) {
        if grid::in_bounds(rules, cell) {
            discovered.insert(cell);
        }
    }
}
