//! `belt_core` — deterministic hotseat mining-game core.
//!
//! No IO, no rendering. All randomness via the passed-in Rng.

mod actions;
mod discovery;
mod error;
mod events;
mod grid;
mod modules;
mod reach;
mod turn;
mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;

pub use actions::{
    allowed_moves, can_deploy_debris, debris_targets, deploy_debris, hijack_robot, manual_mine,
    move_player, purchase_module, remote_plant_robot, remote_plant_targets, remove_module,
    upgrade_all_robots, upgrade_module, DebrisOutcome, HijackOutcome, MineOutcome, MoveOutcome,
    PlantOutcome, PurchaseOutcome, RemoveOutcome, RobotUpgradeOutcome, UpgradeOutcome,
};
pub use discovery::update_discovered;
pub use error::ActionError;
pub use grid::{in_bounds, manhattan};
pub use modules::{
    Drill, ExplosivesLab, Factory, FusionReactor, IcePenetrator, LaunchBay, ModuleKind, ModuleSet,
    Reactor, Telescope, WarpDrive, ADDON_LEVEL_CAP, BASE_MODULE_LEVEL_CAP,
};
pub use reach::{find_path, reachable_cells, reachable_within};
pub use turn::{end_turn, is_game_over, next_turn, robot_mining, RobotMiningEntry, TurnReport};
pub use types::*;

#[cfg(test)]
mod tests;
