//! Action failure taxonomy.
//!
//! Every fallible command returns one of these instead of mutating state.
//! `Display` output is the message the UI surfaces verbatim.

use crate::modules::ModuleKind;
use crate::types::{AsteroidId, Cell};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActionError {
    /// The required module is not installed. Distinct from a zero-valued
    /// capability: without the module the action is unavailable entirely.
    #[error("no {0} installed")]
    MissingModule(ModuleKind),

    /// Neither a Reactor nor a WarpDrive — movement is unavailable,
    /// not merely zero-range.
    #[error("no Reactor and no WarpDrive installed: cannot move")]
    NoPropulsion,

    #[error("destination {0} is not reachable")]
    Unreachable(Cell),

    #[error("target {0} is outside launch-bay range")]
    OutOfRange(Cell),

    #[error("no asteroid at {0}")]
    NoAsteroid(Cell),

    #[error("not standing on an asteroid")]
    NotOnAsteroid,

    #[error("{0} is exhausted")]
    Exhausted(AsteroidId),

    #[error("target {0} is undiscovered")]
    Undiscovered(Cell),

    #[error("a robot already exists on {0}")]
    RobotAlreadyPresent(AsteroidId),

    #[error("no robot on {0} to hijack")]
    NoRobot(AsteroidId),

    #[error("the robot on {0} is already yours")]
    RobotAlreadyOwned(AsteroidId),

    #[error("insufficient funds: need ${needed:.0}, have ${available:.0}")]
    InsufficientFunds { needed: f32, available: f32 },

    #[error("factory production quota for this turn is spent")]
    QuotaExceeded,

    #[error("{0} is already at max level")]
    LevelCapReached(ModuleKind),

    #[error("{0} is already installed")]
    AlreadyInstalled(ModuleKind),

    #[error("all {0} module slots are occupied")]
    SlotsFull(usize),

    #[error("debris region too close to a player")]
    TooCloseToPlayer,

    #[error("cell {0} is occupied by an asteroid")]
    CellOccupied(Cell),
}
