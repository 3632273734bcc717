//! gear_core - Equipment loadout solver
//!
//! This library provides:
//! - Ruleset and ValueTables: the game data a build is solved against
//! - LockedSet: gear the player has already fixed in place
//! - SearchSpace: lazy enumeration of slot selections and stat assignments
//! - GearSolver: the search loop with greedy gem and reforge allocation

pub mod config;
pub mod locked;
pub mod prelude;
pub mod search;
pub mod solver;
pub mod types;

// Re-export core types for convenience
pub use config::{BuildConfig, BuildError, ConfigError, GameData, Preset, Ruleset, ValueTables};
pub use locked::{LockError, LockedPiece, LockedSet, PieceKind};
pub use search::{SlotAssignment, SlotStats};
pub use solver::{GearSolver, Solution, Solutions};
pub use types::{Attribute, GemValue, Requirements, ResourcePool, Slot, Stat, StatLine};
