//! Prelude module for convenient imports
//!
//! ```rust
//! use gear_core::prelude::*;
//! ```

// Core types
pub use crate::types::{
    Attribute, GemValue, Requirements, ResourcePool, Slot, Stat, StatLine, UniquePair,
};

// Game data and builds
pub use crate::config::{BuildConfig, BuildError, GameData, Preset, Ruleset, ValueTables};

// Locked gear
pub use crate::locked::{LockedPiece, LockedSet};

// Solving
pub use crate::search::{SlotAssignment, SlotStats};
pub use crate::solver::{GearSolver, Solution};
