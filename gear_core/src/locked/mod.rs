//! Locked gear - equipment committed to the build before the search runs

mod piece;

pub use piece::{LockedPiece, PieceKind, PieceViolation};

use crate::config::{GearTierValues, Ruleset};
use crate::types::{
    Attribute, ResourcePool, Slot, StatLine, UniquePair, GEAR_SLOT_COUNT, POOL_CAPACITY,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a piece could not be locked
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockError {
    #[error("{0} is already locked. Remove it first.")]
    SlotAlreadyLocked(Slot),
    #[error("Cannot lock more than 10 gear pieces")]
    CapacityExceeded,
}

/// Locked pieces in insertion order
///
/// Invariants: at most one piece per slot and at most ten pieces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LockedRecord", into = "LockedRecord")]
pub struct LockedSet {
    pieces: Vec<LockedPiece>,
}

impl LockedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock a piece into its slot
    pub fn add_piece(&mut self, piece: LockedPiece) -> Result<(), LockError> {
        if self.is_locked(piece.slot) {
            return Err(LockError::SlotAlreadyLocked(piece.slot));
        }
        if self.pieces.len() >= GEAR_SLOT_COUNT {
            return Err(LockError::CapacityExceeded);
        }
        self.pieces.push(piece);
        Ok(())
    }

    /// Unlock a slot; does nothing if the slot is free
    pub fn remove_piece(&mut self, slot: Slot) {
        self.pieces.retain(|p| p.slot != slot);
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
    }

    pub fn get(&self, slot: Slot) -> Option<&LockedPiece> {
        self.pieces.iter().find(|p| p.slot == slot)
    }

    pub fn is_locked(&self, slot: Slot) -> bool {
        self.get(slot).is_some()
    }

    pub fn pieces(&self) -> &[LockedPiece] {
        &self.pieces
    }

    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.pieces.iter().map(|p| p.slot)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Whether all ten gear slots are locked
    pub fn is_full(&self) -> bool {
        self.pieces.len() >= GEAR_SLOT_COUNT
    }

    pub fn unique_count(&self) -> usize {
        self.pieces.iter().filter(|p| p.is_unique()).count()
    }

    /// Combined stats of every locked piece
    pub fn total_stats(&self, tier: &GearTierValues, pair: UniquePair, gem_value: u32) -> StatLine {
        let mut totals = StatLine::new();
        for piece in &self.pieces {
            totals += piece.stats(tier, pair, gem_value);
        }
        totals
    }

    /// Gems and reforges already spent on locked pieces
    pub fn resource_usage(&self) -> ResourcePool {
        ResourcePool {
            gems: self.pieces.iter().filter(|p| p.gem.is_some()).count() as u32,
            reforges: self.pieces.iter().filter(|p| p.reforge.is_some()).count() as u32,
        }
    }

    /// What is left of the pool for the search to spend
    pub fn available_resources(&self) -> ResourcePool {
        let used = self.resource_usage();
        ResourcePool {
            gems: POOL_CAPACITY.saturating_sub(used.gems),
            reforges: POOL_CAPACITY.saturating_sub(used.reforges),
        }
    }

    /// Every rule broken by a locked piece
    pub fn validate(&self, rules: &Ruleset, attribute: Attribute) -> Vec<(Slot, PieceViolation)> {
        self.pieces
            .iter()
            .filter_map(|p| p.validate(rules, attribute).err().map(|v| (p.slot, v)))
            .collect()
    }
}

/// Wire form: `{"locked_pieces": [...]}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LockedRecord {
    #[serde(default)]
    locked_pieces: Vec<LockedPiece>,
}

impl TryFrom<LockedRecord> for LockedSet {
    type Error = LockError;

    fn try_from(record: LockedRecord) -> Result<Self, Self::Error> {
        let mut set = LockedSet::new();
        for piece in record.locked_pieces {
            set.add_piece(piece)?;
        }
        Ok(set)
    }
}

impl From<LockedSet> for LockedRecord {
    fn from(set: LockedSet) -> Self {
        LockedRecord {
            locked_pieces: set.pieces,
        }
    }
}
