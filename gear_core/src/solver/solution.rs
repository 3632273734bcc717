//! Accepted loadouts

use super::Allocation;
use crate::search::SlotAssignment;
use crate::types::{Slot, StatLine};
use serde::Serialize;

/// One accepted loadout
///
/// `slots` lists locked slots first (in the order they were locked), then
/// the generated slots in selection order. `assignment` covers only the
/// generated slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    slots: Vec<Slot>,
    unique_slots: Vec<Slot>,
    assignment: Vec<SlotAssignment>,
    gems: StatLine,
    reforges: StatLine,
    gear_totals: StatLine,
    totals: StatLine,
    fully_locked: bool,
}

impl Solution {
    pub(crate) fn generated(
        locked: impl IntoIterator<Item = Slot>,
        unique_slots: &[Slot],
        assignment: &[SlotAssignment],
        gear_totals: StatLine,
        allocation: Allocation,
    ) -> Self {
        let mut slots: Vec<Slot> = locked.into_iter().collect();
        slots.extend(assignment.iter().map(|a| a.slot));

        Solution {
            slots,
            unique_slots: unique_slots.to_vec(),
            assignment: assignment.to_vec(),
            gems: allocation.gems,
            reforges: allocation.reforges,
            gear_totals,
            totals: allocation.totals,
            fully_locked: false,
        }
    }

    pub(crate) fn fully_locked(
        locked: impl IntoIterator<Item = Slot>,
        gear_totals: StatLine,
        allocation: Allocation,
    ) -> Self {
        Solution {
            slots: locked.into_iter().collect(),
            unique_slots: Vec::new(),
            assignment: Vec::new(),
            gems: allocation.gems,
            reforges: allocation.reforges,
            gear_totals,
            totals: allocation.totals,
            fully_locked: true,
        }
    }

    /// All ten slots, locked first
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Generated slots that hold a unique piece
    pub fn unique_slots(&self) -> &[Slot] {
        &self.unique_slots
    }

    pub fn assignment(&self) -> &[SlotAssignment] {
        &self.assignment
    }

    /// Gems spent per statistic
    pub fn gems(&self) -> &StatLine {
        &self.gems
    }

    /// Reforges spent per statistic
    pub fn reforges(&self) -> &StatLine {
        &self.reforges
    }

    /// Totals before gems and reforges
    pub fn gear_totals(&self) -> &StatLine {
        &self.gear_totals
    }

    /// Totals after gems and reforges
    pub fn totals(&self) -> &StatLine {
        &self.totals
    }

    /// The loadout was validated as-is with nothing generated
    pub fn is_fully_locked(&self) -> bool {
        self.fully_locked
    }
}
