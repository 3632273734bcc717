//! Statistic assignments for a fixed slot selection

use crate::config::GearTierValues;
use crate::types::{Slot, Stat, StatLine, UniquePair};
use serde::{Deserialize, Serialize};

/// Statistics carried by one generated piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotStats {
    Unique { stats: UniquePair },
    Regular { main: Stat, sub: Stat },
}

impl SlotStats {
    pub fn is_unique(&self) -> bool {
        matches!(self, SlotStats::Unique { .. })
    }

    /// Add this piece's stats to `totals`
    pub fn apply(&self, tier: &GearTierValues, totals: &mut StatLine) {
        match *self {
            SlotStats::Unique { stats: [a, b] } => {
                totals.credit(a, tier.primary);
                totals.credit(b, tier.primary);
            }
            SlotStats::Regular { main, sub } => {
                totals.credit(main, tier.primary);
                totals.credit(sub, tier.secondary);
            }
        }
    }
}

/// One generated slot and its statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotAssignment {
    pub slot: Slot,
    #[serde(flatten)]
    pub stats: SlotStats,
}

/// Every ordered (main, sub) pair of distinct statistics, main outermost
pub fn regular_choices(valid: &[Stat]) -> Vec<SlotStats> {
    let mut choices = Vec::with_capacity(valid.len() * valid.len().saturating_sub(1));
    for &main in valid {
        for &sub in valid {
            if main != sub {
                choices.push(SlotStats::Regular { main, sub });
            }
        }
    }
    choices
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    Fresh,
    Running,
    Exhausted,
}

/// Odometer over the per-slot choices of a slot selection
///
/// The first slot is the most significant digit and the last slot turns
/// fastest. The cursor owns a fixed-size buffer that is rewritten in place
/// on every `advance`, and `reset` rewinds it to the first assignment.
#[derive(Debug, Clone)]
pub struct StatAssignments {
    choices: Vec<Vec<SlotStats>>,
    counters: Vec<usize>,
    buffer: Vec<SlotAssignment>,
    state: CursorState,
}

impl StatAssignments {
    pub fn new(slots: Vec<(Slot, Vec<SlotStats>)>) -> Self {
        let mut choices = Vec::with_capacity(slots.len());
        let mut buffer = Vec::with_capacity(slots.len());
        for (slot, options) in slots {
            if let Some(&first) = options.first() {
                buffer.push(SlotAssignment { slot, stats: first });
            }
            choices.push(options);
        }
        let counters = vec![0; choices.len()];
        let state = if buffer.len() == choices.len() {
            CursorState::Fresh
        } else {
            // Some slot has no legal choice
            CursorState::Exhausted
        };

        StatAssignments {
            choices,
            counters,
            buffer,
            state,
        }
    }

    /// Number of assignments the cursor will produce
    pub fn total(&self) -> u128 {
        self.choices.iter().map(|c| c.len() as u128).product()
    }

    /// Step to the next assignment
    pub fn advance(&mut self) -> Option<&[SlotAssignment]> {
        match self.state {
            CursorState::Exhausted => None,
            CursorState::Fresh => {
                self.state = CursorState::Running;
                Some(self.buffer.as_slice())
            }
            CursorState::Running => {
                for i in (0..self.choices.len()).rev() {
                    self.counters[i] += 1;
                    if self.counters[i] < self.choices[i].len() {
                        self.buffer[i].stats = self.choices[i][self.counters[i]];
                        return Some(self.buffer.as_slice());
                    }
                    self.counters[i] = 0;
                    self.buffer[i].stats = self.choices[i][0];
                }
                self.state = CursorState::Exhausted;
                None
            }
        }
    }

    /// Rewind to the first assignment
    pub fn reset(&mut self) {
        if self.buffer.len() != self.choices.len() {
            return;
        }
        for (i, counter) in self.counters.iter_mut().enumerate() {
            *counter = 0;
            self.buffer[i].stats = self.choices[i][0];
        }
        self.state = CursorState::Fresh;
    }
}
