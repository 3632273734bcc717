//! Totals calculation for one candidate

use crate::config::GearTierValues;
use crate::search::SlotAssignment;
use crate::types::{StatLine, UniquePair};

/// Stats the weapon grants: its unique pair at the weapon tier value
pub fn weapon_stats(pair: UniquePair, weapon_value: u32) -> StatLine {
    let mut stats = StatLine::new();
    stats.credit(pair[0], weapon_value);
    stats.credit(pair[1], weapon_value);
    stats
}

/// Adds generated slots on top of the fixed locked + weapon contribution
#[derive(Debug, Clone, Copy)]
pub struct TotalsCalculator {
    base: StatLine,
    tier: GearTierValues,
}

impl TotalsCalculator {
    pub fn new(locked: StatLine, weapon: StatLine, tier: GearTierValues) -> Self {
        TotalsCalculator {
            base: locked + weapon,
            tier,
        }
    }

    /// Locked gear plus weapon, before any generated slot
    pub fn base(&self) -> StatLine {
        self.base
    }

    pub fn totals(&self, assignment: &[SlotAssignment]) -> StatLine {
        let mut totals = self.base;
        for slot in assignment {
            slot.stats.apply(&self.tier, &mut totals);
        }
        totals
    }
}
