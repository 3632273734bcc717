//! Greedy gem and reforge allocation
//!
//! Gems are spent first, then reforges. Within each phase the largest
//! remaining deficit is served first; equal deficits go in `Stat` order.
//! This is a fixed heuristic, not an optimal search: a candidate that only
//! fits under a different spending order is reported as infeasible.

use crate::types::{Requirements, ResourcePool, Stat, StatLine};

/// Resources spent to close a candidate's deficits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Allocation {
    pub gems: StatLine,
    pub reforges: StatLine,
    /// Totals after gems and reforges are applied
    pub totals: StatLine,
}

/// Spends a fixed pool against requirement deficits
#[derive(Debug, Clone, Copy)]
pub struct Allocator {
    pool: ResourcePool,
    gem_value: u32,
    reforge_value: u32,
}

/// Deficits still open, kept in a fixed buffer
struct Deficits {
    entries: [(Stat, u32); Stat::COUNT],
    len: usize,
}

impl Deficits {
    fn new(totals: &StatLine, requirements: &Requirements) -> Self {
        let mut deficits = Deficits {
            entries: [(Stat::Crit, 0); Stat::COUNT],
            len: 0,
        };
        for (stat, threshold) in requirements.iter() {
            let deficit = threshold.saturating_sub(totals[stat]);
            if deficit > 0 {
                deficits.entries[deficits.len] = (stat, deficit);
                deficits.len += 1;
            }
        }
        deficits
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Serve deficits largest first from `pool` units worth `unit` each
    fn spend(&mut self, pool: u32, unit: u32, spent: &mut StatLine) {
        // Units worth nothing close nothing; leave the phase unspent
        if unit == 0 {
            return;
        }
        let open = &mut self.entries[..self.len];
        open.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let mut remaining = pool;
        for (stat, deficit) in open.iter_mut() {
            if remaining == 0 {
                break;
            }
            let used = deficit.div_ceil(unit).min(remaining);
            spent[*stat] += used;
            *deficit = deficit.saturating_sub(used * unit);
            remaining -= used;
        }

        let mut kept = 0;
        for i in 0..self.len {
            if self.entries[i].1 > 0 {
                self.entries[kept] = self.entries[i];
                kept += 1;
            }
        }
        self.len = kept;
    }
}

impl Allocator {
    pub fn new(pool: ResourcePool, gem_value: u32, reforge_value: u32) -> Self {
        Allocator {
            pool,
            gem_value,
            reforge_value,
        }
    }

    pub fn pool(&self) -> ResourcePool {
        self.pool
    }

    /// Close every deficit, or `None` if the pool runs out first
    pub fn allocate(&self, totals: &StatLine, requirements: &Requirements) -> Option<Allocation> {
        let mut deficits = Deficits::new(totals, requirements);
        if deficits.is_empty() {
            return Some(Allocation {
                totals: *totals,
                ..Allocation::default()
            });
        }
        let mut gems = StatLine::new();
        deficits.spend(self.pool.gems, self.gem_value, &mut gems);

        let mut reforges = StatLine::new();
        if !deficits.is_empty() {
            deficits.spend(self.pool.reforges, self.reforge_value, &mut reforges);
        }

        if !deficits.is_empty() {
            return None;
        }

        let mut final_totals = *totals;
        for (stat, count) in gems.non_zero() {
            final_totals.credit(stat, count * self.gem_value);
        }
        for (stat, count) in reforges.non_zero() {
            final_totals.credit(stat, count * self.reforge_value);
        }

        Some(Allocation {
            gems,
            reforges,
            totals: final_totals,
        })
    }
}
