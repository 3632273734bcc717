//! Solver - walks the search space and keeps every candidate the allocator
//! can bring up to the requirements
//!
//! Candidates are produced lazily in enumeration order. `solve` applies the
//! build's solution cap; hosts that want to stop early simply stop pulling
//! from [`GearSolver::solutions`].

mod allocator;
mod solution;
mod totals;

pub use allocator::{Allocation, Allocator};
pub use solution::Solution;
pub use totals::{weapon_stats, TotalsCalculator};

use crate::config::{BuildConfig, BuildError, GearTierValues, Ruleset, ValueTables};
use crate::locked::LockedSet;
use crate::search::{Combinations, SearchSpace, SlotSelections, StatAssignments};
use crate::types::{
    Attribute, Requirements, ResourcePool, Slot, StatLine, UniquePair, MAX_UNIQUE_PIECES,
};

/// Solver for one build against a set of locked gear
#[derive(Debug, Clone)]
pub struct GearSolver<'a> {
    locked: &'a LockedSet,
    attribute: Attribute,
    pair: UniquePair,
    tier: GearTierValues,
    weapon_value: u32,
    gem_value: u32,
    requirements: Requirements,
    max_solutions: Option<usize>,
    locked_totals: StatLine,
    space: SearchSpace,
    totals: TotalsCalculator,
    allocator: Allocator,
}

impl<'a> GearSolver<'a> {
    /// Resolve a build against the rules and value tables
    ///
    /// Fails on an unknown class, role or tier, or a unique count above the
    /// maximum. Locked pieces that break the rules are logged, not rejected.
    pub fn new(
        rules: &Ruleset,
        values: &ValueTables,
        config: &BuildConfig,
        locked: &'a LockedSet,
    ) -> Result<Self, BuildError> {
        let attribute = rules.attribute_of(&config.class_name)?;
        let pair = rules.unique_pair_for(&config.class_name, &config.role)?;
        let tier = values.gear_tier(config.gear_tier)?;
        let weapon_value = values.weapon_value(config.weapon_tier)?;
        if config.unique_count > MAX_UNIQUE_PIECES {
            return Err(BuildError::TooManyUniquePieces(config.unique_count));
        }
        let gem_value = values.gem_value(config.gem_value);

        for (slot, violation) in locked.validate(rules, attribute) {
            tracing::warn!(%slot, %violation, "locked piece breaks the rules");
        }

        let requested_unique = usize::from(config.unique_count);
        if requested_unique > 0 && !tier.unique_sets {
            tracing::warn!(
                gear_tier = tier.tier,
                unique_count = requested_unique,
                "gear tier has no unique sets"
            );
        }

        let space = SearchSpace::new(rules, attribute, pair, locked, requested_unique);
        if space.unique_target() < requested_unique && !locked.is_full() {
            tracing::warn!(
                requested = requested_unique,
                placed = space.unique_target(),
                "not enough unlocked slots for the requested unique pieces"
            );
        }

        let locked_totals = locked.total_stats(&tier, pair, gem_value);
        let totals = TotalsCalculator::new(locked_totals, weapon_stats(pair, weapon_value), tier);
        let allocator = Allocator::new(locked.available_resources(), gem_value, tier.reforge);

        Ok(GearSolver {
            locked,
            attribute,
            pair,
            tier,
            weapon_value,
            gem_value,
            requirements: config.requirements.clone(),
            max_solutions: config.max_solutions,
            locked_totals,
            space,
            totals,
            allocator,
        })
    }

    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    pub fn unique_pair(&self) -> UniquePair {
        self.pair
    }

    pub fn tier(&self) -> &GearTierValues {
        &self.tier
    }

    pub fn weapon_value(&self) -> u32 {
        self.weapon_value
    }

    /// Value of one gem under the build's assumption
    pub fn gem_value(&self) -> u32 {
        self.gem_value
    }

    pub fn locked(&self) -> &LockedSet {
        self.locked
    }

    pub fn requirements(&self) -> &Requirements {
        &self.requirements
    }

    /// Gems and reforges left for the search to spend
    pub fn available_resources(&self) -> ResourcePool {
        self.allocator.pool()
    }

    pub fn search_space(&self) -> &SearchSpace {
        &self.space
    }

    /// Lazy stream of accepted candidates in enumeration order
    pub fn solutions(&self) -> Solutions<'_> {
        let stage = if self.locked.is_full() {
            Stage::FullyLocked
        } else {
            Stage::Search(SearchState {
                selections: self.space.slot_selections(),
                selection: Vec::new(),
                placements: None,
                unique: Vec::new(),
                cursor: None,
            })
        };
        Solutions {
            solver: self,
            stage,
            candidates: 0,
        }
    }

    /// Collect accepted candidates up to the build's cap
    pub fn solve(&self) -> Vec<Solution> {
        if self.max_solutions.unwrap_or(0) == 0 {
            tracing::warn!("no solution cap set, enumerating the full search space");
        }
        self.solve_with_cap(self.max_solutions)
    }

    /// Collect accepted candidates, stopping after `cap`
    ///
    /// A cap of `None` or zero means every candidate.
    pub fn solve_with_cap(&self, cap: Option<usize>) -> Vec<Solution> {
        tracing::debug!(
            attribute = %self.attribute,
            locked = self.locked.len(),
            unique = self.space.unique_target(),
            gems = self.allocator.pool().gems,
            reforges = self.allocator.pool().reforges,
            "solve started"
        );

        let mut stream = self.solutions();
        let solutions: Vec<Solution> = match cap.filter(|&n| n > 0) {
            Some(n) => stream.by_ref().take(n).collect(),
            None => stream.by_ref().collect(),
        };

        tracing::debug!(
            solutions = solutions.len(),
            candidates = stream.candidates(),
            "solve finished"
        );
        solutions
    }

    /// Upper bound per statistic if everything went into it
    ///
    /// Unique-pair statistics assume every unlocked slot contributes its
    /// primary value (twice for unique pieces) plus the weapon. The others
    /// assume every unlocked slot gives both primary and secondary to it.
    /// Both add the whole remaining pool and the locked totals.
    pub fn theoretical_maximums(&self) -> StatLine {
        let unlocked = self.space.remaining() as u32;
        let unique = self.space.unique_target() as u32;
        let regular = unlocked.saturating_sub(unique);
        let pool = self.allocator.pool();
        let extras = pool.gems * self.gem_value + pool.reforges * self.tier.reforge;

        let mut maximums = StatLine::new();
        for &stat in crate::types::Stat::all() {
            let gear = if self.pair.contains(&stat) {
                self.weapon_value + unique * self.tier.primary * 2 + regular * self.tier.primary
            } else {
                unlocked * (self.tier.primary + self.tier.secondary)
            };
            maximums.credit(stat, gear + extras + self.locked_totals[stat]);
        }
        maximums
    }
}

/// Lazy stream of accepted candidates
///
/// Dropping the stream early cancels the search.
#[derive(Debug)]
pub struct Solutions<'s> {
    solver: &'s GearSolver<'s>,
    stage: Stage,
    candidates: u64,
}

impl Solutions<'_> {
    /// Candidates evaluated so far, accepted or not
    pub fn candidates(&self) -> u64 {
        self.candidates
    }
}

#[derive(Debug)]
enum Stage {
    FullyLocked,
    Search(SearchState),
    Done,
}

#[derive(Debug)]
struct SearchState {
    selections: SlotSelections,
    selection: Vec<Slot>,
    placements: Option<Combinations<Slot>>,
    unique: Vec<Slot>,
    cursor: Option<StatAssignments>,
}

impl SearchState {
    fn next_solution(&mut self, solver: &GearSolver<'_>, candidates: &mut u64) -> Option<Solution> {
        loop {
            if let Some(cursor) = self.cursor.as_mut() {
                while let Some(assignment) = cursor.advance() {
                    *candidates += 1;
                    let gear_totals = solver.totals.totals(assignment);
                    let allocation = solver.allocator.allocate(&gear_totals, &solver.requirements);
                    if let Some(allocation) = allocation {
                        return Some(Solution::generated(
                            solver.locked.slots(),
                            &self.unique,
                            assignment,
                            gear_totals,
                            allocation,
                        ));
                    }
                }
                self.cursor = None;
            }

            if let Some(placements) = self.placements.as_mut() {
                if let Some(unique) = placements.next() {
                    self.cursor = Some(solver.space.assignments(&self.selection, &unique));
                    self.unique = unique;
                    continue;
                }
                self.placements = None;
            }

            let selection = self.selections.next()?;
            self.placements = Some(solver.space.unique_placements(&selection));
            self.selection = selection;
        }
    }
}

impl Iterator for Solutions<'_> {
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        let solver = self.solver;
        match self.stage {
            Stage::Done => None,
            Stage::FullyLocked => {
                self.stage = Stage::Done;
                self.candidates += 1;
                let gear_totals = solver.locked_totals;
                solver
                    .allocator
                    .allocate(&gear_totals, &solver.requirements)
                    .map(|allocation| {
                        Solution::fully_locked(solver.locked.slots(), gear_totals, allocation)
                    })
            }
            Stage::Search(ref mut search) => {
                let found = search.next_solution(solver, &mut self.candidates);
                if found.is_none() {
                    self.stage = Stage::Done;
                }
                found
            }
        }
    }
}
