//! Search space - lazy enumeration of slot selections, unique placements
//! and statistic assignments

mod assignment;
mod combinations;

pub use assignment::{regular_choices, SlotAssignment, SlotStats, StatAssignments};
pub use combinations::Combinations;

use crate::config::Ruleset;
use crate::locked::LockedSet;
use crate::types::{Attribute, Slot, UniquePair, GEAR_SLOT_COUNT};
use std::collections::BTreeMap;

/// The structurally legal candidates left once locked gear is carved out
///
/// Enumeration order is slot selection outermost, then unique placement,
/// then statistic assignment.
#[derive(Debug, Clone)]
pub struct SearchSpace {
    remaining: usize,
    mandatory: Vec<Slot>,
    optional: Vec<Slot>,
    unique_eligible: Vec<Slot>,
    unique_target: usize,
    pair: UniquePair,
    regular: BTreeMap<Slot, Vec<SlotStats>>,
}

impl SearchSpace {
    /// Build the space for every slot not in `locked`
    ///
    /// `requested_unique` is capped at the number of unlocked slots that may
    /// hold unique gear.
    pub fn new(
        rules: &Ruleset,
        attribute: Attribute,
        pair: UniquePair,
        locked: &LockedSet,
        requested_unique: usize,
    ) -> Self {
        let unlocked = |slots: &[Slot]| -> Vec<Slot> {
            slots.iter().copied().filter(|&s| !locked.is_locked(s)).collect()
        };

        let mandatory = unlocked(&rules.mandatory_slots);
        let optional = unlocked(&rules.optional_slots);
        let unique_eligible = unlocked(&rules.unique_slots);
        let unique_target = requested_unique.min(unique_eligible.len());

        let regular = mandatory
            .iter()
            .chain(&optional)
            .map(|&slot| (slot, regular_choices(&rules.valid_stats_for(slot, attribute))))
            .collect();

        SearchSpace {
            remaining: GEAR_SLOT_COUNT.saturating_sub(locked.len()),
            mandatory,
            optional,
            unique_eligible,
            unique_target,
            pair,
            regular,
        }
    }

    /// Slots still to fill
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Unique pieces each candidate carries
    pub fn unique_target(&self) -> usize {
        self.unique_target
    }

    /// Every selection of slots to fill, mandatory slots first
    ///
    /// Empty when the unlocked mandatory and optional slots cannot add up to
    /// exactly the remaining count.
    pub fn slot_selections(&self) -> SlotSelections {
        let optional = self
            .remaining
            .checked_sub(self.mandatory.len())
            .filter(|&needed| needed <= self.optional.len())
            .map(|needed| Combinations::new(self.optional.clone(), needed));

        if optional.is_none() {
            tracing::debug!(
                remaining = self.remaining,
                mandatory = self.mandatory.len(),
                optional = self.optional.len(),
                "no slot selection fits the remaining slots"
            );
        }

        SlotSelections {
            mandatory: self.mandatory.clone(),
            optional,
        }
    }

    /// Every way to place the unique pieces within `selection`
    pub fn unique_placements(&self, selection: &[Slot]) -> Combinations<Slot> {
        let eligible: Vec<Slot> = selection
            .iter()
            .copied()
            .filter(|s| self.unique_eligible.contains(s))
            .collect();
        Combinations::new(eligible, self.unique_target)
    }

    /// Cursor over every statistic assignment of `selection`
    pub fn assignments(&self, selection: &[Slot], unique: &[Slot]) -> StatAssignments {
        let slots = selection
            .iter()
            .map(|&slot| {
                let choices = if unique.contains(&slot) {
                    vec![SlotStats::Unique { stats: self.pair }]
                } else {
                    self.regular.get(&slot).cloned().unwrap_or_default()
                };
                (slot, choices)
            })
            .collect();
        StatAssignments::new(slots)
    }
}

/// Iterator over slot selections
#[derive(Debug, Clone)]
pub struct SlotSelections {
    mandatory: Vec<Slot>,
    optional: Option<Combinations<Slot>>,
}

impl Iterator for SlotSelections {
    type Item = Vec<Slot>;

    fn next(&mut self) -> Option<Vec<Slot>> {
        let chosen = self.optional.as_mut()?.next()?;
        let mut selection = self.mandatory.clone();
        selection.extend(chosen);
        Some(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locked::LockedPiece;
    use crate::types::Stat;

    const PAIR: UniquePair = [Stat::Crit, Stat::Mastery];

    #[test]
    fn test_single_selection_without_locks() {
        let rules = Ruleset::standard();
        let space = SearchSpace::new(&rules, Attribute::Agility, PAIR, &LockedSet::new(), 6);

        let selections: Vec<_> = space.slot_selections().collect();
        assert_eq!(selections.len(), 1);
        assert_eq!(selections[0].len(), 10);
        assert_eq!(&selections[0][..4], &rules.mandatory_slots[..]);
        assert_eq!(space.remaining(), 10);
        assert_eq!(space.unique_target(), 6);
    }

    #[test]
    fn test_locked_slots_are_excluded() {
        let rules = Ruleset::standard();
        let mut locked = LockedSet::new();
        locked.add_piece(LockedPiece::unique(Slot::Helmet)).unwrap();
        locked.add_piece(LockedPiece::regular(Slot::Ring, Stat::Crit, Stat::Haste)).unwrap();

        let space = SearchSpace::new(&rules, Attribute::Agility, PAIR, &locked, 6);
        assert_eq!(space.remaining(), 8);
        // Helmet is locked, so only five unique-eligible slots remain
        assert_eq!(space.unique_target(), 5);

        let selection = space.slot_selections().next().unwrap();
        assert!(!selection.contains(&Slot::Helmet));
        assert!(!selection.contains(&Slot::Ring));
        assert_eq!(selection.len(), 8);
    }

    #[test]
    fn test_unique_placements() {
        let rules = Ruleset::standard();
        let space = SearchSpace::new(&rules, Attribute::Strength, PAIR, &LockedSet::new(), 2);
        let selection = space.slot_selections().next().unwrap();

        let placements: Vec<_> = space.unique_placements(&selection).collect();
        assert_eq!(placements.len(), 15);
        assert_eq!(placements[0], vec![Slot::Helmet, Slot::Armor]);
        assert_eq!(placements[14], vec![Slot::BraceletLeft, Slot::BraceletRight]);

        let none = SearchSpace::new(&rules, Attribute::Strength, PAIR, &LockedSet::new(), 0);
        let placements: Vec<_> = none.unique_placements(&selection).collect();
        assert_eq!(placements, vec![Vec::<Slot>::new()]);
    }

    #[test]
    fn test_placement_larger_than_selection_is_empty() {
        let rules = Ruleset::standard();
        let space = SearchSpace::new(&rules, Attribute::Strength, PAIR, &LockedSet::new(), 3);
        // A selection containing only two eligible slots
        let selection = [Slot::Earrings, Slot::Helmet, Slot::Boots];
        assert_eq!(space.unique_placements(&selection).count(), 0);
    }

    #[test]
    fn test_assignment_count() {
        let rules = Ruleset::standard();
        let space = SearchSpace::new(&rules, Attribute::Agility, PAIR, &LockedSet::new(), 6);
        let selection = space.slot_selections().next().unwrap();
        let unique = space.unique_placements(&selection).next().unwrap();

        // Four regular slots with four valid stats each: 12 ordered pairs per slot
        let cursor = space.assignments(&selection, &unique);
        assert_eq!(cursor.total(), 12u128.pow(4));
    }

    #[test]
    fn test_assignments_respect_forbidden_stats() {
        let rules = Ruleset::standard();
        let attribute = Attribute::Intellect;
        let space = SearchSpace::new(&rules, attribute, PAIR, &LockedSet::new(), 6);
        let selection = space.slot_selections().next().unwrap();
        let unique = space.unique_placements(&selection).next().unwrap();
        let mut cursor = space.assignments(&selection, &unique);

        let mut seen = 0;
        while let Some(assignment) = cursor.advance() {
            for a in assignment {
                if let SlotStats::Regular { main, sub } = a.stats {
                    let forbidden = rules.forbidden_stat(a.slot, attribute);
                    assert_ne!(main, sub);
                    assert_ne!(Some(main), forbidden);
                    assert_ne!(Some(sub), forbidden);
                }
            }
            seen += 1;
            if seen == 500 {
                break;
            }
        }
        assert_eq!(seen, 500);
    }

    #[test]
    fn test_too_few_optional_slots_fails_fast() {
        let mut rules = Ruleset::standard();
        // Four mandatory plus two optional slots can never fill ten
        rules.optional_slots.truncate(2);
        let space = SearchSpace::new(&rules, Attribute::Agility, PAIR, &LockedSet::new(), 0);
        assert_eq!(space.slot_selections().count(), 0);
    }
}
