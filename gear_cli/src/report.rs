//! Plain-text rendering of solutions

use gear_core::{GearSolver, PieceKind, Solution, SlotStats, Stat, StatLine};
use std::fmt;

const RULE: &str = "============================================================";

/// One solution with the context needed to print it
pub struct SolutionReport<'a> {
    pub solver: &'a GearSolver<'a>,
    pub solution: &'a Solution,
    pub number: usize,
}

impl fmt::Display for SolutionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let solver = self.solver;
        let solution = self.solution;
        let tier = solver.tier();
        let [u1, u2] = solver.unique_pair();

        writeln!(f, "{RULE}")?;
        writeln!(f, "SOLUTION #{}", self.number)?;
        writeln!(f, "{RULE}")?;

        let slots: Vec<&str> = solution.slots().iter().map(|s| s.name()).collect();
        writeln!(f, "Slots Used: {}", slots.join(", "))?;

        if !solver.locked().is_empty() {
            writeln!(f, "\n--- LOCKED GEAR ---")?;
            for piece in solver.locked().pieces() {
                let (label, stats) = match piece.kind {
                    PieceKind::Unique => ("UNIQUE", pair_line(u1, u2, tier.primary, tier.primary)),
                    PieceKind::Regular { main, sub } => {
                        ("REGULAR", pair_line(main, sub, tier.primary, tier.secondary))
                    }
                };
                write!(f, "  {:15} [{label}]: {stats}", piece.slot.name())?;
                if let Some(stat) = piece.gem {
                    write!(f, ", {} gem (+{})", stat.name(), solver.gem_value())?;
                }
                if let Some(stat) = piece.reforge {
                    write!(f, ", {} reforge (+{})", stat.name(), tier.reforge)?;
                }
                writeln!(f)?;
            }
        }

        if !solution.assignment().is_empty() {
            writeln!(f, "\n--- GENERATED GEAR ---")?;
            for a in solution.assignment() {
                let (label, stats) = match a.stats {
                    SlotStats::Unique { stats: [s1, s2] } => {
                        ("UNIQUE", pair_line(s1, s2, tier.primary, tier.primary))
                    }
                    SlotStats::Regular { main, sub } => {
                        ("REGULAR", pair_line(main, sub, tier.primary, tier.secondary))
                    }
                };
                writeln!(f, "  {:15} [{label}]: {stats}", a.slot.name())?;
            }
        }

        writeln!(f, "\n--- WEAPON ---")?;
        let weapon = solver.weapon_value();
        writeln!(f, "  {:15} [UNIQUE]: {}", "Weapon", pair_line(u1, u2, weapon, weapon))?;

        let pool = solver.available_resources();
        spent_section(f, "GEMS", "gems", solution.gems(), pool.gems, solver.gem_value())?;
        spent_section(f, "REFORGES", "reforges", solution.reforges(), pool.reforges, tier.reforge)?;

        writeln!(f, "\n--- FINAL STATS ---")?;
        for &stat in Stat::all() {
            let total = solution.totals()[stat];
            let required = solver.requirements().threshold(stat);
            let status = if total >= required { "ok" } else { "SHORT" };
            writeln!(f, "  {:12}: {total:4} {status} (required: {required})", stat.name())?;
        }
        Ok(())
    }
}

fn pair_line(a: Stat, b: Stat, a_value: u32, b_value: u32) -> String {
    format!("{} ({a_value}) + {} ({b_value})", a.name(), b.name())
}

fn spent_section(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    unit: &str,
    spent: &StatLine,
    available: u32,
    value: u32,
) -> fmt::Result {
    writeln!(f, "\n--- {title} ({}/{available} available used) ---", spent.sum())?;
    if spent.is_zero() {
        return writeln!(f, "  None needed");
    }
    for (stat, count) in spent.non_zero() {
        writeln!(f, "  {}: {count} {unit} (+{})", stat.name(), count * value)?;
    }
    Ok(())
}

/// Per-statistic upper bounds against the build's requirements
pub struct MaxStatsReport<'a> {
    pub solver: &'a GearSolver<'a>,
}

impl fmt::Display for MaxStatsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let maximums = self.solver.theoretical_maximums();
        writeln!(f, "{:12}  {:>7}  {:>8}", "Stat", "Maximum", "Required")?;
        for &stat in Stat::all() {
            let max = maximums[stat];
            let required = self.solver.requirements().threshold(stat);
            let note = if required > max { "  unreachable" } else { "" };
            writeln!(f, "{:12}  {max:>7}  {required:>8}{note}", stat.name())?;
        }
        Ok(())
    }
}
