//! Core types shared by every part of the solver

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut};
use std::str::FromStr;

/// Gems and reforges available to a build before locked gear is deducted.
/// Ten gear pieces plus the weapon.
pub const POOL_CAPACITY: u32 = 11;

/// Number of gear slots in a full build (the weapon is not counted)
pub const GEAR_SLOT_COUNT: usize = 10;

/// Maximum number of unique gear pieces, excluding the weapon
pub const MAX_UNIQUE_PIECES: u8 = 6;

/// Character statistic
///
/// Declaration order is the display order and the allocator's tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stat {
    #[serde(alias = "crit")]
    Crit,
    #[serde(alias = "haste")]
    Haste,
    #[serde(alias = "mastery")]
    Mastery,
    #[serde(alias = "versatility")]
    Versatility,
    #[serde(alias = "luck")]
    Luck,
}

impl Stat {
    pub const COUNT: usize = 5;

    /// Get all statistics in declaration order
    pub fn all() -> &'static [Stat] {
        &[
            Stat::Crit,
            Stat::Haste,
            Stat::Mastery,
            Stat::Versatility,
            Stat::Luck,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Stat::Crit => "Crit",
            Stat::Haste => "Haste",
            Stat::Mastery => "Mastery",
            Stat::Versatility => "Versatility",
            Stat::Luck => "Luck",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stat::all()
            .iter()
            .copied()
            .find(|stat| stat.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown stat: {s}"))
    }
}

/// Gear slot (the weapon is tracked separately and is never a `Slot`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Slot {
    #[serde(alias = "earrings")]
    Earrings,
    #[serde(alias = "ring")]
    Ring,
    #[serde(alias = "charm")]
    Charm,
    #[serde(alias = "necklace")]
    Necklace,
    #[serde(alias = "helmet")]
    Helmet,
    #[serde(alias = "armor")]
    Armor,
    #[serde(alias = "gauntlets")]
    Gauntlets,
    #[serde(alias = "boots")]
    Boots,
    #[serde(rename = "Bracelet(L)", alias = "bracelet_left")]
    BraceletLeft,
    #[serde(rename = "Bracelet(R)", alias = "bracelet_right")]
    BraceletRight,
}

impl Slot {
    /// Get all gear slots
    pub fn all() -> &'static [Slot] {
        &[
            Slot::Earrings,
            Slot::Ring,
            Slot::Charm,
            Slot::Necklace,
            Slot::Helmet,
            Slot::Armor,
            Slot::Gauntlets,
            Slot::Boots,
            Slot::BraceletLeft,
            Slot::BraceletRight,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Slot::Earrings => "Earrings",
            Slot::Ring => "Ring",
            Slot::Charm => "Charm",
            Slot::Necklace => "Necklace",
            Slot::Helmet => "Helmet",
            Slot::Armor => "Armor",
            Slot::Gauntlets => "Gauntlets",
            Slot::Boots => "Boots",
            Slot::BraceletLeft => "Bracelet(L)",
            Slot::BraceletRight => "Bracelet(R)",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Class attribute, selects which statistic each slot forbids
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Strength,
    Agility,
    Intellect,
}

impl Attribute {
    pub fn all() -> &'static [Attribute] {
        &[Attribute::Strength, Attribute::Agility, Attribute::Intellect]
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Attribute::Strength => "Strength",
            Attribute::Agility => "Agility",
            Attribute::Intellect => "Intellect",
        };
        f.write_str(name)
    }
}

/// Assumed value of a single gem
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GemValue {
    Min,
    #[default]
    Avg,
    Max,
}

/// The two statistics every unique piece (and the weapon) grants for a role
pub type UniquePair = [Stat; 2];

/// One value per statistic
///
/// Used for stat totals as well as per-stat gem and reforge spend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Stat, u32>", into = "BTreeMap<Stat, u32>")]
pub struct StatLine([u32; Stat::COUNT]);

impl StatLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: Stat) -> u32 {
        self.0[stat.index()]
    }

    pub fn credit(&mut self, stat: Stat, value: u32) {
        self.0[stat.index()] += value;
    }

    /// Sum across every statistic
    pub fn sum(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0)
    }

    /// Iterate `(stat, value)` in declaration order, zeros included
    pub fn iter(&self) -> impl Iterator<Item = (Stat, u32)> + '_ {
        Stat::all().iter().map(move |&stat| (stat, self.get(stat)))
    }

    /// Iterate only the statistics with a non-zero value
    pub fn non_zero(&self) -> impl Iterator<Item = (Stat, u32)> + '_ {
        self.iter().filter(|&(_, v)| v > 0)
    }
}

impl Index<Stat> for StatLine {
    type Output = u32;

    fn index(&self, stat: Stat) -> &u32 {
        &self.0[stat.index()]
    }
}

impl IndexMut<Stat> for StatLine {
    fn index_mut(&mut self, stat: Stat) -> &mut u32 {
        &mut self.0[stat.index()]
    }
}

impl AddAssign for StatLine {
    fn add_assign(&mut self, rhs: StatLine) {
        for (lhs, rhs) in self.0.iter_mut().zip(rhs.0) {
            *lhs += rhs;
        }
    }
}

impl Add for StatLine {
    type Output = StatLine;

    fn add(mut self, rhs: StatLine) -> StatLine {
        self += rhs;
        self
    }
}

impl From<BTreeMap<Stat, u32>> for StatLine {
    fn from(map: BTreeMap<Stat, u32>) -> Self {
        let mut line = StatLine::new();
        for (stat, value) in map {
            line[stat] = value;
        }
        line
    }
}

impl From<StatLine> for BTreeMap<Stat, u32> {
    fn from(line: StatLine) -> Self {
        line.non_zero().collect()
    }
}

/// Gem and reforge counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourcePool {
    pub gems: u32,
    pub reforges: u32,
}

impl ResourcePool {
    /// Full pool for a build with nothing locked
    pub fn full() -> Self {
        ResourcePool {
            gems: POOL_CAPACITY,
            reforges: POOL_CAPACITY,
        }
    }
}

/// Minimum statistic thresholds
///
/// A missing entry or a zero threshold means the statistic is unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Requirements(BTreeMap<Stat, u32>);

impl Requirements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style threshold setter
    pub fn with(mut self, stat: Stat, threshold: u32) -> Self {
        self.set(stat, threshold);
        self
    }

    /// Set a threshold; zero removes the requirement
    pub fn set(&mut self, stat: Stat, threshold: u32) {
        if threshold == 0 {
            self.0.remove(&stat);
        } else {
            self.0.insert(stat, threshold);
        }
    }

    pub fn threshold(&self, stat: Stat) -> u32 {
        self.0.get(&stat).copied().unwrap_or(0)
    }

    /// Positive thresholds in `Stat` order
    pub fn iter(&self) -> impl Iterator<Item = (Stat, u32)> + '_ {
        self.0.iter().map(|(&s, &t)| (s, t)).filter(|&(_, t)| t > 0)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Whether every positive threshold is met by `totals`
    pub fn is_met_by(&self, totals: &StatLine) -> bool {
        self.iter().all(|(stat, threshold)| totals[stat] >= threshold)
    }
}

impl FromIterator<(Stat, u32)> for Requirements {
    fn from_iter<I: IntoIterator<Item = (Stat, u32)>>(iter: I) -> Self {
        let mut reqs = Requirements::new();
        for (stat, threshold) in iter {
            reqs.set(stat, threshold);
        }
        reqs
    }
}
