//! Ruleset - static game rules for slots, classes and forbidden statistics

use super::{BuildError, ConfigError};
use crate::types::{Attribute, Slot, Stat, UniquePair, GEAR_SLOT_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A role (subclass) and the statistics its unique gear grants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRules {
    pub name: String,
    pub unique_pair: UniquePair,
}

/// A class, its attribute and its roles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRules {
    pub name: String,
    pub attribute: Attribute,
    pub roles: Vec<RoleRules>,
}

/// One forbidden statistic on one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForbiddenStat {
    pub slot: Slot,
    pub stat: Stat,
}

/// Forbidden statistics for every slot of one attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForbiddenTable {
    pub attribute: Attribute,
    #[serde(default)]
    pub slots: Vec<ForbiddenStat>,
}

/// Static domain knowledge
///
/// Slot lists are ordered; the search enumerates slots in exactly this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    pub mandatory_slots: Vec<Slot>,
    pub optional_slots: Vec<Slot>,
    pub unique_slots: Vec<Slot>,
    pub classes: Vec<ClassRules>,
    pub forbidden: Vec<ForbiddenTable>,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::standard()
    }
}

impl Ruleset {
    /// The shipped rules
    pub fn standard() -> Self {
        use Attribute::*;
        use Slot::*;
        use Stat::*;

        let class = |name: &str, attribute, roles: [(&str, UniquePair); 2]| ClassRules {
            name: name.to_string(),
            attribute,
            roles: roles
                .into_iter()
                .map(|(name, unique_pair)| RoleRules {
                    name: name.to_string(),
                    unique_pair,
                })
                .collect(),
        };

        let table = |attribute, rows: [(Slot, Stat); GEAR_SLOT_COUNT]| ForbiddenTable {
            attribute,
            slots: rows
                .into_iter()
                .map(|(slot, stat)| ForbiddenStat { slot, stat })
                .collect(),
        };

        Ruleset {
            mandatory_slots: vec![Earrings, Ring, Charm, Necklace],
            optional_slots: vec![Helmet, Armor, Gauntlets, Boots, BraceletLeft, BraceletRight],
            unique_slots: vec![Helmet, Armor, Gauntlets, Boots, BraceletLeft, BraceletRight],
            classes: vec![
                class(
                    "Stormblade",
                    Agility,
                    [("Iaido", [Crit, Mastery]), ("Moonstrike", [Luck, Haste])],
                ),
                class(
                    "Frost Mage",
                    Intellect,
                    [("Icicle", [Crit, Luck]), ("Frost Beam", [Haste, Mastery])],
                ),
                class(
                    "Wind Knight",
                    Strength,
                    [("Skyward", [Crit, Luck]), ("Vanguard", [Haste, Mastery])],
                ),
                class(
                    "Verdant Oracle",
                    Intellect,
                    [("Smite", [Mastery, Luck]), ("Lifebind", [Mastery, Haste])],
                ),
                class(
                    "Heavy Guardian",
                    Strength,
                    [("Block", [Mastery, Luck]), ("Earthfort", [Mastery, Versatility])],
                ),
                class(
                    "Marksman",
                    Agility,
                    [("Falconry", [Crit, Haste]), ("Wildpack", [Haste, Mastery])],
                ),
                class(
                    "Shield Knight",
                    Strength,
                    [("Shield", [Haste, Mastery]), ("Recovery", [Crit, Mastery])],
                ),
                class(
                    "Beat Performer",
                    Intellect,
                    [("Dissonance", [Haste, Luck]), ("Concerto", [Crit, Haste])],
                ),
            ],
            forbidden: vec![
                table(
                    Agility,
                    [
                        (Helmet, Haste),
                        (Armor, Mastery),
                        (Gauntlets, Crit),
                        (Boots, Crit),
                        (Earrings, Haste),
                        (Necklace, Mastery),
                        (Ring, Versatility),
                        (BraceletLeft, Versatility),
                        (BraceletRight, Luck),
                        (Charm, Luck),
                    ],
                ),
                table(
                    Intellect,
                    [
                        (Helmet, Crit),
                        (Armor, Crit),
                        (Gauntlets, Versatility),
                        (Boots, Luck),
                        (Earrings, Versatility),
                        (Necklace, Luck),
                        (Ring, Mastery),
                        (BraceletLeft, Haste),
                        (BraceletRight, Mastery),
                        (Charm, Haste),
                    ],
                ),
                table(
                    Strength,
                    [
                        (Helmet, Versatility),
                        (Armor, Luck),
                        (Gauntlets, Haste),
                        (Boots, Mastery),
                        (Earrings, Mastery),
                        (Necklace, Haste),
                        (Ring, Luck),
                        (BraceletLeft, Crit),
                        (BraceletRight, Crit),
                        (Charm, Versatility),
                    ],
                ),
            ],
        }
    }

    fn class(&self, class: &str) -> Option<&ClassRules> {
        self.classes.iter().find(|c| c.name == class)
    }

    /// Attribute of a class
    pub fn attribute_of(&self, class: &str) -> Result<Attribute, BuildError> {
        self.class(class)
            .map(|c| c.attribute)
            .ok_or_else(|| BuildError::UnknownClass(class.to_string()))
    }

    /// Roles belonging to a class (empty for an unknown class)
    pub fn roles_of(&self, class: &str) -> &[RoleRules] {
        self.class(class).map(|c| c.roles.as_slice()).unwrap_or(&[])
    }

    pub fn role_belongs_to_class(&self, class: &str, role: &str) -> bool {
        self.roles_of(class).iter().any(|r| r.name == role)
    }

    /// Statistics granted by unique gear for a class and role
    pub fn unique_pair_for(&self, class: &str, role: &str) -> Result<UniquePair, BuildError> {
        let rules = self
            .class(class)
            .ok_or_else(|| BuildError::UnknownClass(class.to_string()))?;

        rules
            .roles
            .iter()
            .find(|r| r.name == role)
            .map(|r| r.unique_pair)
            .ok_or_else(|| BuildError::UnknownRole {
                class: class.to_string(),
                role: role.to_string(),
            })
    }

    /// The statistic a slot may not carry for an attribute, if any
    pub fn forbidden_stat(&self, slot: Slot, attribute: Attribute) -> Option<Stat> {
        self.forbidden
            .iter()
            .filter(|t| t.attribute == attribute)
            .flat_map(|t| t.slots.iter())
            .find(|f| f.slot == slot)
            .map(|f| f.stat)
    }

    /// Statistics a regular piece in `slot` may carry
    pub fn valid_stats_for(&self, slot: Slot, attribute: Attribute) -> Vec<Stat> {
        let forbidden = self.forbidden_stat(slot, attribute);
        Stat::all()
            .iter()
            .copied()
            .filter(|&stat| Some(stat) != forbidden)
            .collect()
    }

    pub fn is_mandatory(&self, slot: Slot) -> bool {
        self.mandatory_slots.contains(&slot)
    }

    pub fn is_unique_eligible(&self, slot: Slot) -> bool {
        self.unique_slots.contains(&slot)
    }

    /// Check the tables are self-consistent
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for &slot in self.mandatory_slots.iter().chain(&self.optional_slots) {
            if !seen.insert(slot) {
                return Err(ConfigError::ValidationError(format!(
                    "slot {slot} is listed more than once"
                )));
            }
        }
        if let Some(missing) = Slot::all().iter().find(|s| !seen.contains(*s)) {
            return Err(ConfigError::ValidationError(format!(
                "slot {missing} is neither mandatory nor optional"
            )));
        }

        let mut unique_seen = HashSet::new();
        for &slot in &self.unique_slots {
            if !unique_seen.insert(slot) {
                return Err(ConfigError::ValidationError(format!(
                    "unique slot {slot} is listed more than once"
                )));
            }
        }

        let mut class_names = HashSet::new();
        for class in &self.classes {
            if !class_names.insert(class.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "class {} is defined more than once",
                    class.name
                )));
            }
            let mut role_names = HashSet::new();
            for role in &class.roles {
                if !role_names.insert(role.name.as_str()) {
                    return Err(ConfigError::ValidationError(format!(
                        "role {} is defined more than once for {}",
                        role.name, class.name
                    )));
                }
                if role.unique_pair[0] == role.unique_pair[1] {
                    return Err(ConfigError::ValidationError(format!(
                        "role {} grants {} twice",
                        role.name, role.unique_pair[0]
                    )));
                }
            }
        }

        let mut forbidden_seen = HashSet::new();
        for table in &self.forbidden {
            for rule in &table.slots {
                if !forbidden_seen.insert((table.attribute, rule.slot)) {
                    return Err(ConfigError::ValidationError(format!(
                        "{} has more than one forbidden stat on {}",
                        table.attribute, rule.slot
                    )));
                }
            }
        }

        Ok(())
    }
}
