//! Tiered value tables for gear, weapons and gems

use super::{BuildError, ConfigError};
use crate::types::GemValue;
use serde::{Deserialize, Serialize};

/// Stat values granted by one gear tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearTierValues {
    pub tier: u32,
    /// Main stat of regular gear and both stats of unique gear
    pub primary: u32,
    /// Sub stat of regular gear
    pub secondary: u32,
    /// Value of one reforge
    pub reforge: u32,
    /// Whether unique sets drop at this tier
    #[serde(default = "default_unique_sets")]
    pub unique_sets: bool,
}

fn default_unique_sets() -> bool {
    true
}

/// Stat value the weapon grants to each of its two statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponTierValues {
    pub tier: u32,
    pub stat_value: u32,
}

/// Unit value of one gem for each assumption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GemValues {
    #[serde(default = "default_gem_min")]
    pub min: u32,
    #[serde(default = "default_gem_avg")]
    pub avg: u32,
    #[serde(default = "default_gem_max")]
    pub max: u32,
}

impl Default for GemValues {
    fn default() -> Self {
        GemValues {
            min: 50,
            avg: 60,
            max: 70,
        }
    }
}

fn default_gem_min() -> u32 {
    50
}
fn default_gem_avg() -> u32 {
    60
}
fn default_gem_max() -> u32 {
    70
}

/// Lookup tables from tier to stat values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueTables {
    pub gear_tiers: Vec<GearTierValues>,
    pub weapon_tiers: Vec<WeaponTierValues>,
    #[serde(default)]
    pub gems: GemValues,
}

impl Default for ValueTables {
    fn default() -> Self {
        Self::standard()
    }
}

impl ValueTables {
    /// The shipped tables
    pub fn standard() -> Self {
        let gear = |tier, primary, secondary, reforge, unique_sets| GearTierValues {
            tier,
            primary,
            secondary,
            reforge,
            unique_sets,
        };

        ValueTables {
            gear_tiers: vec![
                gear(40, 100, 50, 30, false),
                gear(60, 140, 70, 42, true),
                gear(80, 200, 100, 60, true),
            ],
            weapon_tiers: vec![
                WeaponTierValues { tier: 70, stat_value: 306 },
                WeaponTierValues { tier: 90, stat_value: 384 },
            ],
            gems: GemValues::default(),
        }
    }

    pub fn gear_tier(&self, tier: u32) -> Result<GearTierValues, BuildError> {
        self.gear_tiers
            .iter()
            .find(|t| t.tier == tier)
            .copied()
            .ok_or(BuildError::UnknownGearTier(tier))
    }

    pub fn weapon_value(&self, tier: u32) -> Result<u32, BuildError> {
        self.weapon_tiers
            .iter()
            .find(|t| t.tier == tier)
            .map(|t| t.stat_value)
            .ok_or(BuildError::UnknownWeaponTier(tier))
    }

    pub fn gem_value(&self, assumption: GemValue) -> u32 {
        match assumption {
            GemValue::Min => self.gems.min,
            GemValue::Avg => self.gems.avg,
            GemValue::Max => self.gems.max,
        }
    }

    /// Check that tiers are unique and every unit value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, tier) in self.gear_tiers.iter().enumerate() {
            if self.gear_tiers[..i].iter().any(|t| t.tier == tier.tier) {
                return Err(ConfigError::ValidationError(format!(
                    "gear tier {} is defined more than once",
                    tier.tier
                )));
            }
            if tier.reforge == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "gear tier {} has a zero reforge value",
                    tier.tier
                )));
            }
        }
        for (i, tier) in self.weapon_tiers.iter().enumerate() {
            if self.weapon_tiers[..i].iter().any(|t| t.tier == tier.tier) {
                return Err(ConfigError::ValidationError(format!(
                    "weapon tier {} is defined more than once",
                    tier.tier
                )));
            }
        }
        if self.gems.min == 0 || self.gems.avg == 0 || self.gems.max == 0 {
            return Err(ConfigError::ValidationError(
                "gem values must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
