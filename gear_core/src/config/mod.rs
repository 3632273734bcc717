//! Configuration: game data tables, build configs and presets

mod build;
mod preset;
mod ruleset;
mod values;

pub use build::BuildConfig;
pub use preset::{load_preset, parse_preset, Preset, PRESET_VERSION};
pub use ruleset::{ClassRules, ForbiddenStat, ForbiddenTable, RoleRules, Ruleset};
pub use values::{GearTierValues, GemValues, ValueTables, WeaponTierValues};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// A build that cannot be solved at all
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Unknown class: {0}")]
    UnknownClass(String),
    #[error("Unknown role {role} for class {class}")]
    UnknownRole { class: String, role: String },
    #[error("Invalid gear tier: {0}")]
    UnknownGearTier(u32),
    #[error("Invalid weapon tier: {0}")]
    UnknownWeaponTier(u32),
    #[error("Unique piece count {0} exceeds the maximum of {}", crate::types::MAX_UNIQUE_PIECES)]
    TooManyUniquePieces(u8),
}

/// Rules and value tables loaded together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameData {
    pub rules: Ruleset,
    pub values: ValueTables,
}

impl GameData {
    pub fn standard() -> Self {
        GameData {
            rules: Ruleset::standard(),
            values: ValueTables::standard(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.validate()?;
        self.values.validate()
    }
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load and validate game data from a TOML file
pub fn load_game_data(path: &Path) -> Result<GameData, ConfigError> {
    let data: GameData = load_toml(path)?;
    data.validate()?;
    Ok(data)
}

/// Parse and validate game data from a TOML string
pub fn parse_game_data(content: &str) -> Result<GameData, ConfigError> {
    let data: GameData = parse_toml(content)?;
    data.validate()?;
    Ok(data)
}
