//! Preset snapshots: a named build config plus its locked gear

use super::{BuildConfig, ConfigError, Ruleset};
use crate::locked::LockedSet;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Snapshot format version written by this crate
pub const PRESET_VERSION: &str = "2.2";

/// Named snapshot of a build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub created: NaiveDateTime,
    #[serde(default = "default_version")]
    pub version: String,
    pub config: BuildConfig,
    #[serde(default)]
    pub locked_gear: LockedSet,
}

fn default_version() -> String {
    PRESET_VERSION.to_string()
}

impl Preset {
    /// Snapshot `config` and `locked_gear`, stamped with the local time
    pub fn new(name: impl Into<String>, config: BuildConfig, locked_gear: LockedSet) -> Self {
        Preset {
            name: name.into(),
            created: Local::now().naive_local(),
            version: default_version(),
            config,
            locked_gear,
        }
    }

    /// Pretty-printed JSON
    ///
    /// Locked unique pieces are written with the role's unique pair as their
    /// main and sub stats. Reading ignores those fields for unique pieces.
    pub fn to_json(&self, rules: &Ruleset) -> Result<String, ConfigError> {
        let mut value = serde_json::to_value(self)?;
        if let Ok([main, sub]) = rules.unique_pair_for(&self.config.class_name, &self.config.role) {
            let pieces = value
                .pointer_mut("/locked_gear/locked_pieces")
                .and_then(|v| v.as_array_mut());
            for piece in pieces.into_iter().flatten() {
                if piece["is_unique"] == true {
                    piece["main_stat"] = serde_json::to_value(main)?;
                    piece["sub_stat"] = serde_json::to_value(sub)?;
                }
            }
        }
        Ok(serde_json::to_string_pretty(&value)?)
    }
}

/// Parse a preset from JSON
pub fn parse_preset(content: &str) -> Result<Preset, ConfigError> {
    Ok(serde_json::from_str(content)?)
}

/// Load a preset from a JSON file
pub fn load_preset(path: &Path) -> Result<Preset, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_preset(&content)
}
