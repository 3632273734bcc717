//! Build configuration: what the caller wants solved

use crate::types::{GemValue, Requirements};
use serde::{Deserialize, Serialize};

/// Input configuration for a solve
///
/// Field names on the wire follow the preset snapshot format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    pub class_name: String,
    /// Role within the class
    #[serde(rename = "subclass_name", alias = "role")]
    pub role: String,
    #[serde(rename = "gear_level", alias = "gear_tier", default = "default_gear_tier")]
    pub gear_tier: u32,
    #[serde(rename = "weapon_level", alias = "weapon_tier", default = "default_weapon_tier")]
    pub weapon_tier: u32,
    /// Unique pieces to place, excluding the weapon and any locked pieces
    #[serde(default = "default_unique_count")]
    pub unique_count: u8,
    #[serde(rename = "gem_assumption", alias = "gem_value", default)]
    pub gem_value: GemValue,
    #[serde(rename = "min_stats", alias = "requirements", default)]
    pub requirements: Requirements,
    /// Stop after this many solutions; `None` or zero enumerates everything.
    /// A missing key means the default cap of 100, an explicit `null` no cap.
    #[serde(default = "default_max_solutions")]
    pub max_solutions: Option<usize>,
}

fn default_gear_tier() -> u32 {
    80
}
fn default_weapon_tier() -> u32 {
    90
}
fn default_unique_count() -> u8 {
    6
}
fn default_max_solutions() -> Option<usize> {
    Some(100)
}

impl BuildConfig {
    /// A config with the default tiers, six unique pieces, no requirements
    /// and the default cap
    pub fn new(class_name: impl Into<String>, role: impl Into<String>) -> Self {
        BuildConfig {
            class_name: class_name.into(),
            role: role.into(),
            gear_tier: default_gear_tier(),
            weapon_tier: default_weapon_tier(),
            unique_count: default_unique_count(),
            gem_value: GemValue::default(),
            requirements: Requirements::new(),
            max_solutions: default_max_solutions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Stat;

    #[test]
    fn test_defaults_when_fields_missing() {
        let config: BuildConfig = toml::from_str(
            r#"
class_name = "Stormblade"
subclass_name = "Iaido"
"#,
        )
        .unwrap();

        assert_eq!(config, BuildConfig::new("Stormblade", "Iaido"));
    }

    #[test]
    fn test_parse_full_toml() {
        let config: BuildConfig = toml::from_str(
            r#"
class_name = "Frost Mage"
role = "Icicle"
gear_tier = 60
weapon_tier = 70
unique_count = 2
gem_value = "max"
max_solutions = 25

[requirements]
Crit = 1500
Luck = 900
"#,
        )
        .unwrap();

        assert_eq!(config.role, "Icicle");
        assert_eq!(config.gear_tier, 60);
        assert_eq!(config.gem_value, GemValue::Max);
        assert_eq!(config.requirements.threshold(Stat::Luck), 900);
        assert_eq!(config.max_solutions, Some(25));
    }

    #[test]
    fn test_serializes_with_snapshot_names() {
        let mut config = BuildConfig::new("Marksman", "Falconry");
        config.requirements.set(Stat::Haste, 700);
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["subclass_name"], "Falconry");
        assert_eq!(json["gear_level"], 80);
        assert_eq!(json["weapon_level"], 90);
        assert_eq!(json["gem_assumption"], "avg");
        assert_eq!(json["min_stats"]["Haste"], 700);
    }

    #[test]
    fn test_missing_cap_defaults_to_100() {
        let json = r#"{"class_name": "Stormblade", "subclass_name": "Iaido"}"#;
        let config: BuildConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.max_solutions, Some(100));

        let uncapped: BuildConfig = serde_json::from_str(
            r#"{"class_name": "Stormblade", "subclass_name": "Iaido", "max_solutions": null}"#,
        )
        .unwrap();
        assert_eq!(uncapped.max_solutions, None);

        // No cap survives a JSON round trip instead of falling back to the default
        let json = serde_json::to_string(&uncapped).unwrap();
        let back: BuildConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.max_solutions, None);
    }
}
