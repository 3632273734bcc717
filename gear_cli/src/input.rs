//! Loading builds from TOML build files or JSON presets

use anyhow::{Context, Result};
use gear_core::config::{load_preset, parse_toml, Preset};
use gear_core::{BuildConfig, LockedPiece, LockedSet};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A build ready to solve
#[derive(Debug)]
pub struct Build {
    pub name: Option<String>,
    pub config: BuildConfig,
    pub locked: LockedSet,
}

impl From<Preset> for Build {
    fn from(preset: Preset) -> Self {
        Build {
            name: Some(preset.name),
            config: preset.config,
            locked: preset.locked_gear,
        }
    }
}

/// TOML build file: a `[build]` table and any number of `[[locked]]` pieces
#[derive(Debug, Deserialize)]
struct BuildFile {
    build: BuildConfig,
    #[serde(default)]
    locked: Vec<LockedPiece>,
}

/// Load a `.json` preset or a TOML build file
pub fn load(path: &Path) -> Result<Build> {
    let is_preset = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_preset {
        let preset = load_preset(path)
            .with_context(|| format!("Failed to load preset {}", path.display()))?;
        tracing::info!(name = %preset.name, version = %preset.version, "loaded preset");
        return Ok(preset.into());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read build file {}", path.display()))?;
    parse_build(&content).with_context(|| format!("Invalid build file {}", path.display()))
}

/// Parse a TOML build file, locking its pieces in file order
pub fn parse_build(content: &str) -> Result<Build> {
    let file: BuildFile = parse_toml(content)?;

    let mut locked = LockedSet::new();
    for piece in file.locked {
        let slot = piece.slot;
        locked
            .add_piece(piece)
            .with_context(|| format!("Cannot lock {slot}"))?;
    }

    Ok(Build {
        name: None,
        config: file.build,
        locked,
    })
}
