//! LockedPiece - a gear piece the player already owns

use crate::config::{GearTierValues, Ruleset};
use crate::types::{Attribute, Slot, Stat, StatLine, UniquePair};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a piece grants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    /// Grants the role's unique pair at primary value each
    Unique,
    /// Main at primary value, sub at secondary value
    Regular { main: Stat, sub: Stat },
}

/// A locked gear piece
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PieceRecord", into = "PieceRecord")]
pub struct LockedPiece {
    pub slot: Slot,
    pub kind: PieceKind,
    /// Stat the socketed gem adds to
    pub gem: Option<Stat>,
    /// Stat the reforge adds to
    pub reforge: Option<Stat>,
}

/// Why a locked piece breaks the rules
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceViolation {
    #[error("Main stat cannot equal sub stat ({0})")]
    DuplicateStat(Stat),
    #[error("{stat} is forbidden on {slot} for {attribute} classes")]
    ForbiddenStat {
        stat: Stat,
        slot: Slot,
        attribute: Attribute,
    },
    #[error("{0} cannot hold unique gear")]
    UniqueNotAllowed(Slot),
}

impl LockedPiece {
    pub fn unique(slot: Slot) -> Self {
        LockedPiece {
            slot,
            kind: PieceKind::Unique,
            gem: None,
            reforge: None,
        }
    }

    pub fn regular(slot: Slot, main: Stat, sub: Stat) -> Self {
        LockedPiece {
            slot,
            kind: PieceKind::Regular { main, sub },
            gem: None,
            reforge: None,
        }
    }

    pub fn with_gem(mut self, stat: Stat) -> Self {
        self.gem = Some(stat);
        self
    }

    pub fn with_reforge(mut self, stat: Stat) -> Self {
        self.reforge = Some(stat);
        self
    }

    pub fn is_unique(&self) -> bool {
        matches!(self.kind, PieceKind::Unique)
    }

    /// Stats this piece contributes, gem and reforge included
    pub fn stats(&self, tier: &GearTierValues, pair: UniquePair, gem_value: u32) -> StatLine {
        let mut stats = StatLine::new();
        match self.kind {
            PieceKind::Unique => {
                stats.credit(pair[0], tier.primary);
                stats.credit(pair[1], tier.primary);
            }
            PieceKind::Regular { main, sub } => {
                stats.credit(main, tier.primary);
                stats.credit(sub, tier.secondary);
            }
        }
        if let Some(stat) = self.gem {
            stats.credit(stat, gem_value);
        }
        if let Some(stat) = self.reforge {
            stats.credit(stat, tier.reforge);
        }
        stats
    }

    /// First rule this piece breaks, if any
    pub fn validate(&self, rules: &Ruleset, attribute: Attribute) -> Result<(), PieceViolation> {
        match self.kind {
            PieceKind::Unique => {
                if !rules.is_unique_eligible(self.slot) {
                    return Err(PieceViolation::UniqueNotAllowed(self.slot));
                }
            }
            PieceKind::Regular { main, sub } => {
                if main == sub {
                    return Err(PieceViolation::DuplicateStat(main));
                }
                if let Some(forbidden) = rules.forbidden_stat(self.slot, attribute) {
                    if main == forbidden || sub == forbidden {
                        return Err(PieceViolation::ForbiddenStat {
                            stat: forbidden,
                            slot: self.slot,
                            attribute,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Flat wire form of a piece
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PieceRecord {
    slot: Slot,
    is_unique: bool,
    #[serde(default)]
    main_stat: Option<Stat>,
    #[serde(default)]
    sub_stat: Option<Stat>,
    #[serde(default)]
    gem_stat: Option<Stat>,
    #[serde(default)]
    reforge_stat: Option<Stat>,
}

impl TryFrom<PieceRecord> for LockedPiece {
    type Error = String;

    fn try_from(record: PieceRecord) -> Result<Self, Self::Error> {
        let kind = if record.is_unique {
            PieceKind::Unique
        } else {
            match (record.main_stat, record.sub_stat) {
                (Some(main), Some(sub)) => PieceKind::Regular { main, sub },
                _ => {
                    return Err(format!(
                        "regular gear on {} must have both main and sub stats",
                        record.slot
                    ))
                }
            }
        };
        Ok(LockedPiece {
            slot: record.slot,
            kind,
            gem: record.gem_stat,
            reforge: record.reforge_stat,
        })
    }
}

impl From<LockedPiece> for PieceRecord {
    fn from(piece: LockedPiece) -> Self {
        let (main_stat, sub_stat) = match piece.kind {
            PieceKind::Unique => (None, None),
            PieceKind::Regular { main, sub } => (Some(main), Some(sub)),
        };
        PieceRecord {
            slot: piece.slot,
            is_unique: piece.is_unique(),
            main_stat,
            sub_stat,
            gem_stat: piece.gem,
            reforge_stat: piece.reforge,
        }
    }
}
