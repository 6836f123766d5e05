//! Shared types for the WORDLER tracker.
//!
//! These types form the data model used across all modules.
//! They are designed to be stable so that the loaders, scoring core,
//! store, and dashboard can depend on them without circular references.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Score records
// ---------------------------------------------------------------------------

/// One scoring event: every player's score for a single hole.
///
/// Produced once by a loader and never mutated afterwards. The `scores`
/// mapping covers the full roster; missing entries are default-filled
/// before a record reaches the scoring core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Date token exactly as it appeared in the source ("240515" or "May-15").
    pub date: String,
    /// Calendar date, when the loader recognised the token.
    pub played_on: Option<NaiveDate>,
    /// 1-based hole number; resets to 1 at every round boundary.
    pub hole: u32,
    /// Player name to strokes. Lower wins, golf-style.
    pub scores: BTreeMap<String, i32>,
}

impl ScoreRecord {
    pub fn new(date: impl Into<String>, hole: u32, scores: BTreeMap<String, i32>) -> Self {
        Self {
            date: date.into(),
            played_on: None,
            hole,
            scores,
        }
    }

    /// Whether this record opens a new round.
    pub fn starts_round(&self) -> bool {
        self.hole == 1
    }
}

impl fmt::Display for ScoreRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scores = self
            .scores
            .iter()
            .map(|(p, s)| format!("{p}:{s}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{} hole {}: {}", self.date, self.hole, scores)
    }
}

// ---------------------------------------------------------------------------
// Rounds
// ---------------------------------------------------------------------------

/// A maximal contiguous run of holes from hole 1 to the next hole-1
/// boundary or the end of data.
///
/// Built only by `scoring::RoundSegmenter`; not mutated after segmentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Hole records in play order; hole numbers run 1, 2, 3, ...
    pub holes: Vec<ScoreRecord>,
    /// Date token of the first hole.
    pub start_date: String,
    /// Date token of the last hole.
    pub end_date: String,
}

impl Round {
    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }

    /// Whether the round reached the configured number of holes.
    /// Informational only; an incomplete round still scores normally.
    pub fn is_complete(&self, expected_holes: u32) -> bool {
        self.holes.len() == expected_holes as usize
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {} ({} holes)",
            self.start_date,
            self.end_date,
            self.hole_count()
        )
    }
}

// ---------------------------------------------------------------------------
// Skins results
// ---------------------------------------------------------------------------

/// Per-player skin points for one round.
///
/// Every rostered player appears; players who never won a hole hold 0.
/// Derived fresh per calculation, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinsResult {
    pub points: BTreeMap<String, u32>,
}

impl SkinsResult {
    /// An all-zero result covering the given roster.
    pub fn zeroed(roster: &[String]) -> Self {
        Self {
            points: roster.iter().map(|p| (p.clone(), 0)).collect(),
        }
    }

    pub fn points_for(&self, player: &str) -> u32 {
        self.points.get(player).copied().unwrap_or(0)
    }

    /// Sum of all awarded points.
    pub fn total_awarded(&self) -> u32 {
        self.points.values().sum()
    }

    /// Players holding the highest positive total. Empty when nobody scored.
    pub fn leaders(&self) -> Vec<&str> {
        let max = self.points.values().copied().max().unwrap_or(0);
        if max == 0 {
            return Vec::new();
        }
        self.points
            .iter()
            .filter(|(_, pts)| **pts == max)
            .map(|(p, _)| p.as_str())
            .collect()
    }
}

impl fmt::Display for SkinsResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self
            .points
            .iter()
            .map(|(p, pts)| format!("{p}: {pts}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{parts}")
    }
}

// ---------------------------------------------------------------------------
// Hole-by-hole trace
// ---------------------------------------------------------------------------

/// How a single hole resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum HoleResolution {
    /// A single player posted the lowest score and takes the whole pool.
    Won { player: String, points: u32 },
    /// The lowest score was shared (or no scores); nothing awarded and
    /// the pool carries forward.
    Carried { pool: u32 },
}

/// One entry of the per-hole diagnostic trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleOutcome {
    pub hole: u32,
    pub date: String,
    #[serde(flatten)]
    pub resolution: HoleResolution,
}

impl fmt::Display for HoleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.resolution {
            HoleResolution::Won { player, points } => {
                write!(f, "hole {} ({}): {} +{}", self.hole, self.date, player, points)
            }
            HoleResolution::Carried { pool } => {
                write!(f, "hole {} ({}): tie, pool at {}", self.hole, self.date, pool)
            }
        }
    }
}

/// Full skins calculation output for one round: totals plus the ordered
/// per-hole trace and whatever pool was left unawarded at round end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinsBreakdown {
    pub totals: SkinsResult,
    pub holes: Vec<HoleOutcome>,
    /// Points accumulated on trailing ties that no one ever won.
    /// They evaporate at round end; no tie-break or rollover applies.
    pub unawarded_pool: u32,
}

// ---------------------------------------------------------------------------
// Round metadata
// ---------------------------------------------------------------------------

/// A player entry in a round's configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    pub team: String,
}

impl fmt::Display for Competitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.team)
    }
}

/// Lifecycle status of a persisted round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    Active,
    Completed,
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundStatus::Active => write!(f, "active"),
            RoundStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for RoundStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(RoundStatus::Active),
            "completed" | "closed" => Ok(RoundStatus::Completed),
            _ => Err(anyhow::anyhow!("Unknown round status: {s}")),
        }
    }
}

/// Persisted per-round configuration, one JSON document per round.
///
/// The scoring core never reads this; it exists for the dashboard and
/// carries the roster a round was played with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundMeta {
    /// YYMMDD date token; the store key.
    pub round_date: String,
    /// Human-readable form of `round_date`, e.g. "December 05, 2025".
    pub round_date_formatted: String,
    /// ISO date the round started.
    pub start_date: String,
    pub competitors: Vec<Competitor>,
    pub teams: Vec<String>,
    pub competitions: Vec<String>,
    pub status: RoundStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RoundMeta {
    pub fn is_active(&self) -> bool {
        self.status == RoundStatus::Active
    }

    /// Ordered player names from the competitor list.
    pub fn roster(&self) -> Vec<String> {
        self.competitors.iter().map(|c| c.name.clone()).collect()
    }
}

impl fmt::Display for RoundMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} competitors, competitions: {}",
            self.round_date,
            self.status,
            self.competitors.len(),
            self.competitions.join(", "),
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Malformed-record failures raised by the scoring core.
///
/// Raised immediately on first sight; the core performs no partial
/// recovery. Callers that want to skip bad records must do so upstream.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("malformed record ({date}): hole number must be a positive integer")]
    InvalidHoleNumber { date: String },

    #[error("malformed record ({date}, hole {hole}): no score for rostered player '{player}'")]
    MissingScore {
        date: String,
        hole: u32,
        player: String,
    },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
