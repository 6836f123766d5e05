//! Round metadata store.
//!
//! One JSON document per round at `<rounds_dir>/<YYMMDD>/config.json`:
//! who played, for which teams, in which competitions, and whether the
//! round is still open. The scoring core never reads this; the
//! dashboard does.

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::types::{Competitor, RoundMeta, RoundStatus};

const META_FILE: &str = "config.json";

/// Parse a YYMMDD round key ("251205" = December 5, 2025).
pub fn parse_round_date(token: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(token, "%y%m%d")
        .with_context(|| format!("Round date must be YYMMDD (e.g. 251205), got '{token}'"))
}

/// Partial metadata update; `None` leaves a field untouched. Only these
/// four fields are caller-editable.
#[derive(Debug, Default, Clone)]
pub struct RoundUpdate {
    pub competitors: Option<Vec<Competitor>>,
    pub teams: Option<Vec<String>>,
    pub competitions: Option<Vec<String>>,
    pub status: Option<RoundStatus>,
}

/// Filesystem-backed metadata CRUD.
pub struct RoundStore {
    dir: PathBuf,
}

impl RoundStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn meta_path(&self, token: &str) -> PathBuf {
        self.dir.join(token).join(META_FILE)
    }

    /// Create a round document with status `active`.
    /// Fails on a malformed date token or an already-existing round.
    pub fn create(
        &self,
        token: &str,
        competitors: Vec<Competitor>,
        teams: Vec<String>,
        competitions: Vec<String>,
    ) -> Result<RoundMeta> {
        let date = parse_round_date(token)?;
        if self.meta_path(token).exists() {
            bail!("Round {token} already exists");
        }

        let meta = RoundMeta {
            round_date: token.to_string(),
            round_date_formatted: date.format("%B %d, %Y").to_string(),
            start_date: date.format("%Y-%m-%d").to_string(),
            competitors,
            teams,
            competitions,
            status: RoundStatus::Active,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.save(&meta)?;
        info!(round = token, "Round created");
        Ok(meta)
    }

    /// Load one round. Returns None when the round does not exist.
    pub fn load(&self, token: &str) -> Result<Option<RoundMeta>> {
        let path = self.meta_path(token);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read round metadata {}", path.display()))?;
        let meta = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse round metadata {}", path.display()))?;
        Ok(Some(meta))
    }

    /// Every round, newest first. A missing rounds directory is an empty
    /// store, not an error.
    pub fn load_all(&self) -> Result<Vec<RoundMeta>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut rounds = Vec::new();
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to list rounds directory {}", self.dir.display()))?;
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let token = entry.file_name().to_string_lossy().to_string();
            if let Some(meta) = self.load(&token)? {
                rounds.push(meta);
            }
        }
        rounds.sort_by(|a, b| b.round_date.cmp(&a.round_date));
        Ok(rounds)
    }

    /// Rounds still marked active, newest first.
    pub fn active(&self) -> Result<Vec<RoundMeta>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(RoundMeta::is_active)
            .collect())
    }

    /// Merge `update` into an existing round and stamp `updated_at`.
    pub fn update(&self, token: &str, update: RoundUpdate) -> Result<RoundMeta> {
        let Some(mut meta) = self.load(token)? else {
            bail!("Round {token} not found");
        };
        if let Some(competitors) = update.competitors {
            meta.competitors = competitors;
        }
        if let Some(teams) = update.teams {
            meta.teams = teams;
        }
        if let Some(competitions) = update.competitions {
            meta.competitions = competitions;
        }
        if let Some(status) = update.status {
            meta.status = status;
        }
        meta.updated_at = Some(Utc::now());
        self.save(&meta)?;
        Ok(meta)
    }

    /// Mark a round completed.
    pub fn close(&self, token: &str) -> Result<RoundMeta> {
        self.update(
            token,
            RoundUpdate {
                status: Some(RoundStatus::Completed),
                ..Default::default()
            },
        )
    }

    fn save(&self, meta: &RoundMeta) -> Result<()> {
        let dir = self.dir.join(&meta.round_date);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create round directory {}", dir.display()))?;
        let json = serde_json::to_string_pretty(meta).context("Failed to serialise round metadata")?;
        let path = dir.join(META_FILE);
        fs::write(&path, json)
            .with_context(|| format!("Failed to write round metadata {}", path.display()))?;
        debug!(round = %meta.round_date, status = %meta.status, "Round metadata saved");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
