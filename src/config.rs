//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Everything the components need (roster, game constants, paths, the
//! dashboard port) is passed in explicitly from here; no module reads
//! process-wide state of its own.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

use crate::types::Competitor;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Players in spreadsheet column order, with team assignments.
    pub players: Vec<Competitor>,
    pub teams: Vec<String>,
    pub game: GameConfig,
    pub spreadsheet: SpreadsheetConfig,
    pub rounds: RoundsConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GameConfig {
    /// Score filled in when a player has no entry for a hole.
    pub default_score: i32,
    /// Holes that make a round "complete" (informational).
    pub holes_per_round: u32,
    /// Year assumed when a date token carries none ("May-15").
    pub season_year: i32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SpreadsheetConfig {
    /// Path to the CSV score sheet.
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RoundsConfig {
    /// Directory holding per-round metadata documents.
    pub dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub enabled: bool,
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }

    /// Ordered player names, as the scoring core expects them.
    pub fn roster(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }
}
