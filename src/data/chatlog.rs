//! WhatsApp chat-log importer.
//!
//! Extracts `Wordle N x/6` announcements from a chat export and builds
//! the score table the spreadsheet loader reads. A failed puzzle
//! (`X/6`) counts as 7 strokes, one worse than the maximum guess count.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::types::ScoreRecord;

/// Matches e.g. `[03/04/2024, 11:17:40] Lorcan Kavanagh: Wordle 1,019 6/6`.
const SCORE_LINE: &str =
    r"\[(\d{2}/\d{2}/\d{4}), \d{2}:\d{2}:\d{2}\] ([^:]+): Wordle [\d,.]+ ([X1-6])/6";

const FAILED_GUESS_SCORE: i32 = 7;

/// One extracted announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatScore {
    pub date: NaiveDate,
    pub player: String,
    pub score: i32,
}

/// Line-by-line extractor over a WhatsApp export.
pub struct ChatLogParser {
    line: Regex,
}

impl ChatLogParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            line: Regex::new(SCORE_LINE).context("Invalid chat score pattern")?,
        })
    }

    /// Extract the announcement on one chat line, if any.
    pub fn parse_line(&self, line: &str) -> Option<ChatScore> {
        let caps = self.line.captures(line)?;
        let date = NaiveDate::parse_from_str(&caps[1], "%d/%m/%Y").ok()?;
        let score = match &caps[3] {
            "X" => FAILED_GUESS_SCORE,
            digits => digits.parse().ok()?,
        };
        Some(ChatScore {
            date,
            player: caps[2].trim().to_string(),
            score,
        })
    }

    /// Extract every announcement in a full export, in file order.
    pub fn parse_dump(&self, text: &str) -> Vec<ChatScore> {
        text.lines().filter_map(|line| self.parse_line(line)).collect()
    }
}

// ---------------------------------------------------------------------------
// Score table
// ---------------------------------------------------------------------------

/// Date-ordered score table ready for CSV export or direct scoring.
///
/// Players are sorted alphabetically; each row covers the full player
/// set, with absentees filled by the default score.
#[derive(Debug, Clone)]
pub struct ScoreTable {
    pub players: Vec<String>,
    /// (date, hole number, per-player scores), ascending by date.
    pub rows: Vec<(NaiveDate, u32, BTreeMap<String, i32>)>,
}

/// Group announcements by day and assign hole numbers cycling
/// 1..=`holes_per_round` across days in ascending date order, so a new
/// round starts every `holes_per_round` days of play.
pub fn build_table(scores: &[ChatScore], default_score: i32, holes_per_round: u32) -> ScoreTable {
    let players: Vec<String> = scores
        .iter()
        .map(|s| s.player.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut by_date: BTreeMap<NaiveDate, BTreeMap<String, i32>> = BTreeMap::new();
    for score in scores {
        by_date
            .entry(score.date)
            .or_default()
            .insert(score.player.clone(), score.score);
    }

    let mut rows = Vec::with_capacity(by_date.len());
    let mut hole = 1u32;
    for (date, day_scores) in by_date {
        let filled = players
            .iter()
            .map(|p| (p.clone(), day_scores.get(p).copied().unwrap_or(default_score)))
            .collect();
        rows.push((date, hole, filled));
        hole = if hole == holes_per_round { 1 } else { hole + 1 };
    }

    ScoreTable { players, rows }
}

impl ScoreTable {
    /// Records in the shape the scoring core consumes, dates as YYMMDD.
    pub fn to_records(&self) -> Vec<ScoreRecord> {
        self.rows
            .iter()
            .map(|(date, hole, scores)| {
                let mut record =
                    ScoreRecord::new(date.format("%y%m%d").to_string(), *hole, scores.clone());
                record.played_on = Some(*date);
                record
            })
            .collect()
    }

    /// Write the loader-compatible CSV: a team placeholder row (teams
    /// are assigned by hand afterwards), the player row, then one row
    /// per day.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create score sheet {}", path.display()))?;

        let mut team_row = vec!["Date".to_string(), "Hole".to_string()];
        team_row.extend(std::iter::repeat(String::new()).take(self.players.len()));
        writer.write_record(&team_row)?;

        let mut player_row = vec!["Date".to_string(), "Hole".to_string()];
        player_row.extend(self.players.iter().cloned());
        writer.write_record(&player_row)?;

        for (date, hole, scores) in &self.rows {
            let mut row = vec![date.format("%y%m%d").to_string(), hole.to_string()];
            for player in &self.players {
                // A hand-edited table may miss a cell; leave it blank and
                // let the loader default-fill.
                row.push(
                    scores
                        .get(player)
                        .map(|s| s.to_string())
                        .unwrap_or_default(),
                );
            }
            writer.write_record(&row)?;
        }

        writer
            .flush()
            .with_context(|| format!("Failed to write score sheet {}", path.display()))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
