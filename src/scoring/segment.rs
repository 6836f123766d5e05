//! Round segmentation.
//!
//! Partitions a time-ordered stream of score records into rounds. The
//! boundary signal is the hole counter resetting to 1: a record with
//! hole 1 closes the open round (if any) and opens the next one.

use tracing::warn;

use crate::types::{Round, ScoreRecord, ScoringError};

/// Splits an ordered record stream into rounds.
///
/// Holds the roster so every record can be checked for full coverage
/// before it is admitted; carries no state between `segment` calls.
pub struct RoundSegmenter {
    roster: Vec<String>,
}

impl RoundSegmenter {
    pub fn new(roster: Vec<String>) -> Self {
        Self { roster }
    }

    /// Partition `records` into rounds, preserving input order.
    ///
    /// Every record lands in exactly one round, with one exception:
    /// records arriving before the first hole-1 record have no round to
    /// join and are dropped (a round must start with hole 1). Dropped
    /// records are logged at warn level, never errored.
    pub fn segment(&self, records: Vec<ScoreRecord>) -> Result<Vec<Round>, ScoringError> {
        let mut rounds = Vec::new();
        let mut open: Option<Round> = None;

        for record in records {
            self.validate(&record)?;

            if record.starts_round() {
                if let Some(done) = open.take() {
                    rounds.push(done);
                }
                open = Some(Round {
                    holes: Vec::new(),
                    start_date: record.date.clone(),
                    end_date: record.date.clone(),
                });
            }

            match open.as_mut() {
                Some(round) => {
                    round.end_date = record.date.clone();
                    round.holes.push(record);
                }
                None => {
                    warn!(date = %record.date, hole = record.hole, "Dropping stray record before first hole 1");
                }
            }
        }

        if let Some(done) = open {
            if !done.holes.is_empty() {
                rounds.push(done);
            }
        }

        Ok(rounds)
    }

    fn validate(&self, record: &ScoreRecord) -> Result<(), ScoringError> {
        if record.hole == 0 {
            return Err(ScoringError::InvalidHoleNumber {
                date: record.date.clone(),
            });
        }
        for player in &self.roster {
            if !record.scores.contains_key(player) {
                return Err(ScoringError::MissingScore {
                    date: record.date.clone(),
                    hole: record.hole,
                    player: player.clone(),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
