//! Skins scoring.
//!
//! Every hole adds one point to a shared pool. A hole with a unique
//! lowest score hands the whole pool to that player and resets it; a
//! tied hole carries the pool forward, uncapped. A pool still standing
//! after the last hole is awarded to no one.

use tracing::debug;

use crate::types::{
    HoleOutcome, HoleResolution, Round, ScoringError, SkinsBreakdown, SkinsResult,
};

/// Computes skins points for one round at a time.
///
/// Pure over the round's hole sequence; each call owns its own pool and
/// shares nothing across invocations, so calculating twice over the same
/// round always yields the same result.
pub struct SkinsCalculator {
    roster: Vec<String>,
}

impl SkinsCalculator {
    pub fn new(roster: Vec<String>) -> Self {
        Self { roster }
    }

    /// Per-player totals for `round`.
    pub fn calculate(&self, round: &Round) -> Result<SkinsResult, ScoringError> {
        self.calculate_verbose(round).map(|b| b.totals)
    }

    /// Totals plus the per-hole trace and the final unawarded pool.
    ///
    /// A round with zero holes yields an all-zero result and an empty
    /// trace; that is not an error.
    pub fn calculate_verbose(&self, round: &Round) -> Result<SkinsBreakdown, ScoringError> {
        let mut totals = SkinsResult::zeroed(&self.roster);
        let mut holes = Vec::with_capacity(round.hole_count());
        let mut points_pool: u32 = 0;

        for record in &round.holes {
            // Upstream invariants make a gap here unreachable; check anyway
            // so a bad round fails loudly instead of scoring short.
            for player in &self.roster {
                if !record.scores.contains_key(player) {
                    return Err(ScoringError::MissingScore {
                        date: record.date.clone(),
                        hole: record.hole,
                        player: player.clone(),
                    });
                }
            }

            points_pool += 1;

            let min_score = record.scores.values().copied().min();
            let winners: Vec<&String> = match min_score {
                Some(min) => record
                    .scores
                    .iter()
                    .filter(|(_, score)| **score == min)
                    .map(|(player, _)| player)
                    .collect(),
                None => Vec::new(),
            };

            let resolution = if let [winner] = winners.as_slice() {
                let awarded = points_pool;
                *totals
                    .points
                    .entry((*winner).clone())
                    .or_insert(0) += awarded;
                points_pool = 0;
                debug!(hole = record.hole, player = %winner, points = awarded, "Skin won");
                HoleResolution::Won {
                    player: (*winner).clone(),
                    points: awarded,
                }
            } else {
                HoleResolution::Carried { pool: points_pool }
            };

            holes.push(HoleOutcome {
                hole: record.hole,
                date: record.date.clone(),
                resolution,
            });
        }

        if points_pool > 0 {
            debug!(pool = points_pool, "Round ended with an unawarded pool");
        }

        Ok(SkinsBreakdown {
            totals,
            holes,
            unawarded_pool: points_pool,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
