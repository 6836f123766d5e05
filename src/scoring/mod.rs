//! Scoring core — round segmentation and skins calculation.

pub mod segment;
pub mod skins;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::types::{Round, ScoreRecord, ScoringError, SkinsBreakdown};
pub use segment::RoundSegmenter;
pub use skins::SkinsCalculator;

// ---------------------------------------------------------------------------
// Round reports
// ---------------------------------------------------------------------------

/// One round's derived view: the round itself plus everything the
/// presentation layer wants to say about it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundReport {
    /// 1-based position of the round in the dataset.
    pub number: usize,
    pub round: Round,
    /// Whether the round reached the configured hole count.
    pub complete: bool,
    pub skins: SkinsBreakdown,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Pipelines segmentation into per-round skins reports.
///
/// Instantiate with the dataset's roster and expected hole count; `run`
/// is pure over its input and carries nothing between calls, so callers
/// under concurrent load simply run one pipeline per loaded snapshot.
pub struct ScoringPipeline {
    segmenter: RoundSegmenter,
    calculator: SkinsCalculator,
    expected_holes: u32,
}

impl ScoringPipeline {
    pub fn new(roster: Vec<String>, expected_holes: u32) -> Self {
        Self {
            segmenter: RoundSegmenter::new(roster.clone()),
            calculator: SkinsCalculator::new(roster),
            expected_holes,
        }
    }

    /// Segment `records` and score every round.
    pub fn run(&self, records: Vec<ScoreRecord>) -> Result<Vec<RoundReport>, ScoringError> {
        let record_count = records.len();
        let rounds = self.segmenter.segment(records)?;
        info!(records = record_count, rounds = rounds.len(), "Segmentation complete");

        rounds
            .into_iter()
            .enumerate()
            .map(|(i, round)| {
                let skins = self.calculator.calculate_verbose(&round)?;
                Ok(RoundReport {
                    number: i + 1,
                    complete: round.is_complete(self.expected_holes),
                    round,
                    skins,
                })
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScoreRecord;

    fn record(date: &str, hole: u32, a: i32, b: i32) -> ScoreRecord {
        ScoreRecord::new(
            date,
            hole,
            [("A".to_string(), a), ("B".to_string(), b)].into_iter().collect(),
        )
    }

    fn pipeline() -> ScoringPipeline {
        ScoringPipeline::new(vec!["A".to_string(), "B".to_string()], 3)
    }

    #[test]
    fn test_run_empty_dataset() {
        assert!(pipeline().run(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_run_numbers_rounds_and_flags_completeness() {
        let reports = pipeline()
            .run(vec![
                record("d1", 1, 3, 5),
                record("d2", 2, 4, 4),
                record("d3", 3, 2, 6),
                record("d4", 1, 5, 4),
            ])
            .unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].number, 1);
        assert!(reports[0].complete);
        assert_eq!(reports[0].skins.totals.points_for("A"), 3);

        assert_eq!(reports[1].number, 2);
        assert!(!reports[1].complete);
        assert_eq!(reports[1].skins.totals.points_for("B"), 1);
    }

    #[test]
    fn test_run_propagates_malformed_records() {
        let err = pipeline().run(vec![record("d1", 0, 3, 5)]).unwrap_err();
        assert!(matches!(err, ScoringError::InvalidHoleNumber { .. }));
    }

    #[test]
    fn test_report_serializes() {
        let reports = pipeline().run(vec![record("d1", 1, 3, 5)]).unwrap();
        let json = serde_json::to_string(&reports).unwrap();
        assert!(json.contains("\"number\":1"));
        assert!(json.contains("unawarded_pool"));
    }
}
