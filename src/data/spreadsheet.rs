//! CSV score-sheet loader.
//!
//! Sheet layout: row 0 carries team names, row 1 is
//! `Date, Hole, <player names...>`, and every later row holds one hole.
//! The player columns of row 1 fix the roster and its order. Blank
//! score cells are filled with the configured default; rows with an
//! empty date cell are skipped entirely.

use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

use super::parse_day_token;
use crate::types::ScoreRecord;

/// A loaded score sheet: the roster in column order plus every record,
/// in sheet order.
#[derive(Debug, Clone)]
pub struct ScoreSheet {
    pub players: Vec<String>,
    pub records: Vec<ScoreRecord>,
}

/// Load and default-fill the score sheet at `path`.
pub fn load_scores(
    path: impl AsRef<Path>,
    default_score: i32,
    season_year: i32,
) -> Result<ScoreSheet> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open score sheet {}", path.display()))?;

    let rows: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .with_context(|| format!("Failed to read score sheet {}", path.display()))?;

    if rows.len() < 2 {
        bail!(
            "Score sheet {} is missing the team and player header rows",
            path.display()
        );
    }

    // Row 0 is the team row; scoring ignores it.
    let players: Vec<String> = rows[1]
        .iter()
        .skip(2)
        .map(|name| name.trim().to_string())
        .collect();
    if players.is_empty() {
        bail!("Score sheet {} has no player columns", path.display());
    }

    let mut records = Vec::new();
    for (idx, row) in rows.iter().enumerate().skip(2) {
        let line = idx + 1;
        let date = match row.get(0).map(str::trim) {
            None | Some("") => continue,
            Some(d) => d.to_string(),
        };
        let hole: u32 = row
            .get(1)
            .map(str::trim)
            .unwrap_or("")
            .parse()
            .with_context(|| format!("Bad hole number on line {line} of {}", path.display()))?;

        let mut scores = BTreeMap::new();
        for (col, player) in players.iter().enumerate() {
            let cell = row.get(col + 2).map(str::trim).unwrap_or("");
            let score = if cell.is_empty() {
                default_score
            } else {
                cell.parse().with_context(|| {
                    format!("Bad score for {player} on line {line} of {}", path.display())
                })?
            };
            scores.insert(player.clone(), score);
        }

        let mut record = ScoreRecord::new(date, hole, scores);
        record.played_on = parse_day_token(&record.date, season_year);
        records.push(record);
    }

    Ok(ScoreSheet { players, records })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sheet_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const SHEET: &str = "\
Date,Hole,Dub,Dub,Mucker
Date,Hole,Gerry,Keith,Paul
May-15,1,3,4,5
May-16,2,,4,4
,,
May-17,3,2,6,
";

    #[test]
    fn test_roster_comes_from_header_row() {
        let file = sheet_file(SHEET);
        let sheet = load_scores(file.path(), 8, 2024).unwrap();
        assert_eq!(
            sheet.players,
            vec!["Gerry".to_string(), "Keith".to_string(), "Paul".to_string()]
        );
    }

    #[test]
    fn test_blank_cells_default_fill_and_empty_rows_skip() {
        let file = sheet_file(SHEET);
        let sheet = load_scores(file.path(), 8, 2024).unwrap();
        assert_eq!(sheet.records.len(), 3);
        assert_eq!(sheet.records[1].scores["Gerry"], 8);
        assert_eq!(sheet.records[2].scores["Paul"], 8);
        assert_eq!(sheet.records[0].scores["Gerry"], 3);
    }

    #[test]
    fn test_dates_parse_with_season_year() {
        let file = sheet_file(SHEET);
        let sheet = load_scores(file.path(), 8, 2024).unwrap();
        assert_eq!(sheet.records[0].date, "May-15");
        assert_eq!(
            sheet.records[0].played_on,
            chrono::NaiveDate::from_ymd_opt(2024, 5, 15)
        );
    }

    #[test]
    fn test_hole_numbers_read_in_order() {
        let file = sheet_file(SHEET);
        let sheet = load_scores(file.path(), 8, 2024).unwrap();
        let holes: Vec<u32> = sheet.records.iter().map(|r| r.hole).collect();
        assert_eq!(holes, vec![1, 2, 3]);
    }

    #[test]
    fn test_bad_hole_cell_errors_with_line() {
        let file = sheet_file("Date,Hole,A\nDate,Hole,A\nMay-15,first,3\n");
        let err = load_scores(file.path(), 8, 2024).unwrap_err();
        assert!(format!("{err}").contains("Bad hole number on line 3"));
    }

    #[test]
    fn test_bad_score_cell_errors_with_player() {
        let file = sheet_file("Date,Hole,A\nDate,Hole,A\nMay-15,1,three\n");
        let err = load_scores(file.path(), 8, 2024).unwrap_err();
        assert!(format!("{err}").contains("Bad score for A"));
    }

    #[test]
    fn test_headerless_sheet_rejected() {
        let file = sheet_file("Date,Hole,A\n");
        let err = load_scores(file.path(), 8, 2024).unwrap_err();
        assert!(format!("{err}").contains("missing the team and player header rows"));
    }

    #[test]
    fn test_missing_file_errors_with_path() {
        let err = load_scores("/nonexistent/scores.csv", 8, 2024).unwrap_err();
        assert!(format!("{err}").contains("Failed to open score sheet"));
    }

    #[test]
    fn test_data_only_header_rows_is_empty_sheet() {
        let file = sheet_file("Date,Hole,A,B\nDate,Hole,A,B\n");
        let sheet = load_scores(file.path(), 8, 2024).unwrap();
        assert!(sheet.records.is_empty());
        assert_eq!(sheet.players.len(), 2);
    }
}
