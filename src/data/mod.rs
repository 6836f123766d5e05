//! Score-source loaders.
//!
//! The spreadsheet loader and the chat-log importer both end in the
//! same place: the in-memory record stream the scoring core consumes.

pub mod chatlog;
pub mod spreadsheet;

use chrono::NaiveDate;

/// Best-effort parse of a source date token.
///
/// Recognises the compact `YYMMDD` form the chat importer writes and the
/// `Mon-DD` form ("May-15") found in hand-kept sheets. The latter carries
/// no year, so `season_year` supplies one. Anything else stays
/// token-only; an unparseable date never fails a load.
pub fn parse_day_token(token: &str, season_year: i32) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(token, "%y%m%d") {
        return Some(date);
    }
    NaiveDate::parse_from_str(&format!("{token}-{season_year}"), "%b-%d-%Y").ok()
}
