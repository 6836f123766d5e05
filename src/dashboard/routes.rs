//! Dashboard API route handlers.
//!
//! All endpoints return JSON. State is shared via `Arc<DashboardState>`.
//! Skins endpoints load a fresh spreadsheet snapshot per request, so the
//! scoring core never holds state across calls and concurrent requests
//! never share an accumulator.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::error;

use crate::config::AppConfig;
use crate::data::spreadsheet;
use crate::scoring::{RoundReport, ScoringPipeline};
use crate::store::RoundStore;
use crate::types::{Competitor, HoleOutcome, RoundMeta};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct DashboardState {
    pub config: AppConfig,
    pub store: RoundStore,
}

pub type AppState = Arc<DashboardState>;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SkinsResponse {
    pub players: Vec<String>,
    pub rounds: Vec<RoundSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundSummary {
    pub round_num: usize,
    pub start_date: String,
    pub end_date: String,
    pub total_holes: usize,
    pub complete: bool,
    pub skins: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundDetail {
    #[serde(flatten)]
    pub summary: RoundSummary,
    pub holes: Vec<HoleOutcome>,
    pub unawarded_pool: u32,
}

#[derive(Debug, Deserialize)]
pub struct CreateRoundRequest {
    pub round_date: String,
    #[serde(default)]
    pub competitors: Option<Vec<Competitor>>,
    #[serde(default)]
    pub teams: Option<Vec<String>>,
    #[serde(default)]
    pub competitions: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

// ---------------------------------------------------------------------------
// Error envelope
// ---------------------------------------------------------------------------

/// Error every API route shares: a status code plus a JSON message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        Self { status: StatusCode::NOT_FOUND, message: message.into() }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }

    fn internal(err: anyhow::Error) -> Self {
        error!(error = %err, "Request failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("{err}"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

// ---------------------------------------------------------------------------
// Skins endpoints
// ---------------------------------------------------------------------------

/// Load a fresh spreadsheet snapshot and score it.
fn load_reports(state: &DashboardState) -> anyhow::Result<(Vec<String>, Vec<RoundReport>)> {
    let cfg = &state.config;
    let sheet = spreadsheet::load_scores(
        &cfg.spreadsheet.path,
        cfg.game.default_score,
        cfg.game.season_year,
    )?;
    let pipeline = ScoringPipeline::new(sheet.players.clone(), cfg.game.holes_per_round);
    let reports = pipeline.run(sheet.records)?;
    Ok((sheet.players, reports))
}

fn summarize(report: &RoundReport) -> RoundSummary {
    RoundSummary {
        round_num: report.number,
        start_date: report.round.start_date.clone(),
        end_date: report.round.end_date.clone(),
        total_holes: report.round.hole_count(),
        complete: report.complete,
        skins: report.skins.totals.points.clone(),
    }
}

/// GET /api/skins
pub async fn get_skins(State(state): State<AppState>) -> Result<Json<SkinsResponse>, ApiError> {
    let (players, reports) = load_reports(&state).map_err(ApiError::internal)?;
    Ok(Json(SkinsResponse {
        players,
        rounds: reports.iter().map(summarize).collect(),
    }))
}

/// GET /api/skins/:round
pub async fn get_skins_round(
    State(state): State<AppState>,
    Path(round_num): Path<usize>,
) -> Result<Json<RoundDetail>, ApiError> {
    let (_, reports) = load_reports(&state).map_err(ApiError::internal)?;
    let report = reports
        .iter()
        .find(|r| r.number == round_num)
        .ok_or_else(|| ApiError::not_found(format!("Round {round_num} not found")))?;
    Ok(Json(RoundDetail {
        summary: summarize(report),
        holes: report.skins.holes.clone(),
        unawarded_pool: report.skins.unawarded_pool,
    }))
}

// ---------------------------------------------------------------------------
// Round metadata endpoints
// ---------------------------------------------------------------------------

/// GET /api/rounds
pub async fn list_rounds(State(state): State<AppState>) -> Result<Json<Vec<RoundMeta>>, ApiError> {
    let rounds = state.store.load_all().map_err(ApiError::internal)?;
    Ok(Json(rounds))
}

/// GET /api/round/:date
pub async fn get_round(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<RoundMeta>, ApiError> {
    let meta = state
        .store
        .load(&date)
        .map_err(ApiError::internal)?
        .ok_or_else(|| ApiError::not_found(format!("Round {date} not found")))?;
    Ok(Json(meta))
}

/// POST /api/rounds
pub async fn create_round(
    State(state): State<AppState>,
    Json(req): Json<CreateRoundRequest>,
) -> Result<Json<RoundMeta>, ApiError> {
    let competitors = req
        .competitors
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| state.config.players.clone());
    let teams = req.teams.filter(|t| !t.is_empty()).unwrap_or_else(|| {
        // Unique team names, in competitor order.
        let mut teams: Vec<String> = Vec::new();
        for competitor in &competitors {
            if !teams.contains(&competitor.team) {
                teams.push(competitor.team.clone());
            }
        }
        teams
    });
    let competitions = req
        .competitions
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| vec!["skins".to_string()]);

    let meta = state
        .store
        .create(&req.round_date, competitors, teams, competitions)
        .map_err(|e| ApiError::bad_request(format!("{e}")))?;
    Ok(Json(meta))
}

/// POST /api/round/:date/close
pub async fn close_round(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<RoundMeta>, ApiError> {
    if state.store.load(&date).map_err(ApiError::internal)?.is_none() {
        return Err(ApiError::not_found(format!("Round {date} not found")));
    }
    let meta = state.store.close(&date).map_err(ApiError::internal)?;
    Ok(Json(meta))
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
