//! WORDLER — Wordle skins competition tracker
//!
//! Entry point. Loads configuration, initialises structured logging,
//! reports the rounds found in the score sheet, and serves the
//! dashboard until Ctrl+C.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use wordler::config::AppConfig;
use wordler::dashboard;
use wordler::dashboard::routes::DashboardState;
use wordler::data::spreadsheet;
use wordler::scoring::{RoundReport, ScoringPipeline};
use wordler::store::RoundStore;

const BANNER: &str = r#"
__        _____  ____  ____  _     _____ ____
\ \      / / _ \|  _ \|  _ \| |   | ____|  _ \
 \ \ /\ / / | | | |_) | | | | |   |  _| | |_) |
  \ V  V /| |_| |  _ <| |_| | |___| |___|  _ <
   \_/\_/  \___/|_| \_\____/|_____|_____|_| \_\

  Wordle skins competition tracker
  v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from TOML
    let cfg = AppConfig::load("config.toml")?;

    // Initialise structured logging
    init_logging();

    // Print startup banner
    println!("{BANNER}");
    info!(
        players = cfg.players.len(),
        spreadsheet = %cfg.spreadsheet.path,
        holes_per_round = cfg.game.holes_per_round,
        "WORDLER starting up"
    );

    // -- Startup rounds analysis ------------------------------------------
    // A broken or missing sheet is not fatal here; the dashboard loads a
    // fresh snapshot per request anyway.
    match spreadsheet::load_scores(
        &cfg.spreadsheet.path,
        cfg.game.default_score,
        cfg.game.season_year,
    ) {
        Ok(sheet) => {
            let pipeline = ScoringPipeline::new(sheet.players.clone(), cfg.game.holes_per_round);
            match pipeline.run(sheet.records) {
                Ok(reports) => log_rounds_analysis(&sheet.players, &reports),
                Err(e) => warn!(error = %e, "Score sheet failed to score"),
            }
        }
        Err(e) => warn!(error = %e, "Score sheet not loadable at startup"),
    }

    if !cfg.dashboard.enabled {
        info!("Dashboard disabled; nothing left to serve.");
        return Ok(());
    }

    // -- Serve -------------------------------------------------------------

    let port = cfg.dashboard.port;
    let store = RoundStore::new(cfg.rounds.dir.clone());
    let state = Arc::new(DashboardState { config: cfg, store });

    dashboard::serve(state, port).await?;

    info!("WORDLER shut down cleanly.");
    Ok(())
}

/// Log a human-readable summary of every round in the dataset.
fn log_rounds_analysis(players: &[String], reports: &[RoundReport]) {
    info!(
        players = %players.join(", "),
        rounds = reports.len(),
        "Rounds analysis"
    );
    for report in reports {
        let winners = report.skins.totals.leaders();
        info!(
            round = report.number,
            start = %report.round.start_date,
            end = %report.round.end_date,
            holes = report.round.hole_count(),
            complete = report.complete,
            skins = %report.skins.totals,
            winners = %winners.join(", "),
            carried = report.skins.unawarded_pool,
            "Round"
        );
    }
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("wordler=info"));

    let json_logging = std::env::var("WORDLER_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
