//! Convert a WhatsApp chat export into the score-sheet CSV.
//!
//! Usage: `import_chatlog <chat-dump.txt> <scores.csv>`
//!
//! Default score and holes-per-round come from `config.toml`, so the
//! generated sheet matches what the tracker expects to load.

use anyhow::{bail, Context, Result};

use wordler::config::AppConfig;
use wordler::data::chatlog::{build_table, ChatLogParser};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        bail!("usage: {} <chat-dump.txt> <scores.csv>", args[0]);
    }

    let cfg = AppConfig::load("config.toml")?;

    let text = std::fs::read_to_string(&args[1])
        .with_context(|| format!("Failed to read chat dump {}", args[1]))?;

    let parser = ChatLogParser::new()?;
    let scores = parser.parse_dump(&text);
    if scores.is_empty() {
        bail!("No Wordle scores found in {}", args[1]);
    }

    let table = build_table(&scores, cfg.game.default_score, cfg.game.holes_per_round);
    println!(
        "Found {} scores across {} days for {} players: {}",
        scores.len(),
        table.rows.len(),
        table.players.len(),
        table.players.join(", ")
    );

    table.write_csv(&args[2])?;
    println!("Wrote {}", args[2]);

    Ok(())
}
