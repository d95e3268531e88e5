//! Tictactoe - terminal front end
//!
//! Interactive play, one-shot board evaluation and config printing.

#![warn(missing_docs)]

mod cli;
mod frontend;
mod scheduler;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use tictactoe_core::{Board, ComputerPlayer, Outcome, Player, SessionConfig, evaluate};
use tracing::{info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Play {
            config,
            delay_ms,
            seed,
        } => run_play(config, delay_ms, seed).await,
        Command::Eval {
            board,
            mark,
            json,
            seed,
        } => run_eval(&board, mark, json, seed),
        Command::Config => run_config(),
    }
}

/// Logs go to stderr so they never interleave with the board on stdout.
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tictactoe_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Run an interactive game
#[instrument(skip_all)]
async fn run_play(config: Option<PathBuf>, delay_ms: Option<u64>, seed: Option<u64>) -> Result<()> {
    let mut session_config = match config {
        Some(path) => SessionConfig::from_file(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(ms) = delay_ms {
        session_config = session_config.with_computer_delay_ms(ms);
    }
    if let Some(seed) = seed {
        session_config = session_config.with_seed(seed);
    }
    info!(?session_config, "Session configured");

    frontend::run(session_config).await
}

/// Evaluate a board and suggest the computer's move
#[instrument]
fn run_eval(board: &str, mark: Player, json: bool, seed: u64) -> Result<()> {
    let board: Board = board.parse()?;
    let outcome = evaluate(&board);
    let suggestion = match outcome {
        Outcome::InProgress => ComputerPlayer::new(seed).choose(&board, mark),
        _ => None,
    };

    if json {
        let report = serde_json::json!({
            "board": board.to_string(),
            "outcome": outcome,
            "mark": mark,
            "computer_move": suggestion.map(|pos| pos.to_index()),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}\n", board.display());
    println!("{}", outcome);
    if let Some(line) = outcome.line() {
        let cells: Vec<String> = line.cells().iter().map(|p| p.to_index().to_string()).collect();
        println!("Line {} ({:?}): {}", line.id(), line.kind(), cells.join(", "));
    }
    if let Some(pos) = suggestion {
        println!("{} would play {} ({})", mark, pos.to_index(), pos.label());
    }
    Ok(())
}

/// Print the default configuration
fn run_config() -> Result<()> {
    print!("{}", SessionConfig::default().to_toml()?);
    Ok(())
}
