//! Command-line interface for tictactoe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_core::Player;

/// Tic-tac-toe in the terminal, against a friend or the computer
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Tic-tac-toe with undo history and a computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game
    Play {
        /// Path to session config (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the computer's thinking delay in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Seed the computer's random moves
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Evaluate a board written as 9 characters, e.g. "XO.XO...."
    Eval {
        /// Board, row by row; '.', '_' or '-' for empty squares
        board: String,

        /// Mark the computer would play
        #[arg(short, long, default_value = "X")]
        mark: Player,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Seed for the computer's random fallback
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Print the default configuration as TOML
    Config,
}
