//! Command-line interface for connect_k.

use clap::{Parser, Subcommand};
use connect_k::{Column, Mark, OpponentKind};
use std::path::PathBuf;

/// Connect-k - k in a row on an unbounded line of columns
#[derive(Parser, Debug)]
#[command(name = "connect_k")]
#[command(about = "Connect-k with a scripted opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Path to the settings file
        #[arg(short, long, default_value = "connect_k.toml")]
        config: PathBuf,

        /// Connection length needed to win
        #[arg(short, long)]
        k: Option<usize>,

        /// Your color (red or blue)
        #[arg(long)]
        color: Option<Mark>,

        /// Color that moves first (red or blue)
        #[arg(long)]
        first: Option<Mark>,

        /// Opponent (human or computer)
        #[arg(long)]
        opponent: Option<OpponentKind>,
    },

    /// Print the advisor's move for a replayed position as JSON
    Advise {
        /// Connection length needed to win
        #[arg(short, long, default_value_t = 3)]
        k: usize,

        /// Color that moved first (red or blue)
        #[arg(long, default_value = "red")]
        first: Mark,

        /// Columns played so far, comma separated (e.g. 0,1,-1)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        moves: Vec<Column>,

        /// Color to advise (defaults to the color to move)
        #[arg(long = "for")]
        side: Option<Mark>,
    },
}
