//! Connect-k - Unified CLI
//!
//! Terminal game and headless advisor.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use connect_k::{Column, Mark, OpponentKind, Settings};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            k,
            color,
            first,
            opponent,
        } => run_play(config, k, color, first, opponent),
        Command::Advise {
            k,
            first,
            moves,
            side,
        } => run_advise(k, first, moves, side),
    }
}

/// Run the terminal game
fn run_play(
    config: PathBuf,
    k: Option<usize>,
    color: Option<Mark>,
    first: Option<Mark>,
    opponent: Option<OpponentKind>,
) -> Result<()> {
    let settings = Settings::load_or_default(&config)
        .with_context(|| format!("Failed to load settings from {}", config.display()))?
        .with_overrides(k, color, first, opponent)?;
    tui::run_tui(settings)
}

/// Run the headless advisor
#[instrument(skip(moves), fields(moves = moves.len()))]
fn run_advise(k: usize, first: Mark, moves: Vec<Column>, side: Option<Mark>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Computing advice");
    let advice = connect_k::advise(k, first, &moves, side)?;
    println!("{}", serde_json::to_string_pretty(&advice)?);
    Ok(())
}
