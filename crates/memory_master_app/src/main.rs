//! Memory Master - terminal matching-pairs game

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use memory_master::{Deck, deck_rng};
use memory_master_app::{
    GameConfig, GameSession,
    cli::{Cli, Command},
    tui::run_tui,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            mode,
            seed,
            config,
            log_file,
        } => run_play(mode, seed, config, log_file).await,
        Command::Deck { seed, json } => run_deck(seed, json),
    }
}

/// Play in the terminal, logging to a file.
async fn run_play(
    mode: Option<memory_master::GameMode>,
    seed: Option<u64>,
    config: Option<PathBuf>,
    log_file: PathBuf,
) -> Result<()> {
    // Logs would tear the alternate screen, so they go to a file
    let file = std::fs::File::create(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();

    let config = GameConfig::load(config.as_deref())?
        .with_seed(seed)
        .with_default_mode(mode);
    info!(mode = %config.default_mode(), "Starting Memory Master");

    let (session, task) = GameSession::spawn(config.new_game());
    session.start_new_game(Some(*config.default_mode()))?;

    let result = run_tui(session.clone()).await;

    session.shutdown().ok();
    task.await.context("Game session task failed")?;
    result
}

/// Print a shuffled deck.
fn run_deck(seed: Option<u64>, json: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let deck = Deck::generate(&mut deck_rng(seed));
    if json {
        println!("{}", serde_json::to_string_pretty(deck.cards())?);
        return Ok(());
    }
    for row in deck.cards().chunks(memory_master_app::tui::GRID_COLUMNS) {
        let line: Vec<String> = row
            .iter()
            .map(|card| format!("{:>4} {}", card.id().to_string(), card.symbol().glyph()))
            .collect();
        println!("{}", line.join("  "));
    }
    Ok(())
}
