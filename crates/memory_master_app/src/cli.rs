//! Command-line interface for memory_master.

use clap::{Parser, Subcommand};
use memory_master::GameMode;
use std::path::PathBuf;

/// Memory Master - find every pair in a shuffled 4x4 deck
#[derive(Parser, Debug)]
#[command(name = "memory_master")]
#[command(about = "Single-player matching-pairs game for the terminal", long_about = None)]
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
        /// Mode of the first game (classic or remember)
        #[arg(short, long)]
        mode: Option<GameMode>,

        /// Seed for reproducible shuffles
        #[arg(short, long)]
        seed: Option<u64>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Where to write logs while the terminal is in use
        #[arg(long, default_value = "memory_master.log")]
        log_file: PathBuf,
    },

    /// Print a freshly shuffled deck
    Deck {
        /// Seed for reproducible shuffles
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the deck as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_parses_mode_case_insensitively() {
        let cli = Cli::try_parse_from(["memory_master", "play", "--mode", "REMEMBER", "--seed", "4"])
            .unwrap();
        match cli.command {
            Command::Play { mode, seed, config, log_file } => {
                assert_eq!(mode, Some(GameMode::Remember));
                assert_eq!(seed, Some(4));
                assert!(config.is_none());
                assert_eq!(log_file, PathBuf::from("memory_master.log"));
            }
            other => panic!("Expected play, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["memory_master", "play", "--mode", "speed"]).is_err());
    }
}
