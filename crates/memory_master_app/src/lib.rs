//! Memory Master application layer
//!
//! Wraps the pure [`memory_master`] game in an async session that owns the
//! phase clock and turn-resolution timers, plus configuration, a per-mode
//! scoreboard and a terminal front end.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
mod scoreboard;
mod session;
pub mod tui;

pub use config::{CONFIG_ENV, ConfigError, DEFAULT_CONFIG_FILE, GameConfig};
pub use scoreboard::{Record, Scoreboard};
pub use session::{Command, GameSession, SessionError, SessionHandle, SessionView};
