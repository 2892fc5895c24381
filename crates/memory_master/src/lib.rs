//! Memory Master - matching-pairs game logic
//!
//! A player flips cards two at a time looking for pairs in a shuffled 4x4
//! deck. This crate holds the pure game: no clocks, no I/O. A driver feeds
//! it clicks, one-second ticks and the delayed turn resolutions it hands
//! back, and renders the snapshots it produces.
//!
//! # Architecture
//!
//! - **Deck**: Fisher-Yates shuffled pairs of a fixed symbol alphabet
//! - **Turn**: judging a pair and settling the outcome after a delay
//! - **Typestate**: one type per phase (preview, playing, won)
//! - **Game**: the single versioned record that owns the current phase
//!
//! # Example
//!
//! ```
//! use memory_master::{CardId, ClickOutcome, GameMode, MemoryGame};
//!
//! let mut game = MemoryGame::with_seed(Some(7));
//! game.start_new_game(Some(GameMode::Classic));
//!
//! game.handle_card_click(CardId::new(0)).unwrap();
//! if let Ok(ClickOutcome::SecondSelected(pending)) = game.handle_card_click(CardId::new(1)) {
//!     // A driver waits `pending.delay()` before calling back.
//!     game.resolve(pending).unwrap();
//! }
//! assert_eq!(game.moves(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod card;
pub mod contracts;
mod deck;
mod game;
pub mod invariants;
mod mode;
mod snapshot;
mod symbol;
mod timings;
mod turn;
mod typestate;

pub use action::{ClickOutcome, ClickRejected, ResolveError};
pub use card::{Card, CardFace, CardId};
pub use deck::{DECK_SIZE, Deck, DeckRng, deck_rng, shuffle};
pub use game::{MemoryGame, Phase, TickOutcome};
pub use mode::{GameMode, GameStatus};
pub use snapshot::{CardView, GameSnapshot, WinSummary, format_time};
pub use symbol::{PAIR_COUNT, Symbol};
pub use timings::{MATCH_DELAY, MISMATCH_DELAY, PREVIEW_SECONDS, TICK_PERIOD, Timings};
pub use turn::{Generation, PendingResolution, Turn, TurnOutcome, judge};
pub use typestate::{GamePlaying, GamePreview, GameWon, PlayResult, PreviewTick, Table};
