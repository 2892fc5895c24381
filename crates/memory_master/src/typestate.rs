//! Phase-specific typestate structs for a memory game.
//!
//! Each phase is its own type carrying only what that phase needs. Turn
//! selections exist only inside [`GamePlaying`], so a selection can never be
//! recorded while previewing or after the game is won.

use crate::contracts::{ClickContract, Contract, ResolveContract};
use crate::{
    CardId, ClickOutcome, ClickRejected, Deck, Generation, PendingResolution, ResolveError,
    Timings, Turn, TurnOutcome, WinSummary,
};
use tracing::{debug, info, instrument};

// ─────────────────────────────────────────────────────────────
//  Table (shared by every phase)
// ─────────────────────────────────────────────────────────────

/// Everything a dealt game carries from phase to phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub(crate) deck: Deck,
    pub(crate) moves: u32,
    pub(crate) elapsed: u32,
    pub(crate) generation: Generation,
    pub(crate) timings: Timings,
}

impl Table {
    /// Deals a fresh table with zeroed stats.
    pub fn deal(deck: Deck, generation: Generation, timings: Timings) -> Self {
        Self {
            deck,
            moves: 0,
            elapsed: 0,
            generation,
            timings,
        }
    }

    /// The cards.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Completed turns.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Seconds spent playing.
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Generation the table was dealt in.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Pacing for this game.
    pub fn timings(&self) -> &Timings {
        &self.timings
    }
}

// ─────────────────────────────────────────────────────────────
//  Preview Phase
// ─────────────────────────────────────────────────────────────

/// Remember mode opening: every face shown while a countdown runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamePreview {
    table: Table,
    countdown: u32,
}

/// Result of starting or ticking a preview.
#[derive(Debug)]
pub enum PreviewTick {
    /// Still counting down.
    Counting(GamePreview),
    /// Countdown over; faces hidden and play begun.
    Finished(GamePlaying),
}

impl GamePreview {
    /// Reveals every card and starts the countdown.
    ///
    /// A zero-second preview goes straight to play.
    #[instrument(skip(table), fields(generation = %table.generation))]
    pub fn begin(mut table: Table) -> PreviewTick {
        let countdown = table.timings.preview_seconds();
        if countdown == 0 {
            return PreviewTick::Finished(GamePlaying::begin(table));
        }
        table.deck.reveal_all();
        debug!(countdown, "Preview started");
        PreviewTick::Counting(Self { table, countdown })
    }

    /// Advances the countdown by one second.
    #[instrument(skip(self), fields(generation = %self.table.generation, countdown = self.countdown))]
    pub fn tick(mut self) -> PreviewTick {
        if self.countdown <= 1 {
            return PreviewTick::Finished(self.finish());
        }
        self.countdown -= 1;
        PreviewTick::Counting(self)
    }

    /// Seconds left before play begins.
    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    /// The table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    fn finish(mut self) -> GamePlaying {
        self.table.deck.hide_all();
        info!(generation = %self.table.generation, "Preview over, play begins");
        GamePlaying::begin(self.table)
    }
}

// ─────────────────────────────────────────────────────────────
//  Playing Phase
// ─────────────────────────────────────────────────────────────

/// Game accepting clicks with the clock running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamePlaying {
    pub(crate) table: Table,
    pub(crate) turn: Turn,
}

/// Result of checking a playing game for a win.
#[derive(Debug)]
pub enum PlayResult {
    /// Pairs remain.
    Playing(GamePlaying),
    /// Every pair matched.
    Won(GameWon),
}

impl GamePlaying {
    /// Starts play on a table with an open turn.
    pub fn begin(table: Table) -> Self {
        Self {
            table,
            turn: Turn::Open,
        }
    }

    /// The table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Current turn state.
    pub fn turn(&self) -> &Turn {
        &self.turn
    }

    /// Advances the play clock by one second. Returns the new elapsed time.
    pub fn tick(&mut self) -> u32 {
        self.table.elapsed = self.table.elapsed.saturating_add(1);
        self.table.elapsed
    }

    /// Handles a click on `id`.
    ///
    /// The first click of a turn records a selection. The second judges
    /// the pair, counts a move and takes the processing lock until
    /// [`GamePlaying::resolve`] is called with the returned resolution.
    #[instrument(skip(self), fields(generation = %self.table.generation))]
    pub fn click(&mut self, id: CardId) -> Result<ClickOutcome, ClickRejected> {
        ClickContract::pre(self, &id)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.table.deck.turn_up(id);
        let outcome = match self.turn {
            Turn::Open => {
                self.turn = Turn::FirstPicked(id);
                ClickOutcome::FirstSelected(id)
            }
            Turn::FirstPicked(first) => {
                let (Some(first_card), Some(second_card)) =
                    (self.table.deck.get(first), self.table.deck.get(id))
                else {
                    return Err(ClickRejected::UnknownCard(id));
                };
                let pending = PendingResolution::judge(
                    self.table.generation,
                    first_card,
                    second_card,
                    &self.table.timings,
                );
                self.table.moves += 1;
                self.turn = Turn::Resolving(pending);
                ClickOutcome::SecondSelected(pending)
            }
            Turn::Resolving(_) => return Err(ClickRejected::Processing),
        };

        #[cfg(debug_assertions)]
        crate::contracts::enforce(ClickContract::post(&before, self), "click");

        debug!(?outcome, moves = self.table.moves, "Click accepted");
        Ok(outcome)
    }

    /// Applies a turn's delayed outcome and releases the processing lock.
    ///
    /// Does not check for a win; call [`GamePlaying::check_win`] after any
    /// change to the deck.
    #[instrument(skip(self, pending), fields(generation = %self.table.generation, stamped = %pending.generation()))]
    pub fn resolve(&mut self, pending: &PendingResolution) -> Result<TurnOutcome, ResolveError> {
        ResolveContract::pre(self, pending)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        pending.settle(&mut self.table.deck);
        self.turn = Turn::Open;

        #[cfg(debug_assertions)]
        crate::contracts::enforce(ResolveContract::post(&before, self), "resolve");

        Ok(pending.outcome())
    }

    /// Moves to [`GameWon`] once every card is matched.
    pub fn check_win(self) -> PlayResult {
        if self.table.deck.all_matched() {
            info!(
                generation = %self.table.generation,
                moves = self.table.moves,
                elapsed = self.table.elapsed,
                "All pairs matched"
            );
            PlayResult::Won(GameWon { table: self.table })
        } else {
            PlayResult::Playing(self)
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Won Phase
// ─────────────────────────────────────────────────────────────

/// Every pair matched; the clock is stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameWon {
    table: Table,
}

impl GameWon {
    /// The table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Final stats.
    pub fn summary(&self) -> WinSummary {
        WinSummary::new(self.table.moves, self.table.elapsed)
    }
}
