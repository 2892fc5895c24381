//! The versioned game record.
//!
//! [`MemoryGame`] is the single writer of game state. It owns the current
//! phase and exposes one method per external event: restart, click, tick
//! and delayed turn resolution. Every accepted transition bumps the
//! version so observers can skip redundant redraws.

use crate::{
    CardId, CardView, ClickOutcome, ClickRejected, Deck, DeckRng, GameMode, GamePlaying,
    GamePreview, GameSnapshot, GameStatus, GameWon, Generation, PendingResolution, PlayResult,
    PreviewTick, ResolveError, Table, Timings, TurnOutcome, deck_rng,
};
use tracing::{debug, info, instrument, warn};

/// The phase a game is in, with that phase's data.
#[derive(Debug, Clone, Default)]
pub enum Phase {
    /// Nothing dealt yet.
    #[default]
    Idle,
    /// Remember mode countdown.
    Preview(GamePreview),
    /// Accepting clicks.
    Playing(GamePlaying),
    /// All pairs matched.
    Won(GameWon),
}

impl Phase {
    /// Coarse status for renderers.
    pub fn status(&self) -> GameStatus {
        match self {
            Phase::Idle => GameStatus::Idle,
            Phase::Preview(_) => GameStatus::Preview,
            Phase::Playing(_) => GameStatus::Playing,
            Phase::Won(_) => GameStatus::Won,
        }
    }

    /// The dealt table, if any.
    pub fn table(&self) -> Option<&Table> {
        match self {
            Phase::Idle => None,
            Phase::Preview(preview) => Some(preview.table()),
            Phase::Playing(playing) => Some(playing.table()),
            Phase::Won(won) => Some(won.table()),
        }
    }
}

/// What a clock tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No timed phase is active.
    Ignored,
    /// Play clock advanced to this many seconds.
    Clock(u32),
    /// Preview countdown now shows this many seconds.
    Countdown(u32),
    /// Preview ended; play has begun.
    PreviewEnded,
}

/// Single-player matching-pairs game.
#[derive(Debug, Clone)]
pub struct MemoryGame {
    mode: GameMode,
    timings: Timings,
    rng: DeckRng,
    generation: Generation,
    version: u64,
    phase: Phase,
}

impl MemoryGame {
    /// Creates an idle game.
    pub fn new(timings: Timings, rng: DeckRng) -> Self {
        Self {
            mode: GameMode::default(),
            timings,
            rng,
            generation: Generation::default(),
            version: 0,
            phase: Phase::Idle,
        }
    }

    /// Creates an idle game with default timings and an optionally seeded deck RNG.
    pub fn with_seed(seed: Option<u64>) -> Self {
        Self::new(Timings::default(), deck_rng(seed))
    }

    // ─────────────────────────────────────────────────────────
    //  Transitions
    // ─────────────────────────────────────────────────────────

    /// Deals a fresh game, discarding whatever was in progress.
    ///
    /// `None` keeps the last used mode. Returns the new game's generation;
    /// resolutions stamped with any earlier generation will be ignored.
    #[instrument(skip(self), fields(previous = %self.generation))]
    pub fn start_new_game(&mut self, mode: Option<GameMode>) -> Generation {
        self.mode = mode.unwrap_or(self.mode);
        self.generation = self.generation.next();

        let deck = Deck::generate(&mut self.rng);
        let table = Table::deal(deck, self.generation, self.timings);
        self.phase = match self.mode {
            GameMode::Classic => Phase::Playing(GamePlaying::begin(table)),
            GameMode::Remember => match GamePreview::begin(table) {
                PreviewTick::Counting(preview) => Phase::Preview(preview),
                PreviewTick::Finished(playing) => Phase::Playing(playing),
            },
        };

        info!(mode = %self.mode, generation = %self.generation, status = %self.status(), "New game");
        self.commit();
        self.generation
    }

    /// Submits a click on a card.
    ///
    /// Rejections leave the state untouched.
    #[instrument(skip(self), fields(generation = %self.generation, status = %self.status()))]
    pub fn handle_card_click(&mut self, id: CardId) -> Result<ClickOutcome, ClickRejected> {
        let status = self.status();
        let Phase::Playing(playing) = &mut self.phase else {
            debug!(%id, %status, "Click ignored outside play");
            return Err(ClickRejected::NotPlaying(status));
        };
        match playing.click(id) {
            Ok(outcome) => {
                self.commit();
                Ok(outcome)
            }
            Err(rejection) => {
                debug!(%id, %rejection, "Click ignored");
                Err(rejection)
            }
        }
    }

    /// Advances whichever clock the current phase runs by one second.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = match std::mem::take(&mut self.phase) {
            Phase::Preview(preview) => match preview.tick() {
                PreviewTick::Counting(preview) => {
                    let remaining = preview.countdown();
                    self.phase = Phase::Preview(preview);
                    TickOutcome::Countdown(remaining)
                }
                PreviewTick::Finished(playing) => {
                    self.phase = Phase::Playing(playing);
                    TickOutcome::PreviewEnded
                }
            },
            Phase::Playing(mut playing) => {
                let elapsed = playing.tick();
                self.phase = Phase::Playing(playing);
                TickOutcome::Clock(elapsed)
            }
            phase @ (Phase::Idle | Phase::Won(_)) => {
                self.phase = phase;
                TickOutcome::Ignored
            }
        };
        if outcome != TickOutcome::Ignored {
            debug!(?outcome, generation = %self.generation, "Tick");
            self.commit();
        }
        outcome
    }

    /// Applies a turn's delayed outcome, then checks for a win.
    ///
    /// Resolutions from a previous game, or for a turn that is no longer
    /// pending, are discarded without touching the state.
    #[instrument(skip(self, pending), fields(generation = %self.generation, stamped = %pending.generation()))]
    pub fn resolve(&mut self, pending: PendingResolution) -> Result<TurnOutcome, ResolveError> {
        if pending.generation() != self.generation {
            let err = ResolveError::StaleGeneration {
                expected: self.generation,
                found: pending.generation(),
            };
            warn!(%err, "Discarding stale resolution");
            return Err(err);
        }
        let status = self.status();
        let Phase::Playing(playing) = &mut self.phase else {
            warn!(%status, "Resolution arrived outside play");
            return Err(ResolveError::NoPendingTurn);
        };
        let outcome = playing.resolve(&pending).inspect_err(|err| {
            warn!(%err, "Discarding resolution");
        })?;

        if let Phase::Playing(playing) = std::mem::take(&mut self.phase) {
            self.phase = match playing.check_win() {
                PlayResult::Playing(playing) => Phase::Playing(playing),
                PlayResult::Won(won) => {
                    info!(summary = %won.summary(), mode = %self.mode, "Game won");
                    Phase::Won(won)
                }
            };
        }
        self.commit();
        Ok(outcome)
    }

    fn commit(&mut self) {
        self.version = self.version.wrapping_add(1);
        #[cfg(debug_assertions)]
        {
            use crate::invariants::{InvariantSet, MemoryInvariants};
            crate::contracts::enforce(MemoryInvariants::check_all(self), "transition");
        }
    }

    // ─────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────

    /// Mode of the current (or next) game.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Coarse status.
    pub fn status(&self) -> GameStatus {
        self.phase.status()
    }

    /// Current phase with its data.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Generation of the current game.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Transition counter.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Pacing applied to new games.
    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    /// The dealt deck, if any.
    pub fn deck(&self) -> Option<&Deck> {
        self.phase.table().map(Table::deck)
    }

    /// Completed turns.
    pub fn moves(&self) -> u32 {
        self.phase.table().map_or(0, Table::moves)
    }

    /// Seconds played.
    pub fn time_elapsed(&self) -> u32 {
        self.phase.table().map_or(0, Table::elapsed)
    }

    /// Seconds left in the preview; zero outside it.
    pub fn preview_countdown(&self) -> u32 {
        match &self.phase {
            Phase::Preview(preview) => preview.countdown(),
            _ => 0,
        }
    }

    /// The turn waiting on its delay, if any.
    pub fn pending(&self) -> Option<PendingResolution> {
        match &self.phase {
            Phase::Playing(playing) => playing.turn().pending().copied(),
            _ => None,
        }
    }

    /// Renderer view of the current state.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            cards: self
                .deck()
                .map(|deck| deck.cards().iter().map(CardView::from).collect())
                .unwrap_or_default(),
            moves: self.moves(),
            time_elapsed: self.time_elapsed(),
            status: self.status(),
            mode: self.mode,
            preview_countdown: self.preview_countdown(),
            generation: self.generation,
            version: self.version,
        }
    }
}
