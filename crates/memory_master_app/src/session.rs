//! Async game session.
//!
//! A [`GameSession`] task owns the [`MemoryGame`] and is the only thing that
//! mutates it. Clicks and restarts arrive over a command channel, the phase
//! clock and turn resolutions come from timers the task owns, and every
//! accepted transition is published on a watch channel.
//!
//! Timers are scoped. The phase clock belongs to one (status, generation)
//! pair and is replaced whenever either changes, so at most one periodic
//! timer is ever live. A pending resolution timer is dropped on restart.

use crate::Scoreboard;
use derive_more::Display;
use derive_new::new;
use memory_master::{
    CardId, ClickOutcome, GameMode, GameSnapshot, GameStatus, Generation, MemoryGame,
    PendingResolution, TICK_PERIOD, TickOutcome,
};
use std::pin::Pin;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior, Sleep, interval_at, sleep};
use tracing::{debug, info, instrument, warn};

/// Requests a front end can make of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Deal a new game; `None` keeps the current mode.
    NewGame(Option<GameMode>),
    /// Flip a card.
    Click(CardId),
    /// Stop the session task.
    Shutdown,
}

/// What front ends render.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct SessionView {
    /// Current game state.
    pub game: GameSnapshot,
    /// Wins so far this process.
    pub scoreboard: Scoreboard,
}

/// Session errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SessionError {
    /// The session task is gone.
    #[display("Game session has shut down")]
    Closed,
}

impl std::error::Error for SessionError {}

/// Cheap handle for talking to a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<Command>,
    views: watch::Receiver<SessionView>,
}

impl SessionHandle {
    /// Deals a new game.
    pub fn start_new_game(&self, mode: Option<GameMode>) -> Result<(), SessionError> {
        self.send(Command::NewGame(mode))
    }

    /// Flips a card.
    pub fn handle_card_click(&self, id: CardId) -> Result<(), SessionError> {
        self.send(Command::Click(id))
    }

    /// Asks the session task to stop.
    pub fn shutdown(&self) -> Result<(), SessionError> {
        self.send(Command::Shutdown)
    }

    /// Latest published game state.
    pub fn snapshot(&self) -> GameSnapshot {
        self.views.borrow().game.clone()
    }

    /// Latest published view.
    pub fn view(&self) -> SessionView {
        self.views.borrow().clone()
    }

    /// A receiver notified on every published transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.views.clone()
    }

    fn send(&self, command: Command) -> Result<(), SessionError> {
        self.commands.send(command).map_err(|_| SessionError::Closed)
    }
}

/// Periodic timer bound to the phase it was started for.
struct PhaseClock {
    scope: (GameStatus, Generation),
    interval: Interval,
}

/// Delay before a judged turn settles.
struct ResolutionTimer {
    pending: PendingResolution,
    sleep: Pin<Box<Sleep>>,
}

/// The task that owns a game.
pub struct GameSession {
    game: MemoryGame,
    scoreboard: Scoreboard,
    clock: Option<PhaseClock>,
    resolution: Option<ResolutionTimer>,
    views: watch::Sender<SessionView>,
}

impl GameSession {
    /// Spawns a session task for `game` on the current runtime.
    pub fn spawn(game: MemoryGame) -> (SessionHandle, JoinHandle<()>) {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (views_tx, views_rx) = watch::channel(SessionView::new(
            game.snapshot(),
            Scoreboard::default(),
        ));

        let mut session = Self {
            game,
            scoreboard: Scoreboard::default(),
            clock: None,
            resolution: None,
            views: views_tx,
        };
        session.sync_clock();

        let task = tokio::spawn(session.run(commands_rx));
        let handle = SessionHandle {
            commands: commands_tx,
            views: views_rx,
        };
        (handle, task)
    }

    #[instrument(skip_all)]
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        info!("Game session started");
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.handle(command),
                },
                _ = next_tick(&mut self.clock) => self.on_tick(),
                pending = resolution_due(&mut self.resolution) => self.on_resolution(pending),
            }
        }
        info!("Game session stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::NewGame(mode) => {
                if let Some(timer) = self.resolution.take() {
                    debug!(stale = %timer.pending.generation(), "Cancelled pending resolution");
                }
                self.game.start_new_game(mode);
            }
            Command::Click(id) => match self.game.handle_card_click(id) {
                Ok(ClickOutcome::FirstSelected(_)) => {}
                Ok(ClickOutcome::SecondSelected(pending)) => {
                    debug!(outcome = ?pending.outcome(), delay_ms = pending.delay().as_millis() as u64, "Resolution scheduled");
                    self.resolution = Some(ResolutionTimer {
                        pending,
                        sleep: Box::pin(sleep(pending.delay())),
                    });
                }
                Err(_) => return,
            },
            Command::Shutdown => return,
        }
        self.sync_clock();
        self.publish();
    }

    fn on_tick(&mut self) {
        if self.game.tick() == TickOutcome::Ignored {
            return;
        }
        self.sync_clock();
        self.publish();
    }

    fn on_resolution(&mut self, pending: PendingResolution) {
        self.resolution = None;
        if let Err(err) = self.game.resolve(pending) {
            warn!(%err, "Resolution dropped");
            return;
        }
        if let Some(summary) = self.game.snapshot().win_summary() {
            self.scoreboard.record(self.game.mode(), summary);
        }
        self.sync_clock();
        self.publish();
    }

    /// Starts, keeps or stops the phase clock to match the game's phase.
    fn sync_clock(&mut self) {
        let status = self.game.status();
        if !status.is_timed() {
            if self.clock.take().is_some() {
                debug!(%status, "Clock stopped");
            }
            return;
        }

        let scope = (status, self.game.generation());
        if self.clock.as_ref().is_some_and(|clock| clock.scope == scope) {
            return;
        }
        let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        debug!(%status, generation = %scope.1, "Clock started");
        self.clock = Some(PhaseClock { scope, interval });
    }

    fn publish(&mut self) {
        let view = SessionView::new(self.game.snapshot(), self.scoreboard.clone());
        self.views.send_if_modified(|current| {
            if *current == view {
                false
            } else {
                *current = view;
                true
            }
        });
    }
}

async fn next_tick(clock: &mut Option<PhaseClock>) {
    match clock {
        Some(clock) => {
            clock.interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

async fn resolution_due(timer: &mut Option<ResolutionTimer>) -> PendingResolution {
    match timer {
        Some(timer) => {
            timer.sleep.as_mut().await;
            timer.pending
        }
        None => std::future::pending().await,
    }
}
