//! Terminal UI for Memory Master

mod app;
mod ui;

pub use app::{Action, App, GRID_COLUMNS};

use crate::SessionHandle;
use anyhow::Result;
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tracing::{debug, error, info, instrument};

/// Runs the terminal front end until the player quits.
pub async fn run_tui(session: SessionHandle) -> Result<()> {
    info!("Starting Memory Master TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_game_loop(&mut terminal, &session).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

#[instrument(skip_all)]
async fn run_game_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &SessionHandle,
) -> Result<()> {
    let mut views = session.subscribe();
    let mut app = App::new(views.borrow_and_update().clone());
    let mut events = EventStream::new();

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        tokio::select! {
            changed = views.changed() => {
                if changed.is_err() {
                    info!("Session closed");
                    return Ok(());
                }
                app.update(views.borrow_and_update().clone());
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => match app.handle_key(key) {
                    Some(Action::Quit) => {
                        info!("Player quit");
                        return Ok(());
                    }
                    Some(Action::NewGame(mode)) => session.start_new_game(mode)?,
                    Some(Action::Flip(id)) => session.handle_card_click(id)?,
                    None => {}
                },
                Some(Ok(Event::Resize(width, height))) => {
                    debug!(width, height, "Terminal resized");
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => return Ok(()),
            },
        }
    }
}
