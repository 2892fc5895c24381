//! Front-end state and key handling.

use crate::SessionView;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use memory_master::{CardId, DECK_SIZE, GameMode};
use tracing::debug;

/// Cards per grid row.
pub const GRID_COLUMNS: usize = 4;

/// What a key press asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Flip the card under the cursor.
    Flip(CardId),
    /// Deal a new game.
    NewGame(Option<GameMode>),
    /// Leave the game.
    Quit,
}

/// Cursor position plus the last view received from the session.
pub struct App {
    cursor: usize,
    view: SessionView,
}

impl App {
    /// Creates the front end with an initial view.
    pub fn new(view: SessionView) -> Self {
        Self { cursor: 0, view }
    }

    /// Index of the highlighted card.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Last view received.
    pub fn view(&self) -> &SessionView {
        &self.view
    }

    /// Replaces the view after a session transition.
    pub fn update(&mut self, view: SessionView) {
        self.view = view;
    }

    /// Maps a key press to an action, moving the cursor as a side effect.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let action = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Quit)
            }
            KeyCode::Char('c') => Some(Action::NewGame(Some(GameMode::Classic))),
            KeyCode::Char('m') => Some(Action::NewGame(Some(GameMode::Remember))),
            KeyCode::Char('n') | KeyCode::Char('r') => Some(Action::NewGame(None)),
            KeyCode::Enter | KeyCode::Char(' ') => self.flip(),
            KeyCode::Left | KeyCode::Char('h') => self.step(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.step(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.step(0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.step(0, 1),
            _ => None,
        };
        if let Some(action) = action {
            debug!(?action, cursor = self.cursor, "Key mapped");
        }
        action
    }

    fn flip(&self) -> Option<Action> {
        if !self.view.game.accepts_clicks() {
            return None;
        }
        let card = self.view.game.cards.get(self.cursor)?;
        (!card.is_flipped).then_some(Action::Flip(card.id))
    }

    fn step(&mut self, dx: isize, dy: isize) -> Option<Action> {
        let rows = DECK_SIZE / GRID_COLUMNS;
        let column = (self.cursor % GRID_COLUMNS) as isize + dx;
        let row = (self.cursor / GRID_COLUMNS) as isize + dy;
        let column = column.clamp(0, GRID_COLUMNS as isize - 1) as usize;
        let row = row.clamp(0, rows as isize - 1) as usize;
        self.cursor = row * GRID_COLUMNS + column;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scoreboard;
    use memory_master::MemoryGame;

    fn app(mode: GameMode) -> App {
        let mut game = MemoryGame::with_seed(Some(21));
        game.start_new_game(Some(mode));
        App::new(SessionView::new(game.snapshot(), Scoreboard::default()))
    }

    fn press(app: &mut App, code: KeyCode) -> Option<Action> {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_cursor_stays_on_the_grid() {
        let mut app = app(GameMode::Classic);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.cursor(), 0);

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.cursor(), 5);

        for _ in 0..10 {
            press(&mut app, KeyCode::Right);
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.cursor(), 15);
    }

    #[test]
    fn test_enter_flips_the_highlighted_card() {
        let mut app = app(GameMode::Classic);
        press(&mut app, KeyCode::Right);
        assert_eq!(
            press(&mut app, KeyCode::Enter),
            Some(Action::Flip(CardId::new(1)))
        );
    }

    #[test]
    fn test_no_flips_during_preview() {
        let mut app = app(GameMode::Remember);
        assert_eq!(press(&mut app, KeyCode::Char(' ')), None);
    }

    #[test]
    fn test_mode_and_quit_keys() {
        let mut app = app(GameMode::Classic);
        assert_eq!(
            press(&mut app, KeyCode::Char('m')),
            Some(Action::NewGame(Some(GameMode::Remember)))
        );
        assert_eq!(
            press(&mut app, KeyCode::Char('c')),
            Some(Action::NewGame(Some(GameMode::Classic)))
        );
        assert_eq!(press(&mut app, KeyCode::Char('n')), Some(Action::NewGame(None)));
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(press(&mut app, KeyCode::Char('q')), Some(Action::Quit));
    }
}
