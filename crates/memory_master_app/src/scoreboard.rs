//! Best results per mode, kept for the lifetime of the process.

use derive_getters::Getters;
use derive_new::new;
use memory_master::{GameMode, WinSummary};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Results for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct Record {
    games_won: u32,
    best_time: u32,
    fewest_moves: u32,
}

impl Record {
    fn first(summary: WinSummary) -> Self {
        Self::new(1, summary.time_elapsed(), summary.moves())
    }

    /// Folds a win in; true when it beat a previous best.
    fn absorb(&mut self, summary: WinSummary) -> bool {
        self.games_won += 1;
        let faster = summary.time_elapsed() < self.best_time;
        let shorter = summary.moves() < self.fewest_moves;
        self.best_time = self.best_time.min(summary.time_elapsed());
        self.fewest_moves = self.fewest_moves.min(summary.moves());
        faster || shorter
    }
}

/// Win records for both modes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    classic: Option<Record>,
    remember: Option<Record>,
}

impl Scoreboard {
    /// Record for a mode, once a game in it has been won.
    pub fn get(&self, mode: GameMode) -> Option<&Record> {
        match mode {
            GameMode::Classic => self.classic.as_ref(),
            GameMode::Remember => self.remember.as_ref(),
        }
    }

    /// Adds a win. Returns true when it set a new best time or move count.
    pub fn record(&mut self, mode: GameMode, summary: WinSummary) -> bool {
        let slot = match mode {
            GameMode::Classic => &mut self.classic,
            GameMode::Remember => &mut self.remember,
        };
        let improved = match slot {
            Some(record) => record.absorb(summary),
            None => {
                *slot = Some(Record::first(summary));
                true
            }
        };
        info!(%mode, %summary, improved, "Win recorded");
        improved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_win_sets_record() {
        let mut board = Scoreboard::default();
        assert!(board.get(GameMode::Classic).is_none());

        assert!(board.record(GameMode::Classic, WinSummary::new(10, 42)));
        let record = board.get(GameMode::Classic).unwrap();
        assert_eq!(*record.games_won(), 1);
        assert_eq!(*record.best_time(), 42);
        assert_eq!(*record.fewest_moves(), 10);
        assert!(board.get(GameMode::Remember).is_none());
    }

    #[test]
    fn test_bests_are_tracked_independently() {
        let mut board = Scoreboard::default();
        board.record(GameMode::Remember, WinSummary::new(10, 42));

        assert!(!board.record(GameMode::Remember, WinSummary::new(12, 50)));
        assert!(board.record(GameMode::Remember, WinSummary::new(9, 60)));

        let record = board.get(GameMode::Remember).unwrap();
        assert_eq!(*record.games_won(), 3);
        assert_eq!(*record.best_time(), 42);
        assert_eq!(*record.fewest_moves(), 9);
    }
}
