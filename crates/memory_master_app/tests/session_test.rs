//! Timing behaviour of the async session, run on a paused clock.

use memory_master::{CardId, GameMode, GameStatus, MemoryGame, Symbol};
use memory_master_app::{GameSession, SessionError, SessionHandle, SessionView};
use std::time::Duration;
use strum::IntoEnumIterator;
use tokio::time::{Instant, sleep, timeout};

const PATIENCE: Duration = Duration::from_secs(30);

async fn started(mode: GameMode, seed: u64) -> SessionHandle {
    let (session, _task) = GameSession::spawn(MemoryGame::with_seed(Some(seed)));
    session.start_new_game(Some(mode)).unwrap();
    wait_until(&session, |view| view.game.status != GameStatus::Idle).await;
    session
}

async fn wait_until(
    session: &SessionHandle,
    condition: impl FnMut(&SessionView) -> bool,
) -> SessionView {
    let mut views = session.subscribe();
    let view = timeout(PATIENCE, views.wait_for(condition))
        .await
        .expect("Condition reached in time")
        .expect("Session still running")
        .clone();
    view
}

fn pairs(view: &SessionView) -> Vec<(CardId, CardId)> {
    Symbol::iter()
        .map(|symbol| {
            let ids: Vec<CardId> = view
                .game
                .cards
                .iter()
                .filter(|card| card.content == symbol)
                .map(|card| card.id)
                .collect();
            (ids[0], ids[1])
        })
        .collect()
}

fn mismatched(view: &SessionView) -> (CardId, CardId) {
    let first = &view.game.cards[0];
    let other = view
        .game
        .cards
        .iter()
        .find(|card| card.content != first.content)
        .unwrap();
    (first.id, other.id)
}

#[tokio::test(start_paused = true)]
async fn test_mismatch_turns_back_after_delay() {
    let session = started(GameMode::Classic, 1).await;
    let (a, b) = mismatched(&session.view());

    session.handle_card_click(a).unwrap();
    session.handle_card_click(b).unwrap();
    let flipped = wait_until(&session, |view| view.game.moves == 1).await;
    assert!(flipped.game.cards[a.index()].is_flipped);
    assert!(flipped.game.cards[b.index()].is_flipped);
    let clicked_at = Instant::now();

    let settled = wait_until(&session, |view| {
        view.game.cards.iter().all(|card| !card.is_flipped)
    })
    .await;
    assert!(clicked_at.elapsed() >= Duration::from_millis(1000));
    assert_eq!(settled.game.moves, 1);
    assert_eq!(settled.game.matched(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_match_locks_in_after_delay() {
    let session = started(GameMode::Classic, 2).await;
    let (a, b) = pairs(&session.view())[0];

    session.handle_card_click(a).unwrap();
    session.handle_card_click(b).unwrap();
    wait_until(&session, |view| view.game.moves == 1).await;
    let clicked_at = Instant::now();

    let settled = wait_until(&session, |view| view.game.matched() == 2).await;
    let waited = clicked_at.elapsed();
    assert!(waited >= Duration::from_millis(500));
    assert!(waited < Duration::from_millis(1000));
    assert!(settled.game.cards[a.index()].is_matched);
}

#[tokio::test(start_paused = true)]
async fn test_play_clock_ticks_every_second() {
    let session = started(GameMode::Classic, 3).await;
    sleep(Duration::from_millis(3500)).await;
    let snapshot = session.snapshot();
    assert_eq!(snapshot.time_elapsed, 3);
    assert_eq!(snapshot.formatted_time(), "0:03");
}

#[tokio::test(start_paused = true)]
async fn test_preview_hands_over_to_play_clock() {
    let session = started(GameMode::Remember, 4).await;
    assert_eq!(session.snapshot().preview_countdown, 5);

    sleep(Duration::from_millis(4500)).await;
    let snapshot = session.snapshot();
    assert_eq!(snapshot.status, GameStatus::Preview);
    assert_eq!(snapshot.preview_countdown, 1);
    assert!(snapshot.cards.iter().all(|card| card.is_flipped));

    sleep(Duration::from_secs(1)).await;
    let snapshot = session.snapshot();
    assert_eq!(snapshot.status, GameStatus::Playing);
    assert_eq!(snapshot.time_elapsed, 0);
    assert!(snapshot.cards.iter().all(|card| !card.is_flipped));

    sleep(Duration::from_secs(1)).await;
    assert_eq!(session.snapshot().time_elapsed, 1);
}

#[tokio::test(start_paused = true)]
async fn test_restart_cancels_pending_resolution() {
    let session = started(GameMode::Classic, 5).await;
    let first_generation = session.snapshot().generation;
    let (a, b) = pairs(&session.view())[0];

    // Off the old clock's one-second beat
    sleep(Duration::from_millis(1300)).await;
    session.handle_card_click(a).unwrap();
    session.handle_card_click(b).unwrap();
    wait_until(&session, |view| view.game.moves == 1).await;

    session.start_new_game(None).unwrap();
    let fresh = wait_until(&session, |view| view.game.generation != first_generation).await;
    assert_eq!(fresh.game.moves, 0);
    assert_eq!(fresh.game.time_elapsed, 0);

    // Past both the cancelled 500ms resolution and the old clock's next tick
    sleep(Duration::from_millis(800)).await;
    let snapshot = session.snapshot();
    assert_eq!(snapshot.matched(), 0);
    assert!(snapshot.cards.iter().all(|card| !card.is_flipped));
    assert_eq!(snapshot.time_elapsed, 0);

    sleep(Duration::from_millis(400)).await;
    assert_eq!(session.snapshot().time_elapsed, 1);
}

#[tokio::test(start_paused = true)]
async fn test_restart_mid_preview_restarts_the_clock() {
    let session = started(GameMode::Remember, 9).await;
    let first_generation = session.snapshot().generation;

    sleep(Duration::from_millis(2500)).await;
    assert_eq!(session.snapshot().preview_countdown, 3);

    session.start_new_game(Some(GameMode::Remember)).unwrap();
    let second = wait_until(&session, |view| view.game.generation != first_generation).await;
    assert_eq!(second.game.preview_countdown, 5);

    sleep(Duration::from_millis(700)).await;
    let snapshot = session.snapshot();
    assert_eq!(snapshot.status, GameStatus::Preview);
    assert_eq!(snapshot.preview_countdown, 5);

    session.start_new_game(Some(GameMode::Classic)).unwrap();
    let second_generation = second.game.generation;
    wait_until(&session, |view| view.game.generation != second_generation).await;

    sleep(Duration::from_millis(700)).await;
    let snapshot = session.snapshot();
    assert_eq!(snapshot.status, GameStatus::Playing);
    assert_eq!(snapshot.time_elapsed, 0);

    sleep(Duration::from_millis(400)).await;
    assert_eq!(session.snapshot().time_elapsed, 1);
}

#[tokio::test(start_paused = true)]
async fn test_win_records_score_and_stops_clock() {
    let session = started(GameMode::Classic, 6).await;
    let all_pairs = pairs(&session.view());

    for (turn, (a, b)) in all_pairs.into_iter().enumerate() {
        session.handle_card_click(a).unwrap();
        session.handle_card_click(b).unwrap();
        wait_until(&session, |view| view.game.matched() == 2 * (turn + 1)).await;
    }

    let won = wait_until(&session, |view| view.game.status == GameStatus::Won).await;
    let summary = won.game.win_summary().unwrap();
    assert_eq!(summary.moves(), 8);

    let record = won.scoreboard.get(GameMode::Classic).unwrap();
    assert_eq!(*record.games_won(), 1);
    assert_eq!(*record.fewest_moves(), 8);
    assert!(won.scoreboard.get(GameMode::Remember).is_none());

    sleep(Duration::from_secs(5)).await;
    assert_eq!(session.snapshot().time_elapsed, summary.time_elapsed());
}

#[tokio::test(start_paused = true)]
async fn test_clicks_during_preview_are_ignored() {
    let session = started(GameMode::Remember, 7).await;
    let version = session.snapshot().version;

    session.handle_card_click(CardId::new(0)).unwrap();
    sleep(Duration::from_millis(100)).await;
    let snapshot = session.snapshot();
    assert_eq!(snapshot.version, version);
    assert_eq!(snapshot.moves, 0);
}

#[tokio::test]
async fn test_shutdown_closes_the_handle() {
    let (session, task) = GameSession::spawn(MemoryGame::with_seed(Some(8)));
    session.shutdown().unwrap();
    task.await.unwrap();

    assert_eq!(
        session.handle_card_click(CardId::new(0)),
        Err(SessionError::Closed)
    );
    assert_eq!(session.start_new_game(None), Err(SessionError::Closed));
}
