// End-to-end flow over the pure core: session state machine wired to the
// repositories the same way the DOM adapter wires them, minus the DOM.

use std::rc::Rc;

use type_dash::MAX_TRIES;
use type_dash::attempts::AttemptLog;
use type_dash::scoreboard::{ScoreBoard, ScoreEntry};
use type_dash::session::{Phase, SessionState, StartRejection};
use type_dash::storage::MemoryStore;

// Runs one complete session the way `app` does: guard the start with the
// stored try count, count down, finish, persist the attempt, and record the
// score only on a session personal best.
fn play(
    session: &mut SessionState,
    attempts: &AttemptLog,
    scores: &ScoreBoard,
    name: &str,
    time: f64,
) -> Result<(), StartRejection> {
    session.try_start(name, attempts.tries(name.trim()), MAX_TRIES)?;
    while session.phase() != Phase::Typing {
        session.countdown_tick();
    }
    let summary = session.finish(time).expect("one finish per session");
    attempts.set_tries(session.player(), summary.tries_used);
    if summary.is_personal_best {
        scores.record(session.player(), summary.final_time);
    }
    Ok(())
}

#[test]
fn two_attempts_then_lockout() {
    let store: Rc<MemoryStore> = Rc::new(MemoryStore::new());
    let attempts = AttemptLog::new(store.clone());
    let scores = ScoreBoard::new(store);
    let mut session = SessionState::new();

    // Attempt 1: first finish always reaches the leaderboard.
    play(&mut session, &attempts, &scores, "Ada", 5.0).unwrap();
    assert_eq!(attempts.tries("Ada"), 1);
    assert_eq!(
        scores.top(),
        vec![ScoreEntry {
            name: "Ada".into(),
            time: 5.0
        }]
    );

    // Attempt 2: faster, entry updates in place.
    play(&mut session, &attempts, &scores, "Ada", 4.5).unwrap();
    assert_eq!(attempts.tries("Ada"), 2);
    assert_eq!(
        scores.top(),
        vec![ScoreEntry {
            name: "Ada".into(),
            time: 4.5
        }]
    );

    // Third start action is rejected at the cap.
    assert_eq!(
        play(&mut session, &attempts, &scores, "Ada", 4.0),
        Err(StartRejection::NoAttemptsLeft)
    );
    assert_eq!(attempts.tries("Ada"), 2);
}

#[test]
fn slower_second_attempt_still_counts_a_try_but_not_a_score() {
    let store: Rc<MemoryStore> = Rc::new(MemoryStore::new());
    let attempts = AttemptLog::new(store.clone());
    let scores = ScoreBoard::new(store);
    let mut session = SessionState::new();

    play(&mut session, &attempts, &scores, "Ada", 5.0).unwrap();
    play(&mut session, &attempts, &scores, "Ada", 6.0).unwrap();

    assert_eq!(attempts.tries("Ada"), 2);
    assert_eq!(
        scores.top(),
        vec![ScoreEntry {
            name: "Ada".into(),
            time: 5.0
        }]
    );
}

#[test]
fn attempts_cumulate_across_sessions_on_a_shared_store() {
    let store: Rc<MemoryStore> = Rc::new(MemoryStore::new());

    // Simulate a page reload by rebuilding everything over the same store.
    for expected in 1..=2u32 {
        let attempts = AttemptLog::new(store.clone());
        let scores = ScoreBoard::new(store.clone());
        let mut session = SessionState::new();
        play(&mut session, &attempts, &scores, "Ada", 5.0).unwrap();
        assert_eq!(attempts.tries("Ada"), expected);
    }
}

#[test]
fn distinct_spellings_are_distinct_players() {
    let store: Rc<MemoryStore> = Rc::new(MemoryStore::new());
    let attempts = AttemptLog::new(store.clone());
    let scores = ScoreBoard::new(store);
    let mut session = SessionState::new();

    play(&mut session, &attempts, &scores, "Ada", 5.0).unwrap();
    play(&mut session, &attempts, &scores, "ada", 6.0).unwrap();

    assert_eq!(attempts.tries("Ada"), 1);
    assert_eq!(attempts.tries("ada"), 1);
    assert_eq!(scores.top().len(), 2);
}
