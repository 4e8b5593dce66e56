// Native tests for leaderboard maintenance: bounded size, ordering,
// per-name uniqueness, best-time retention, tie order and reset.

use std::rc::Rc;

use type_dash::scoreboard::{LEADERBOARD_KEY, LEADERBOARD_SIZE, ScoreBoard, ScoreEntry};
use type_dash::storage::{KeyValueStore, MemoryStore};

fn board() -> ScoreBoard {
    ScoreBoard::new(Rc::new(MemoryStore::new()))
}

#[test]
fn empty_store_reads_as_empty_board() {
    assert!(board().top().is_empty());
}

#[test]
fn keeps_at_most_three_entries_sorted_ascending() {
    let board = board();
    board.record("a", 12.0);
    board.record("b", 9.0);
    board.record("c", 15.0);
    board.record("d", 10.0);
    board.record("e", 20.0);

    let top = board.top();
    assert_eq!(top.len(), LEADERBOARD_SIZE);
    for pair in top.windows(2) {
        assert!(pair[0].time <= pair[1].time);
    }
    let names: Vec<&str> = top.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["b", "d", "a"]);
}

#[test]
fn one_entry_per_name_keeping_the_lower_time() {
    let board = board();
    board.record("ada", 10.0);
    // Slower time leaves the entry unchanged.
    board.record("ada", 12.0);
    assert_eq!(
        board.top(),
        vec![ScoreEntry {
            name: "ada".into(),
            time: 10.0
        }]
    );
    // Strictly lower time updates in place.
    board.record("ada", 8.0);
    assert_eq!(
        board.top(),
        vec![ScoreEntry {
            name: "ada".into(),
            time: 8.0
        }]
    );
}

#[test]
fn equal_times_keep_insertion_order() {
    let board = board();
    board.record("first", 10.0);
    board.record("second", 10.0);
    board.record("third", 10.0);
    let top = board.top();
    let names: Vec<&str> = top.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second", "third"]);
}

#[test]
fn improving_a_time_reorders_the_board() {
    let board = board();
    board.record("a", 10.0);
    board.record("b", 11.0);
    board.record("b", 9.0);
    let top = board.top();
    let names: Vec<&str> = top.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["b", "a"]);
}

#[test]
fn corrupt_payload_reads_as_empty_and_heals_on_write() {
    let store: Rc<MemoryStore> = Rc::new(MemoryStore::new());
    store.set(LEADERBOARD_KEY, "][ not json");
    let board = ScoreBoard::new(store.clone());
    assert!(board.top().is_empty());
    board.record("ada", 5.0);
    assert_eq!(board.top().len(), 1);
    let raw = store.get(LEADERBOARD_KEY).expect("stored payload");
    assert!(serde_json::from_str::<Vec<ScoreEntry>>(&raw).is_ok());
}

#[test]
fn reset_clears_the_board_and_future_records_start_fresh() {
    let store: Rc<MemoryStore> = Rc::new(MemoryStore::new());
    let board = ScoreBoard::new(store.clone());
    board.record("ada", 5.0);
    board.reset();
    assert!(board.top().is_empty());
    assert!(store.get(LEADERBOARD_KEY).is_none());
    board.record("bob", 7.0);
    assert_eq!(
        board.top(),
        vec![ScoreEntry {
            name: "bob".into(),
            time: 7.0
        }]
    );
}
