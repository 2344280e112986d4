//! End-to-end session scenarios against in-memory and on-disk stores.

use leitner_core::mock::ScriptedReviewer;
use leitner_core::model::{BoxConfig, Card, PersistedCard, SessionState};
use leitner_core::store::{JsonFileStore, MemoryStore};
use leitner_core::{Judgment, Scheduler, SessionStatus, SessionStore};

fn three_boxes() -> Vec<BoxConfig> {
    vec![
        BoxConfig::new("daily", 1),
        BoxConfig::new("every-third", 3),
        BoxConfig::new("weekly", 7),
    ]
}

fn cards_at(level: usize, count: usize) -> Vec<PersistedCard> {
    (0..count)
        .map(|i| PersistedCard {
            front: format!("front-{level}-{i}"),
            back: format!("back-{level}-{i}"),
            level,
        })
        .collect()
}

fn box_sizes(s: &Scheduler) -> Vec<usize> {
    s.boxes().iter().map(|b| b.len()).collect()
}

#[tokio::test]
async fn single_card_climbs_through_intervals() {
    let store = MemoryStore::with_state(SessionState {
        current_session: 0,
        cards: cards_at(0, 1),
    });
    let mut s = Scheduler::new(&three_boxes()).unwrap().with_seed(11);
    s.load(&store).unwrap();
    let mut reviewer = ScriptedReviewer::always(Judgment::Correct);

    // Session 1: box 0 is due, the card is promoted to box 1.
    let report = s.run_session(&mut reviewer, &store).await.unwrap();
    assert_eq!(report.session, 1);
    assert_eq!(report.status, SessionStatus::Completed);
    assert_eq!(box_sizes(&s), vec![0, 1, 0]);

    // Session 2: box 0 is due but empty, box 1 waits for a multiple of 3.
    let report = s.run_session(&mut reviewer, &store).await.unwrap();
    assert_eq!(report.session, 2);
    assert_eq!(report.status, SessionStatus::NothingDue);
    assert_eq!(box_sizes(&s), vec![0, 1, 0]);

    // Session 3: box 1 is due.
    let report = s.run_session(&mut reviewer, &store).await.unwrap();
    assert_eq!(report.session, 3);
    assert_eq!(report.reviewed, 1);
    assert_eq!(box_sizes(&s), vec![0, 0, 1]);

    assert_eq!(reviewer.presented().len(), 2);
    assert_eq!(store.state().unwrap().current_session, 3);
}

#[tokio::test]
async fn empty_due_set_skips_the_reviewer() {
    let configs = vec![BoxConfig::new("second", 2), BoxConfig::new("fifth", 5)];
    let initial = SessionState {
        current_session: 0,
        cards: cards_at(0, 2),
    };
    let store = MemoryStore::with_state(initial.clone());
    let mut s = Scheduler::new(&configs).unwrap();
    s.load(&store).unwrap();

    let mut reviewer = ScriptedReviewer::always(Judgment::Correct);
    let report = s.run_session(&mut reviewer, &store).await.unwrap();

    assert_eq!(report.status, SessionStatus::NothingDue);
    assert!(reviewer.presented().is_empty());
    let saved = store.state().unwrap();
    assert_eq!(saved.current_session, 1);
    assert_eq!(saved.cards, initial.cards);
}

#[tokio::test]
async fn cancellation_returns_ungraded_cards() {
    let store = MemoryStore::with_state(SessionState {
        current_session: 0,
        cards: cards_at(0, 5),
    });
    let mut s = Scheduler::new(&three_boxes()).unwrap().with_seed(5);
    s.load(&store).unwrap();

    let mut reviewer = ScriptedReviewer::new(vec![Judgment::Correct, Judgment::Incorrect]);
    let report = s.run_session(&mut reviewer, &store).await.unwrap();

    assert_eq!(report.status, SessionStatus::Cancelled);
    assert_eq!(report.reviewed, 2);
    assert_eq!(report.returned, 3);
    // 3 returned + 1 demoted in box 0, 1 promoted in box 1.
    assert_eq!(box_sizes(&s), vec![4, 1, 0]);
    assert!(s.boxes()[0].cards().all(|c| c.level == 0));
    assert!(s.session_box().is_empty());

    let saved = store.state().unwrap();
    assert_eq!(saved.cards.len(), 5);
    assert!(report.summary().contains("Progress saved on exit"));
}

#[tokio::test]
async fn cancellation_keeps_original_levels() {
    // Counter goes 2 -> 3: boxes 0 and 1 are due.
    let mut cards = cards_at(0, 2);
    cards.extend(cards_at(1, 2));
    cards.extend(cards_at(2, 1));
    let store = MemoryStore::with_state(SessionState {
        current_session: 2,
        cards,
    });
    let mut s = Scheduler::new(&three_boxes()).unwrap().with_seed(9);
    s.load(&store).unwrap();

    let mut reviewer = ScriptedReviewer::always(Judgment::Cancelled);
    let report = s.run_session(&mut reviewer, &store).await.unwrap();

    assert_eq!(report.in_play, 4);
    assert_eq!(report.returned, 4);
    assert_eq!(box_sizes(&s), vec![2, 2, 1]);
    for card_box in s.boxes() {
        assert!(card_box.cards().all(|c| c.level == card_box.level_index()));
    }
}

#[tokio::test]
async fn top_level_card_graduates_permanently() {
    let store = MemoryStore::with_state(SessionState {
        current_session: 6,
        cards: cards_at(2, 1),
    });
    let mut s = Scheduler::new(&three_boxes()).unwrap();
    s.load(&store).unwrap();

    let mut reviewer = ScriptedReviewer::always(Judgment::Correct);
    let report = s.run_session(&mut reviewer, &store).await.unwrap();

    assert_eq!(report.session, 7);
    assert_eq!(report.graduated.len(), 1);
    assert_eq!(report.graduated[0].front, "front-2-0");
    assert_eq!(s.total_cards(), 0);
    assert!(store.state().unwrap().cards.is_empty());
}

#[tokio::test]
async fn wrong_answers_reset_every_level() {
    // Counter goes 20 -> 21: boxes 0, 1 (21 % 3) and 2 (21 % 7) are all due.
    let mut cards = cards_at(0, 1);
    cards.extend(cards_at(1, 1));
    cards.extend(cards_at(2, 1));
    let store = MemoryStore::with_state(SessionState {
        current_session: 20,
        cards,
    });
    let mut s = Scheduler::new(&three_boxes()).unwrap();
    s.load(&store).unwrap();

    let mut reviewer = ScriptedReviewer::always(Judgment::Incorrect);
    let report = s.run_session(&mut reviewer, &store).await.unwrap();

    assert_eq!(report.demoted, 3);
    assert_eq!(box_sizes(&s), vec![3, 0, 0]);
}

#[tokio::test]
async fn file_store_roundtrip_reproduces_partition() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("state.json"));

    let mut s = Scheduler::new(&three_boxes()).unwrap().with_seed(2);
    s.load(&store).unwrap();
    s.add_cards((0..6).map(|i| Card::new(format!("f{i}"), format!("b{i}"))));
    s.save(&store).unwrap();

    let mut reviewer = ScriptedReviewer::new(vec![
        Judgment::Correct,
        Judgment::Incorrect,
        Judgment::Correct,
    ]);
    s.run_session(&mut reviewer, &store).await.unwrap();

    let mut reloaded = Scheduler::new(&three_boxes()).unwrap();
    reloaded.load(&store).unwrap();
    assert_eq!(reloaded.snapshot(), s.snapshot());
    assert_eq!(reloaded.session_count(), 1);
    assert_eq!(box_sizes(&reloaded), vec![4, 2, 0]);

    let on_disk = store.load().unwrap().unwrap();
    assert_eq!(on_disk, s.snapshot());
}

#[test]
fn corrupt_level_on_disk_is_surfaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(
        &path,
        r#"{"current_session": 1, "cards": [{"front": "x", "back": "y", "level": 7}]}"#,
    )
    .unwrap();

    let mut s = Scheduler::new(&three_boxes()).unwrap();
    let err = s.load(&JsonFileStore::new(&path)).unwrap_err();
    assert!(err.to_string().contains("level 7"));
    assert_eq!(s.total_cards(), 0);
}
