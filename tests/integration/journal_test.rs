//! Journal backend tests: every backend keeps insertion order.

use std::sync::Arc;

use daily_up::storage::{Database, JournalStore, JsonJournal, MemoryJournal};
use daily_up::CoachRequest;
use daily_up_core::{
    CheckIn, CoachResponse, JournalEntry, ResponseSource, Sentiment, SentimentLabel, TimeSlot,
    Tone,
};
use tempfile::tempdir;

use crate::support::offline_coach;

fn entry(index: usize) -> JournalEntry {
    let slot = TimeSlot::ALL[index % 3];
    let check_in = CheckIn::new(
        slot,
        format!("note {}", index),
        Tone::Supportive,
        Sentiment::new(SentimentLabel::Positive, 0.25 + index as f64 / 100.0),
    );
    let response = CoachResponse::new(
        slot,
        format!("analysis {}", index),
        vec![
            format!("step {}a", index),
            format!("step {}b", index),
            format!("step {}c", index),
        ],
        "Keep going",
        if index % 2 == 0 {
            ResponseSource::Ai
        } else {
            ResponseSource::Fallback
        },
    );
    JournalEntry::new(check_in, response)
}

fn assert_round_trip(store: &dyn JournalStore) {
    let written: Vec<JournalEntry> = (0..5).map(entry).collect();
    for e in &written {
        store.append(e).unwrap();
    }

    let read = store.read_all().unwrap();
    assert_eq!(read.len(), written.len(), "{} backend", store.name());
    for (got, want) in read.iter().zip(&written) {
        assert_eq!(got.check_in.id, want.check_in.id);
        assert_eq!(got.check_in.note, want.check_in.note);
        assert_eq!(got.check_in.time_slot, want.check_in.time_slot);
        assert_eq!(got.check_in.sentiment_label, want.check_in.sentiment_label);
        assert!((got.check_in.sentiment_score - want.check_in.sentiment_score).abs() < 1e-9);
        assert_eq!(got.response, want.response);
    }

    let recent = store.recent_steps(2).unwrap();
    assert_eq!(
        recent,
        vec!["step 4a", "step 4b", "step 4c", "step 3a", "step 3b", "step 3c"]
    );
}

#[test]
fn test_json_journal_round_trip() {
    let dir = tempdir().unwrap();
    let store = JsonJournal::new(dir.path().join("journal.json"));
    assert_round_trip(&store);

    let reopened = JsonJournal::new(dir.path().join("journal.json"));
    assert_eq!(reopened.read_all().unwrap().len(), 5);
}

#[test]
fn test_sqlite_journal_round_trip() {
    let db = Database::new_in_memory().unwrap();
    assert_round_trip(&db);
    assert_eq!(db.count_journal_entries().unwrap(), 5);
}

#[test]
fn test_sqlite_journal_file_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("journal.db");
    {
        let db = Database::open(&path).unwrap();
        db.append(&entry(0)).unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(db.read_all().unwrap()[0].check_in.note, "note 0");
}

#[test]
fn test_memory_journal_round_trip() {
    assert_round_trip(&MemoryJournal::new());
}

#[tokio::test]
async fn test_coach_and_log_avoids_recent_steps() {
    let journal = Arc::new(MemoryJournal::new());
    let coach = offline_coach().with_journal(journal.clone());

    let first = coach
        .coach_and_log(CoachRequest::new(TimeSlot::Morning, "gym session later"))
        .await
        .unwrap();
    let second = coach
        .coach_and_log(CoachRequest::new(TimeSlot::Morning, "gym session later"))
        .await
        .unwrap();

    assert_eq!(journal.read_all().unwrap().len(), 2);
    for step in &second.response.plan_steps {
        assert!(!first.response.plan_steps.contains(step), "repeated {}", step);
    }
}
