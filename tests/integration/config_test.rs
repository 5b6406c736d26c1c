//! Config file and application state tests.

use std::sync::Arc;

use daily_up::commands::{list_journal, run_checkin, CheckInArgs};
use daily_up::models::settings::{JournalBackend, SentimentBackend, PROVIDER_NONE};
use daily_up::storage::{ConfigService, MemoryJournal};
use daily_up::{AppConfig, AppState, SettingsUpdate};
use daily_up_core::{ResponseSource, TimeSlot, Tone};
use tempfile::tempdir;

#[test]
fn test_first_run_writes_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    let service = ConfigService::with_path(&path).unwrap();

    assert!(path.exists());
    assert_eq!(service.get_config(), &AppConfig::default());

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["generation"]["temperature"], serde_json::json!(0.95));
    assert_eq!(raw["journal"]["history_window"], serde_json::json!(6));
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"profile": {"name": "Ade"}, "sentiment": {"backend": "huggingface"}}"#,
    )
    .unwrap();

    let service = ConfigService::with_path(&path).unwrap();
    let config = service.get_config();
    assert_eq!(config.profile.name, "Ade");
    assert_eq!(config.sentiment.backend, SentimentBackend::HuggingFace);
    assert_eq!(config.generation.max_tokens, 220);
    assert_eq!(config.journal.backend, JournalBackend::Json);
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"generation": {"temperature": 7.5}}"#).unwrap();
    assert!(ConfigService::with_path(&path).is_err());
}

#[test]
fn test_invalid_update_is_not_saved() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    let mut service = ConfigService::with_path(&path).unwrap();

    let result = service.update_config(SettingsUpdate {
        max_tokens: Some(0),
        ..Default::default()
    });
    assert!(result.is_err());
    assert_eq!(service.get_config().generation.max_tokens, 220);

    let reloaded = ConfigService::with_path(&path).unwrap();
    assert_eq!(reloaded.get_config().generation.max_tokens, 220);
}

#[tokio::test]
async fn test_offline_checkins_through_state() {
    let dir = tempdir().unwrap();
    let service = ConfigService::with_path(dir.path().join("config.json")).unwrap();
    let state = AppState::with_journal(service, Arc::new(MemoryJournal::new()));
    state
        .update_config(SettingsUpdate {
            provider: Some(PROVIDER_NONE.to_string()),
            name: Some("Kit".to_string()),
            goal: Some("finish the thesis".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    for note in ["exam next week", "calm evening"] {
        let view = run_checkin(
            &state,
            CheckInArgs {
                note: note.to_string(),
                slot: TimeSlot::Evening,
                tone: Some(Tone::Supportive),
            },
        )
        .await
        .unwrap();
        assert_eq!(view.source, ResponseSource::Fallback);
        assert!(view.analysis.starts_with("You've got this. Kit, "));
        assert!(view.analysis.ends_with("Remember your goal: finish the thesis."));
    }

    let journal = list_journal(&state, None).unwrap();
    assert_eq!(journal.total, 2);
    assert_eq!(journal.entries[0].check_in.note, "exam next week");
    assert_eq!(journal.entries[1].check_in.note, "calm evening");
}
