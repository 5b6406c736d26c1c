//! Check-in Commands

use serde::Serialize;
use tracing::info;

use daily_up_core::{CoreError, ResponseSource, Sentiment, TimeSlot, Tone};

use crate::services::coach::CoachRequest;
use crate::services::keywords::topic_summary;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

/// Arguments for one check-in.
#[derive(Debug, Clone)]
pub struct CheckInArgs {
    pub note: String,
    pub slot: TimeSlot,
    pub tone: Option<Tone>,
}

/// Result of a check-in as shown to the user.
#[derive(Debug, Clone, Serialize)]
pub struct CheckInView {
    pub id: String,
    pub slot: TimeSlot,
    pub sentiment: Sentiment,
    pub topics: String,
    pub analysis: String,
    pub plan_steps: Vec<String>,
    pub mantra: String,
    pub source: ResponseSource,
    pub notice: Option<&'static str>,
}

/// Run one check-in and append it to the journal.
pub async fn run_checkin(state: &AppState, args: CheckInArgs) -> AppResult<CheckInView> {
    if args.note.trim().is_empty() {
        return Err(AppError::Core(CoreError::empty_input(
            "write a short note about how you feel",
        )));
    }

    let config = state.get_config().await;
    let coach = state.build_coach().await?;

    let mut request = CoachRequest::new(args.slot, args.note.clone());
    if let Some(tone) = args.tone {
        request = request.with_tone(tone);
    }

    let outcome = coach.coach_and_log(request).await?;
    info!(
        id = %outcome.check_in.id,
        source = %outcome.response.source,
        "Check-in recorded"
    );

    Ok(CheckInView {
        id: outcome.check_in.id.clone(),
        slot: outcome.check_in.time_slot,
        sentiment: outcome.check_in.sentiment(),
        topics: topic_summary(&args.note, config.rules.max_keywords),
        analysis: outcome.response.analysis.clone(),
        plan_steps: outcome.response.plan_steps.clone(),
        mantra: outcome.response.mantra.clone(),
        source: outcome.response.source,
        notice: outcome.notice(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tempfile::tempdir;

    use crate::models::settings::{SettingsUpdate, PROVIDER_NONE};
    use crate::storage::{ConfigService, MemoryJournal};

    async fn offline_state(dir: &std::path::Path) -> AppState {
        let config = ConfigService::with_path(dir.join("config.json")).unwrap();
        let state = AppState::with_journal(config, Arc::new(MemoryJournal::new()));
        state
            .update_config(SettingsUpdate {
                provider: Some(PROVIDER_NONE.to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        state
    }

    #[tokio::test]
    async fn test_blank_note_is_rejected() {
        let dir = tempdir().unwrap();
        let state = offline_state(dir.path()).await;
        let result = run_checkin(
            &state,
            CheckInArgs {
                note: "   ".to_string(),
                slot: TimeSlot::Morning,
                tone: None,
            },
        )
        .await;
        assert!(matches!(result, Err(AppError::Core(CoreError::EmptyInput(_)))));
        assert!(state.journal().read_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_offline_checkin_is_logged() {
        let dir = tempdir().unwrap();
        let state = offline_state(dir.path()).await;
        let view = run_checkin(
            &state,
            CheckInArgs {
                note: "Exam on Friday, need to revise".to_string(),
                slot: TimeSlot::Morning,
                tone: Some(Tone::Direct),
            },
        )
        .await
        .unwrap();

        assert_eq!(view.source, ResponseSource::Fallback);
        assert_eq!(view.plan_steps.len(), 3);
        assert!(view.notice.is_some());
        assert!(view.topics.contains("exam"));
        assert_eq!(state.journal().read_all().unwrap().len(), 1);
    }
}
