//! Coach adapter tests with scripted generation providers.

use std::sync::Arc;

use daily_up::services::coach::CoachState;
use daily_up::CoachRequest;
use daily_up_core::{FallbackReason, ResponseSource, SentimentLabel, TimeSlot, PLAN_STEP_COUNT};
use daily_up_llm::LlmError;

use crate::support::{offline_coach, BrokenScorer, ScriptedProvider};

const GOOD_REPLY: &str = r#"Here is your plan:
```json
{"analysis": "Solid energy, point it at one thing.",
 "plan": ["1. Open the draft", "2. Write the intro", "3. Send it to a friend", "4. extra"],
 "mantra": "Ship small, ship often"}
```"#;

#[tokio::test]
async fn test_ai_reply_is_normalized() {
    let provider = Arc::new(ScriptedProvider::replying(GOOD_REPLY));
    let coach = offline_coach().with_provider(provider.clone());

    let outcome = coach
        .coach(CoachRequest::new(TimeSlot::Morning, "Feeling great about the draft"))
        .await;

    assert_eq!(outcome.response.source, ResponseSource::Ai);
    assert_eq!(
        outcome.response.plan_steps,
        vec!["Open the draft", "Write the intro", "Send it to a friend"]
    );
    assert_eq!(outcome.response.mantra, "Ship small, ship often");
    assert!(outcome.fallback_reason.is_none());
    assert_eq!(outcome.generation_state(), CoachState::Parsed);

    let prompts = provider.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Feeling great about the draft"));
}

#[tokio::test]
async fn test_every_provider_error_falls_back() {
    let errors = vec![
        LlmError::NetworkError {
            message: "connection refused".to_string(),
        },
        LlmError::AuthenticationFailed {
            message: "bad key".to_string(),
        },
        LlmError::RateLimited {
            message: "slow down".to_string(),
            retry_after: Some(30),
        },
        LlmError::ServerError {
            message: "boom".to_string(),
            status: Some(500),
        },
    ];

    for error in errors {
        let provider = Arc::new(ScriptedProvider::failing(error));
        let coach = offline_coach().with_provider(provider.clone());
        let outcome = coach
            .coach(CoachRequest::new(TimeSlot::Midday, "stuck on taxes"))
            .await;

        // One attempt, no retry
        assert_eq!(provider.prompts.lock().unwrap().len(), 1);

        assert_eq!(outcome.response.source, ResponseSource::Fallback);
        assert_eq!(outcome.response.plan_steps.len(), PLAN_STEP_COUNT);
        assert!(matches!(
            outcome.fallback_reason,
            Some(FallbackReason::GenerationUnavailable { .. })
        ));
        assert_eq!(outcome.generation_state(), CoachState::Errored);
    }
}

#[tokio::test]
async fn test_unusable_replies_fall_back() {
    let replies = [
        "",
        "Take a deep breath and start small.",
        r#"{"analysis": "no plan here"}"#,
        r#"{"plan": "just one string"}"#,
        r#"{"analysis": " ", "plan": ["a", "b", "c"], "mantra": ""}"#,
    ];

    for reply in replies {
        let provider = Arc::new(ScriptedProvider::replying(reply));
        let coach = offline_coach().with_provider(provider.clone());
        let outcome = coach
            .coach(CoachRequest::new(TimeSlot::Evening, "long day"))
            .await;

        assert_eq!(provider.prompts.lock().unwrap().len(), 1, "reply {:?}", reply);
        assert_eq!(outcome.response.source, ResponseSource::Fallback, "reply {:?}", reply);
        assert_eq!(outcome.response.plan_steps.len(), PLAN_STEP_COUNT);
        assert!(outcome.fallback_reason.is_some());
    }
}

#[tokio::test]
async fn test_scorer_failure_reads_neutral() {
    let analyzer = daily_up::services::sentiment::SentimentAnalyzer::new(
        Arc::new(BrokenScorer),
        daily_up_core::SentimentThresholds::default(),
    );
    let coach = daily_up::Coach::new(
        analyzer,
        daily_up::services::fallback::FallbackCoach::default(),
    );

    let outcome = coach
        .coach(CoachRequest::new(TimeSlot::Morning, "I love this, amazing day"))
        .await;

    assert_eq!(outcome.check_in.sentiment_label, SentimentLabel::Neutral);
    assert_eq!(outcome.check_in.sentiment_score, 0.0);
    assert_eq!(outcome.response.plan_steps.len(), PLAN_STEP_COUNT);
}

#[tokio::test]
async fn test_labels_stay_in_range_for_varied_notes() {
    let coach = offline_coach();
    let long_note = "word ".repeat(500);
    let notes = [
        "",
        "   ",
        "I am so happy and proud today!!!",
        "This is terrible, I hate everything",
        "not bad",
        "😀😀😀",
        "a",
        long_note.as_str(),
    ];

    for note in notes {
        let outcome = coach.coach(CoachRequest::new(TimeSlot::Midday, note)).await;
        let sentiment = outcome.check_in.sentiment();
        assert!(matches!(
            sentiment.label,
            SentimentLabel::Positive | SentimentLabel::Negative | SentimentLabel::Neutral
        ));
        assert!((-1.0..=1.0).contains(&sentiment.score));
        assert_eq!(outcome.response.plan_steps.len(), PLAN_STEP_COUNT);
    }
}
