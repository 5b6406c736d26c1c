//! Rule-based plans through the full coach, without a provider.

use daily_up::CoachRequest;
use daily_up_core::{FallbackReason, ResponseSource, SentimentLabel, TimeSlot, Tone};

use crate::support::offline_coach;

#[tokio::test]
async fn test_empty_note_gets_neutral_slot_default() {
    let coach = offline_coach();
    for slot in TimeSlot::ALL {
        let outcome = coach.coach(CoachRequest::new(slot, "")).await;

        assert_eq!(outcome.check_in.sentiment_label, SentimentLabel::Neutral);
        assert_eq!(outcome.check_in.sentiment_score, 0.0);
        assert_eq!(outcome.fallback_reason, Some(FallbackReason::EmptyNote));
        assert_eq!(outcome.response.mantra, "One small step beats zero");
        assert!(outcome.response.analysis.starts_with(slot.title()));
    }
}

#[tokio::test]
async fn test_exam_morning_plan() {
    let outcome = offline_coach()
        .coach(CoachRequest::new(
            TimeSlot::Morning,
            "Chemistry exam on Thursday and I have not started",
        ))
        .await;

    assert_eq!(outcome.response.source, ResponseSource::Fallback);
    assert_eq!(outcome.fallback_reason, Some(FallbackReason::NoProvider));
    assert!(outcome.response.analysis.contains("Exam preparation"));
    assert!(outcome
        .response
        .plan_steps
        .iter()
        .any(|step| step.contains("Pomodoro") && step.contains("25")));
}

#[tokio::test]
async fn test_stress_starts_with_brain_dump_in_every_slot() {
    let coach = offline_coach();
    for slot in TimeSlot::ALL {
        let outcome = coach
            .coach(CoachRequest::new(slot, "So much stress with the move"))
            .await;
        let first = outcome.response.plan_steps[0].to_lowercase();
        assert!(
            first.contains("brain-dump") || first.contains("breath"),
            "slot {} started with {:?}",
            slot,
            first
        );
    }
}

#[tokio::test]
async fn test_identical_requests_give_identical_responses() {
    let coach = offline_coach();
    let recent = vec!["Drink a glass of water and stand up.".to_string()];
    let request = CoachRequest::new(TimeSlot::Evening, "tired but ok")
        .with_tone(Tone::Playful)
        .with_recent_steps(recent);

    let a = coach.coach(request.clone()).await;
    let b = coach.coach(request).await;
    assert_eq!(a.response, b.response);
    assert_eq!(a.check_in.sentiment(), b.check_in.sentiment());
}
