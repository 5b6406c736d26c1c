//! Rule-Based Plan Selector
//!
//! Deterministic coach used when no generation service is available or its
//! reply is unusable. Pure: equal inputs give equal output.

use std::collections::HashSet;

use daily_up_core::{CoachResponse, Profile, ResponseSource, SentimentLabel, TimeSlot, Tone};

use super::contexts::{base_analysis, plan_template, CoachContext, StepChoice};
use crate::models::rules::CoachRules;

/// Everything the selector looks at.
#[derive(Debug, Clone)]
pub struct FallbackRequest<'a> {
    pub note: &'a str,
    pub slot: TimeSlot,
    pub sentiment: SentimentLabel,
    pub tone: Tone,
    pub profile: &'a Profile,
    /// Steps from recent journal entries, to avoid repeating them
    pub recent_steps: &'a [String],
}

/// Fixed lead-in added in front of the analysis for each tone.
pub fn tone_lead_in(tone: Tone) -> Option<&'static str> {
    match tone {
        Tone::Neutral => None,
        Tone::Supportive => Some("You've got this."),
        Tone::Direct => Some("Straight to it:"),
        Tone::Playful => Some("Game on!"),
    }
}

fn normalize_step(step: &str) -> String {
    step.trim().to_lowercase()
}

/// Keyword-driven plan selector.
#[derive(Debug, Clone, Default)]
pub struct FallbackCoach {
    rules: CoachRules,
}

impl FallbackCoach {
    pub fn new(rules: CoachRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &CoachRules {
        &self.rules
    }

    /// Context the note maps to.
    pub fn detect_context(&self, note: &str) -> CoachContext {
        CoachContext::detect(note, &self.rules)
    }

    /// Build the analysis, plan and mantra for a request.
    pub fn select(&self, request: &FallbackRequest<'_>) -> CoachResponse {
        let context = self.detect_context(request.note);
        let template = plan_template(context, request.slot);

        let recent: HashSet<String> = request
            .recent_steps
            .iter()
            .map(|s| normalize_step(s))
            .collect();

        let steps = template
            .steps
            .iter()
            .map(|choice| pick_step(choice, &recent).to_string())
            .collect();

        let analysis = decorate_analysis(
            base_analysis(context, request.slot, request.sentiment),
            request.tone,
            request.profile,
        );

        CoachResponse::new(
            request.slot,
            analysis,
            steps,
            template.mantra,
            ResponseSource::Fallback,
        )
    }
}

/// Primary step unless it was used recently; then the first unused alternate.
/// Keeps the primary when every alternate was used too.
fn pick_step(choice: &StepChoice, recent: &HashSet<String>) -> &'static str {
    if !recent.contains(&normalize_step(choice.primary)) {
        return choice.primary;
    }
    choice
        .alternates
        .iter()
        .copied()
        .find(|alt| !recent.contains(&normalize_step(alt)))
        .unwrap_or(choice.primary)
}

/// Add the tone lead-in, address the user by name and append the goal reminder.
fn decorate_analysis(analysis: String, tone: Tone, profile: &Profile) -> String {
    let body = match profile.display_name() {
        Some(name) => format!("{}, {}", name, lowercase_first(&analysis)),
        None => analysis,
    };

    let mut parts: Vec<String> = Vec::with_capacity(3);
    if let Some(lead_in) = tone_lead_in(tone) {
        parts.push(lead_in.to_string());
    }
    parts.push(body);
    if let Some(goal) = profile.goal() {
        parts.push(format!("Remember your goal: {}.", goal.trim_end_matches('.')));
    }
    parts.join(" ")
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daily_up_core::PLAN_STEP_COUNT;

    fn request<'a>(note: &'a str, slot: TimeSlot, profile: &'a Profile, recent: &'a [String]) -> FallbackRequest<'a> {
        FallbackRequest {
            note,
            slot,
            sentiment: SentimentLabel::Neutral,
            tone: Tone::Neutral,
            profile,
            recent_steps: recent,
        }
    }

    #[test]
    fn test_exam_plan() {
        let profile = Profile::default();
        let response = FallbackCoach::default().select(&request(
            "Big exam tomorrow",
            TimeSlot::Morning,
            &profile,
            &[],
        ));
        assert!(response.analysis.contains("Exam preparation"));
        assert!(response
            .plan_steps
            .iter()
            .any(|s| s.contains("Pomodoro") && s.contains("25")));
        assert_eq!(response.mantra, "Small wins compound");
        assert_eq!(response.source, ResponseSource::Fallback);
    }

    #[test]
    fn test_stress_plan_starts_with_brain_dump_in_every_slot() {
        let profile = Profile::default();
        for slot in TimeSlot::ALL {
            let response = FallbackCoach::default().select(&request(
                "so much stress right now",
                slot,
                &profile,
                &[],
            ));
            assert!(response.plan_steps[0].starts_with("Brain-dump"));
            assert_eq!(response.mantra, "Begin before you think");
        }
    }

    #[test]
    fn test_empty_note_uses_slot_default() {
        let profile = Profile::default();
        let response =
            FallbackCoach::default().select(&request("", TimeSlot::Evening, &profile, &[]));
        assert_eq!(response.mantra, "One small step beats zero");
        assert!(response.analysis.starts_with("Evening"));
        assert_eq!(response.plan_steps.len(), PLAN_STEP_COUNT);
    }

    #[test]
    fn test_recent_steps_are_swapped_for_alternates() {
        let profile = Profile::default();
        let coach = FallbackCoach::default();
        let first = coach.select(&request("gym later", TimeSlot::Midday, &profile, &[]));

        let recent = first.plan_steps.clone();
        let second = coach.select(&request("gym later", TimeSlot::Midday, &profile, &recent));

        for step in &second.plan_steps {
            assert!(!recent.contains(step), "repeated step: {}", step);
        }
    }

    #[test]
    fn test_exhausted_alternates_keep_primary() {
        let choice = StepChoice {
            primary: "A",
            alternates: &["B"],
        };
        let recent: HashSet<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        assert_eq!(pick_step(&choice, &recent), "A");
    }

    #[test]
    fn test_tone_name_and_goal_decorate_analysis() {
        let profile = Profile {
            name: "Sam".to_string(),
            goal: Some("pass physics".to_string()),
            ..Default::default()
        };
        let req = FallbackRequest {
            tone: Tone::Supportive,
            ..request("exam prep", TimeSlot::Morning, &profile, &[])
        };
        let response = FallbackCoach::default().select(&req);
        assert_eq!(
            response.analysis,
            "You've got this. Sam, exam preparation: get clear on one target, then switch on active recall. Remember your goal: pass physics."
        );
    }

    #[test]
    fn test_default_name_is_not_used() {
        let profile = Profile::default();
        let response =
            FallbackCoach::default().select(&request("quiz", TimeSlot::Morning, &profile, &[]));
        assert!(response.analysis.starts_with("Exam preparation"));
    }

    #[test]
    fn test_selector_is_deterministic() {
        let profile = Profile::default();
        let recent = vec!["Write down the next 10-minute task.".to_string()];
        let coach = FallbackCoach::default();
        let a = coach.select(&request("meh", TimeSlot::Morning, &profile, &recent));
        let b = coach.select(&request("meh", TimeSlot::Morning, &profile, &recent));
        assert_eq!(a, b);
    }
}
