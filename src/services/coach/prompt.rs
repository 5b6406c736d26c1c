//! Coach Prompts
//!
//! System persona and per-check-in user prompt for the generation service.

use daily_up_core::{Profile, Sentiment, TimeSlot, Tone};

/// Most recent steps listed in the prompt
const MAX_PROMPT_RECENT_STEPS: usize = 9;

pub const COACH_SYSTEM_PROMPT: &str = r#"You are DailyUp, a tiny motivational coach.
Return only compact JSON with:
- analysis: 1-2 sentences tailored to the user's note and moment (morning/midday/evening).
- plan: exactly 3 concrete micro-steps (10-20 minutes each).
- mantra: 3-6 words, no quotes.
Energetic, practical, zero fluff. No preamble, no markdown fences: JSON only."#;

/// Inputs interpolated into the user prompt.
#[derive(Debug, Clone)]
pub struct PromptContext<'a> {
    pub slot: TimeSlot,
    pub note: &'a str,
    pub sentiment: Sentiment,
    pub tone: Tone,
    pub topics: &'a str,
    pub profile: &'a Profile,
    pub recent_steps: &'a [String],
}

pub fn build_user_prompt(ctx: &PromptContext<'_>) -> String {
    let mut prompt = format!(
        "Moment: {}\n\
         Note: {}\n\
         Detected mood: {} ({:+.2})\n\
         Topics: {}\n\
         Tone: {}\n",
        ctx.slot,
        ctx.note.trim(),
        ctx.sentiment.label,
        ctx.sentiment.score,
        ctx.topics,
        ctx.tone.style(),
    );

    if let Some(name) = ctx.profile.display_name() {
        prompt.push_str(&format!("Name: {}\n", name));
    }
    if let Some(goal) = ctx.profile.goal() {
        prompt.push_str(&format!("Long-term goal: {}\n", goal));
    }
    if let Some(work_context) = ctx.profile.work_context() {
        prompt.push_str(&format!("Work context: {}\n", work_context));
    }

    if !ctx.recent_steps.is_empty() {
        prompt.push_str("\nAvoid repeating these recent steps:\n");
        for step in ctx.recent_steps.iter().take(MAX_PROMPT_RECENT_STEPS) {
            prompt.push_str(&format!("- {}\n", step));
        }
    }

    prompt.push_str(
        "\nReply strictly as JSON with keys: analysis, plan, mantra.\n\
         Example:\n\
         {\n \"analysis\": \"Exam stress: use short focus and active recall.\",\n \
         \"plan\": [\"Pick 1 weak topic\", \"Pomodoro 25\", \"Create 5 flashcards\"],\n \
         \"mantra\": \"Small wins compound\"\n}",
    );

    prompt
}
