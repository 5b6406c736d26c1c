//! Situational Contexts
//!
//! Keyword-detected situations and the canned plan each one maps to. Every
//! step carries alternates so recently used steps can be swapped out.

use serde::{Deserialize, Serialize};

use daily_up_core::{SentimentLabel, TimeSlot};

use crate::models::rules::CoachRules;
use crate::services::keywords::tokens;

/// Situation detected in a note, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoachContext {
    Exam,
    Stress,
    Activity,
    /// No keyword matched; the slot default applies
    General,
}

impl CoachContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoachContext::Exam => "exam",
            CoachContext::Stress => "stress",
            CoachContext::Activity => "activity",
            CoachContext::General => "general",
        }
    }

    /// First context whose keyword list matches a word or phrase in the note.
    pub fn detect(note: &str, rules: &CoachRules) -> Self {
        let words: Vec<String> = tokens(note).collect();

        if any_keyword(&words, &rules.exam_keywords) {
            CoachContext::Exam
        } else if any_keyword(&words, &rules.stress_keywords) {
            CoachContext::Stress
        } else if any_keyword(&words, &rules.activity_keywords) {
            CoachContext::Activity
        } else {
            CoachContext::General
        }
    }
}

/// Whole-word match; the last word of a keyword may also take a plural `s`/`es`.
fn any_keyword(words: &[String], keywords: &[String]) -> bool {
    keywords.iter().any(|keyword| {
        let phrase: Vec<String> = tokens(keyword).collect();
        !phrase.is_empty()
            && words
                .windows(phrase.len())
                .any(|window| phrase_matches(window, &phrase))
    })
}

fn phrase_matches(window: &[String], phrase: &[String]) -> bool {
    let last = phrase.len() - 1;
    window.iter().zip(phrase).enumerate().all(|(i, (word, want))| {
        word == want
            || (i == last
                && word
                    .strip_prefix(want.as_str())
                    .is_some_and(|rest| rest == "s" || rest == "es"))
    })
}

impl std::fmt::Display for CoachContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One plan position: the preferred step and its replacements.
#[derive(Debug, Clone, Copy)]
pub struct StepChoice {
    pub primary: &'static str,
    pub alternates: &'static [&'static str],
}

/// Canned plan for a context.
#[derive(Debug, Clone, Copy)]
pub struct PlanTemplate {
    pub steps: [StepChoice; 3],
    pub mantra: &'static str,
}

const EXAM_PLAN: PlanTemplate = PlanTemplate {
    steps: [
        StepChoice {
            primary: "Pick one precise sub-chapter and write it down.",
            alternates: &[
                "List your three weakest topics and circle one.",
                "Open past questions and choose one to attempt.",
            ],
        },
        StepChoice {
            primary: "Run one 25-minute Pomodoro of active recall: read, close the notes, recite.",
            alternates: &[
                "Do a 25-minute Pomodoro of practice questions without notes.",
                "Spend a 25-minute Pomodoro explaining the topic aloud from memory.",
            ],
        },
        StepChoice {
            primary: "Create 5 flashcards and schedule a review.",
            alternates: &[
                "Write a one-paragraph summary from memory.",
                "Block tomorrow's 15-minute review slot in your calendar.",
            ],
        },
    ],
    mantra: "Small wins compound",
};

const STRESS_PLAN: PlanTemplate = PlanTemplate {
    steps: [
        StepChoice {
            primary: "Brain-dump for 2 minutes: list everything, then circle one doable action.",
            alternates: &[
                "Breathe slowly for 2 minutes: 4 seconds in, 6 seconds out.",
                "Brain-dump the one worry taking the most space, then one tiny response to it.",
            ],
        },
        StepChoice {
            primary: "Set a 10-minute timer and do only the first micro-step.",
            alternates: &[
                "Shrink the next task until it fits in 5 minutes, then do it.",
                "Pick the easiest item on your list and finish just that.",
            ],
        },
        StepChoice {
            primary: "Remove one distraction (phone in another room).",
            alternates: &[
                "Close every tab you don't need for the next step.",
                "Tell someone what you're doing for the next 10 minutes.",
            ],
        },
    ],
    mantra: "Begin before you think",
};

const ACTIVITY_PLAN: PlanTemplate = PlanTemplate {
    steps: [
        StepChoice {
            primary: "Put on your kit and start a 5-minute warm-up.",
            alternates: &[
                "Lay out your kit and walk briskly for 5 minutes.",
                "Fill your water bottle and do 5 minutes of mobility.",
            ],
        },
        StepChoice {
            primary: "Do two easy sets to get going.",
            alternates: &[
                "Do one round at half effort, then decide on the next.",
                "Move for 10 easy minutes before judging how you feel.",
            ],
        },
        StepChoice {
            primary: "Log the session (date, sets, mood).",
            alternates: &[
                "Note one thing that felt better than last time.",
                "Write down when the next session happens.",
            ],
        },
    ],
    mantra: "Motion creates momentum",
};

const MORNING_PLAN: PlanTemplate = PlanTemplate {
    steps: [
        StepChoice {
            primary: "Write down the next 10-minute task.",
            alternates: &[
                "Name the one outcome that would make this morning a win.",
                "Choose the task you've been putting off and define its first move.",
            ],
        },
        StepChoice {
            primary: "Prepare one thing that reduces friction.",
            alternates: &[
                "Clear your desk of everything unrelated to that task.",
                "Open only the file or page that task needs.",
            ],
        },
        StepChoice {
            primary: "Commit to 5 minutes and start.",
            alternates: &[
                "Start a 10-minute timer and begin before it feels ready.",
                "Do the first visible piece, however small.",
            ],
        },
    ],
    mantra: "One small step beats zero",
};

const MIDDAY_PLAN: PlanTemplate = PlanTemplate {
    steps: [
        StepChoice {
            primary: "Note where you left off and the very next action.",
            alternates: &[
                "Reread your morning goal and mark what's done.",
                "Pick the smallest unfinished piece from this morning.",
            ],
        },
        StepChoice {
            primary: "Clear one small blocker in under 10 minutes.",
            alternates: &[
                "Send the one message that unblocks your next step.",
                "Drop or postpone one task that no longer matters today.",
            ],
        },
        StepChoice {
            primary: "Restart with a 5-minute push on that action.",
            alternates: &[
                "Work 15 focused minutes before the next break.",
                "Finish one small win before checking messages.",
            ],
        },
    ],
    mantra: "One small step beats zero",
};

const EVENING_PLAN: PlanTemplate = PlanTemplate {
    steps: [
        StepChoice {
            primary: "Write down one thing you're proud of today.",
            alternates: &[
                "List three things that moved forward today.",
                "Note the moment you felt most focused today.",
            ],
        },
        StepChoice {
            primary: "Note one thing to adjust tomorrow.",
            alternates: &[
                "Name what slowed you down and one way around it.",
                "Pick one habit to keep and one to drop tomorrow.",
            ],
        },
        StepChoice {
            primary: "Set tomorrow's first tiny step and leave it visible.",
            alternates: &[
                "Prepare what tomorrow's first task needs tonight.",
                "Write tomorrow's seed task on a sticky note.",
            ],
        },
    ],
    mantra: "One small step beats zero",
};

/// Plan template for a context, using the slot for the general case.
pub fn plan_template(context: CoachContext, slot: TimeSlot) -> &'static PlanTemplate {
    match context {
        CoachContext::Exam => &EXAM_PLAN,
        CoachContext::Stress => &STRESS_PLAN,
        CoachContext::Activity => &ACTIVITY_PLAN,
        CoachContext::General => match slot {
            TimeSlot::Morning => &MORNING_PLAN,
            TimeSlot::Midday => &MIDDAY_PLAN,
            TimeSlot::Evening => &EVENING_PLAN,
        },
    }
}

/// One-line empathetic analysis before tone and profile decoration.
pub fn base_analysis(context: CoachContext, slot: TimeSlot, label: SentimentLabel) -> String {
    match context {
        CoachContext::Exam => {
            "Exam preparation: get clear on one target, then switch on active recall.".to_string()
        }
        CoachContext::Stress => {
            "Stress detected: lower the mental load and start with something simple.".to_string()
        }
        CoachContext::Activity => {
            "Movement beats motivation: make getting started as easy as possible.".to_string()
        }
        CoachContext::General => match label {
            SentimentLabel::Negative => format!(
                "{}: sounds like a rough moment, so shrink the goal until it feels doable.",
                slot.title()
            ),
            SentimentLabel::Positive => format!(
                "{}: good energy, build on that momentum with one clear target.",
                slot.title()
            ),
            SentimentLabel::Neutral => {
                format!("{}: aim for one small, clear, doable objective.", slot.title())
            }
        },
    }
}
