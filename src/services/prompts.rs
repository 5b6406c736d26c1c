//! Check-in Prompts
//!
//! Per-slot opening questions and one-line nudges shown before the user
//! writes a note.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use daily_up_core::TimeSlot;

/// An opening question for a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckInPrompt {
    pub title: &'static str,
    pub question: &'static str,
}

const MORNING_PROMPTS: &[CheckInPrompt] = &[
    CheckInPrompt {
        title: "Morning Boost",
        question: "Tiny start today beats zero. What's your main goal for this morning?",
    },
    CheckInPrompt {
        title: "Focus Sprint",
        question: "Pick one task you can move in 15 minutes. Which one?",
    },
];

const MIDDAY_PROMPTS: &[CheckInPrompt] = &[
    CheckInPrompt {
        title: "Midday Check-in",
        question: "How's it going so far? Any blocker you want to clear now?",
    },
    CheckInPrompt {
        title: "Momentum",
        question: "What's one small win you can get before the next break?",
    },
];

const EVENING_PROMPTS: &[CheckInPrompt] = &[
    CheckInPrompt {
        title: "Evening Reflection",
        question: "What are you proud of today? Anything to improve tomorrow?",
    },
    CheckInPrompt {
        title: "Close the Day",
        question: "One tiny step to make tomorrow start easier?",
    },
];

/// All prompts for a slot.
pub fn prompts_for(slot: TimeSlot) -> &'static [CheckInPrompt] {
    match slot {
        TimeSlot::Morning => MORNING_PROMPTS,
        TimeSlot::Midday => MIDDAY_PROMPTS,
        TimeSlot::Evening => EVENING_PROMPTS,
    }
}

/// One-line nudge for a slot.
pub fn nudge(slot: TimeSlot) -> &'static str {
    match slot {
        TimeSlot::Morning => "Morning Boost — one small step beats zero.",
        TimeSlot::Midday => "Midday Reset — turn one tiny win.",
        TimeSlot::Evening => "Evening Wrap — reflect and set tomorrow's seed.",
    }
}

/// Pick a random prompt for the slot using the supplied RNG.
pub fn pick_prompt<R: Rng + ?Sized>(slot: TimeSlot, rng: &mut R) -> CheckInPrompt {
    let bag = prompts_for(slot);
    // Every bag is non-empty
    bag.choose(rng).copied().unwrap_or(bag[0])
}
