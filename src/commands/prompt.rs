//! Prompt Commands

use chrono::{Local, Timelike};
use rand::Rng;
use serde::Serialize;

use daily_up_core::TimeSlot;

use crate::services::prompts::{nudge, pick_prompt};

/// Opener shown before a check-in.
#[derive(Debug, Clone, Serialize)]
pub struct PromptView {
    pub slot: TimeSlot,
    pub title: &'static str,
    pub question: &'static str,
    pub nudge: &'static str,
}

/// Slot for a local hour: before noon is morning, before 17:00 midday.
pub fn slot_for_hour(hour: u32) -> TimeSlot {
    match hour {
        0..=11 => TimeSlot::Morning,
        12..=16 => TimeSlot::Midday,
        _ => TimeSlot::Evening,
    }
}

/// Slot for the current local time.
pub fn current_slot() -> TimeSlot {
    slot_for_hour(Local::now().hour())
}

/// Pick an opener and nudge for the slot.
pub fn get_prompt<R: Rng + ?Sized>(slot: TimeSlot, rng: &mut R) -> PromptView {
    let prompt = pick_prompt(slot, rng);
    PromptView {
        slot,
        title: prompt.title,
        question: prompt.question,
        nudge: nudge(slot),
    }
}
