//! Fallback Coach
//!
//! Deterministic, keyword-driven plan selection used whenever the generation
//! service is absent or unusable.

mod contexts;
mod selector;

pub use contexts::{base_analysis, plan_template, CoachContext, PlanTemplate, StepChoice};
pub use selector::{tone_lead_in, FallbackCoach, FallbackRequest};
