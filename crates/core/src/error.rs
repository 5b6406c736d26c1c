//! Core Error Types
//!
//! The coaching error taxonomy plus value validation for parsed inputs.
//!
//! `EmptyInput` is rejected by the embedding layer before the core is called.
//! `ScoringUnavailable`, `GenerationUnavailable` and `SchemaViolation` never
//! escape the coach: they are recovered locally and surface only as a
//! [`FallbackReason`](crate::coaching::FallbackReason) on the outcome.

use thiserror::Error;

/// Core error type for the DailyUp workspace.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The user submitted an empty or whitespace-only note
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// The sentiment scorer could not produce a score
    #[error("Scoring unavailable: {0}")]
    ScoringUnavailable(String),

    /// The generation service could not be reached or refused the request
    #[error("Generation unavailable: {0}")]
    GenerationUnavailable(String),

    /// The generation service answered with something that is not a coach response
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create an empty-input error
    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    /// Create a scoring-unavailable error
    pub fn scoring_unavailable(msg: impl Into<String>) -> Self {
        Self::ScoringUnavailable(msg.into())
    }

    /// Create a generation-unavailable error
    pub fn generation_unavailable(msg: impl Into<String>) -> Self {
        Self::GenerationUnavailable(msg.into())
    }

    /// Create a schema-violation error
    pub fn schema_violation(msg: impl Into<String>) -> Self {
        Self::SchemaViolation(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
