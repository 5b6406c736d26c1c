//! Integration Tests Module
//!
//! End-to-end tests for the DailyUp coach: generation fallback, rule-based
//! plans, journal backends and the config file.

// Shared mock providers and scorers
mod support;

// Coach adapter with mock generation providers
mod coach_test;

// Rule-based plan selection through the full coach
mod fallback_test;

// Journal backends
mod journal_test;

// Config file and application state
mod config_test;
