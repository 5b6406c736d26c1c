//! DailyUp LLM
//!
//! Provides a unified interface for the generation services the coach can
//! call:
//! - OpenAI (and OpenAI-compatible endpoints)
//! - Ollama (local inference)
//!
//! Also includes the HTTP client factory shared with remote sentiment scorers.

pub mod http_client;
pub mod ollama;
pub mod openai;
pub mod provider;
pub mod types;

// Re-export main types
pub use http_client::build_http_client;
pub use ollama::OllamaProvider;
pub use openai::OpenAIProvider;
pub use provider::{build_provider, missing_api_key_error, parse_http_error, LlmProvider};
pub use types::*;
