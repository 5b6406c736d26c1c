//! Settings Models
//!
//! Application configuration and settings data structures.

use serde::{Deserialize, Serialize};

use daily_up_core::{Profile, Tone};
use daily_up_llm::{ProviderConfig, ProviderType};

use super::rules::CoachRules;

/// Provider value that disables generation entirely
pub const PROVIDER_NONE: &str = "none";

/// Application configuration stored in config.json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Coaching profile
    #[serde(default)]
    pub profile: Profile,
    /// Generation provider settings
    #[serde(default)]
    pub generation: GenerationSettings,
    /// Sentiment scorer settings
    #[serde(default)]
    pub sentiment: SentimentSettings,
    /// Journal backend settings
    #[serde(default)]
    pub journal: JournalSettings,
    /// Thresholds and keyword lists for the deterministic coach
    #[serde(default)]
    pub rules: CoachRules,
}

/// Generation provider settings. The API key itself is read from the
/// environment variable named by `api_key_env` and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// "openai", "ollama", or "none"
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Endpoint override (OpenAI-compatible servers, remote Ollama)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Upper bound on a single generation call
    #[serde(default = "default_generation_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_temperature() -> f32 {
    0.95
}

fn default_max_tokens() -> u32 {
    220
}

fn default_generation_timeout() -> u64 {
    20
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: None,
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            request_timeout_secs: default_generation_timeout(),
            proxy_url: None,
        }
    }
}

impl GenerationSettings {
    /// Parsed provider type, `None` when generation is disabled.
    pub fn provider_type(&self) -> Option<ProviderType> {
        if self.provider.eq_ignore_ascii_case(PROVIDER_NONE) {
            return None;
        }
        self.provider.parse().ok()
    }

    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }

    /// Build the provider configuration, `None` when generation is disabled.
    pub fn provider_config(&self) -> Option<ProviderConfig> {
        let provider = self.provider_type()?;
        Some(ProviderConfig {
            provider,
            api_key: match provider {
                ProviderType::OpenAI => self.api_key(),
                ProviderType::Ollama => None,
            },
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            proxy_url: self.proxy_url.clone(),
        })
    }
}

/// Which sentiment scorer backs the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SentimentBackend {
    /// Offline word-valence lexicon
    #[default]
    Lexicon,
    /// Hosted text-classification model
    HuggingFace,
}

impl std::str::FromStr for SentimentBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lexicon" => Ok(SentimentBackend::Lexicon),
            "huggingface" | "hf" => Ok(SentimentBackend::HuggingFace),
            other => Err(format!(
                "Invalid sentiment backend: {}. Must be 'lexicon' or 'huggingface'",
                other
            )),
        }
    }
}

/// Sentiment scorer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSettings {
    #[serde(default)]
    pub backend: SentimentBackend,
    /// Hosted model id (HuggingFace backend only)
    #[serde(default = "default_sentiment_model")]
    pub model: String,
    /// Inference endpoint override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Environment variable holding the inference API token
    #[serde(default = "default_sentiment_token_env")]
    pub api_token_env: String,
    #[serde(default = "default_sentiment_timeout")]
    pub request_timeout_secs: u64,
}

fn default_sentiment_model() -> String {
    "distilbert-base-uncased-finetuned-sst-2-english".to_string()
}

fn default_sentiment_token_env() -> String {
    "HF_API_TOKEN".to_string()
}

fn default_sentiment_timeout() -> u64 {
    10
}

impl Default for SentimentSettings {
    fn default() -> Self {
        Self {
            backend: SentimentBackend::default(),
            model: default_sentiment_model(),
            base_url: None,
            api_token_env: default_sentiment_token_env(),
            request_timeout_secs: default_sentiment_timeout(),
        }
    }
}

impl SentimentSettings {
    pub fn api_token(&self) -> Option<String> {
        std::env::var(&self.api_token_env)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }
}

/// Which store the journal is persisted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JournalBackend {
    /// Pretty-printed JSON array file
    #[default]
    Json,
    /// SQLite database
    Sqlite,
    /// Process memory only
    Memory,
}

impl std::str::FromStr for JournalBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(JournalBackend::Json),
            "sqlite" => Ok(JournalBackend::Sqlite),
            "memory" => Ok(JournalBackend::Memory),
            other => Err(format!(
                "Invalid journal backend: {}. Must be 'json', 'sqlite', or 'memory'",
                other
            )),
        }
    }
}

/// Journal settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalSettings {
    #[serde(default)]
    pub backend: JournalBackend,
    /// How many past entries feed `recent_steps`
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

fn default_history_window() -> usize {
    6
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            backend: JournalBackend::default(),
            history_window: default_history_window(),
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub name: Option<String>,
    pub tone: Option<Tone>,
    /// An empty string clears the goal
    pub goal: Option<String>,
    /// An empty string clears the work context
    pub work_context: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub request_timeout_secs: Option<u64>,
    pub sentiment_backend: Option<SentimentBackend>,
    pub journal_backend: Option<JournalBackend>,
    pub history_window: Option<usize>,
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(name) = update.name {
            self.profile.name = name.trim().to_string();
        }
        if let Some(tone) = update.tone {
            self.profile.tone = tone;
        }
        if let Some(goal) = update.goal {
            self.profile.goal = non_blank(goal);
        }
        if let Some(work_context) = update.work_context {
            self.profile.work_context = non_blank(work_context);
        }
        if let Some(provider) = update.provider {
            self.generation.provider = provider.trim().to_lowercase();
        }
        if let Some(model) = update.model {
            self.generation.model = model;
        }
        if let Some(temperature) = update.temperature {
            self.generation.temperature = temperature;
        }
        if let Some(max_tokens) = update.max_tokens {
            self.generation.max_tokens = max_tokens;
        }
        if let Some(timeout) = update.request_timeout_secs {
            self.generation.request_timeout_secs = timeout;
        }
        if let Some(backend) = update.sentiment_backend {
            self.sentiment.backend = backend;
        }
        if let Some(backend) = update.journal_backend {
            self.journal.backend = backend;
        }
        if let Some(window) = update.history_window {
            self.journal.history_window = window;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        // Validate provider
        let provider = self.generation.provider.as_str();
        if provider != PROVIDER_NONE && provider.parse::<ProviderType>().is_err() {
            return Err(format!(
                "Invalid provider: {}. Must be 'openai', 'ollama', or 'none'",
                provider
            ));
        }

        if self.generation.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }

        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.generation.temperature
            ));
        }

        if self.generation.max_tokens == 0 {
            return Err("max_tokens must be at least 1".to_string());
        }

        if self.generation.request_timeout_secs == 0 || self.generation.request_timeout_secs > 300 {
            return Err("request_timeout_secs must be between 1 and 300".to_string());
        }

        if self.sentiment.request_timeout_secs == 0 {
            return Err("sentiment request_timeout_secs must be at least 1".to_string());
        }

        if self.journal.history_window > 100 {
            return Err("history_window cannot exceed 100".to_string());
        }

        self.rules.validate()
    }
}
