//! Application State
//!
//! Owns the configuration service and the journal store, and assembles a
//! [`Coach`] from the current configuration on demand.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::models::settings::{AppConfig, JournalBackend, SettingsUpdate};
use crate::services::coach::Coach;
use crate::services::fallback::FallbackCoach;
use crate::services::sentiment::{build_scorer, SentimentAnalyzer};
use crate::storage::{ConfigService, Database, JournalStore, JsonJournal, MemoryJournal};
use crate::utils::error::AppResult;
use crate::utils::paths::journal_path;

/// Application state shared by the CLI commands
pub struct AppState {
    /// Configuration service for app settings
    config: Arc<RwLock<ConfigService>>,
    /// Journal backend selected in the config at startup
    journal: Arc<dyn JournalStore>,
}

impl AppState {
    /// Load the config from the default location and open the journal.
    pub fn new() -> AppResult<Self> {
        Self::from_config_service(ConfigService::new()?)
    }

    /// Build state around an already loaded config service.
    pub fn from_config_service(config: ConfigService) -> AppResult<Self> {
        let journal = open_journal(config.get_config().journal.backend)?;
        Ok(Self::with_journal(config, journal))
    }

    /// Build state with an explicit journal store.
    pub fn with_journal(config: ConfigService, journal: Arc<dyn JournalStore>) -> Self {
        info!(
            journal = journal.name(),
            config = %config.path().display(),
            "Application state initialized"
        );
        Self {
            config: Arc::new(RwLock::new(config)),
            journal,
        }
    }

    /// Get the current configuration
    pub async fn get_config(&self) -> AppConfig {
        self.config.read().await.get_config_clone()
    }

    /// Update the configuration
    pub async fn update_config(&self, update: SettingsUpdate) -> AppResult<AppConfig> {
        self.config.write().await.update_config(update)
    }

    /// Path of the config file
    pub async fn config_path(&self) -> std::path::PathBuf {
        self.config.read().await.path().to_path_buf()
    }

    pub fn journal(&self) -> &Arc<dyn JournalStore> {
        &self.journal
    }

    /// Assemble a coach from the current configuration.
    pub async fn build_coach(&self) -> AppResult<Coach> {
        let config = self.get_config().await;
        build_coach(&config, Arc::clone(&self.journal))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("journal", &self.journal.name())
            .finish()
    }
}

/// Open the journal backend named in the config.
pub fn open_journal(backend: JournalBackend) -> AppResult<Arc<dyn JournalStore>> {
    let journal: Arc<dyn JournalStore> = match backend {
        JournalBackend::Json => Arc::new(JsonJournal::new(journal_path()?)),
        JournalBackend::Sqlite => Arc::new(Database::new()?),
        JournalBackend::Memory => Arc::new(MemoryJournal::new()),
    };
    Ok(journal)
}

/// Wire scorer, selector and provider together for one config snapshot.
pub fn build_coach(config: &AppConfig, journal: Arc<dyn JournalStore>) -> AppResult<Coach> {
    let scorer = build_scorer(&config.sentiment)?;
    let sentiment = SentimentAnalyzer::new(scorer, config.rules.thresholds)
        .with_timeout(Duration::from_secs(config.sentiment.request_timeout_secs));

    let mut coach = Coach::new(sentiment, FallbackCoach::new(config.rules.clone()))
        .with_journal(journal)
        .with_profile(config.profile.clone())
        .with_timeout(Duration::from_secs(config.generation.request_timeout_secs))
        .with_history_window(config.journal.history_window);

    match config.generation.provider_config() {
        Some(provider_config) => match daily_up_llm::build_provider(provider_config) {
            Ok(provider) => {
                debug!(provider = provider.name(), model = provider.model(), "Generation provider ready");
                coach = coach.with_provider(provider);
            }
            // A bad proxy or base URL must not block offline coaching
            Err(e) => warn!(error = %e, "Generation provider unavailable, coaching offline"),
        },
        None => debug!("No generation provider configured"),
    }

    Ok(coach)
}
