//! Config Commands

use std::path::PathBuf;

use crate::models::settings::AppConfig;
use crate::state::AppState;

pub async fn show_config(state: &AppState) -> AppConfig {
    state.get_config().await
}

pub async fn config_path(state: &AppState) -> PathBuf {
    state.config_path().await
}
