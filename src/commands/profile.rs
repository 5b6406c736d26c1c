//! Profile Commands

use daily_up_core::{Profile, Tone};

use crate::models::settings::SettingsUpdate;
use crate::state::AppState;
use crate::utils::error::AppResult;

/// Fields `profile set` may change. An empty goal or work context clears it.
#[derive(Debug, Clone, Default)]
pub struct ProfileArgs {
    pub name: Option<String>,
    pub tone: Option<Tone>,
    pub goal: Option<String>,
    pub work_context: Option<String>,
}

pub async fn show_profile(state: &AppState) -> Profile {
    state.get_config().await.profile
}

/// Apply and persist a profile change.
pub async fn update_profile(state: &AppState, args: ProfileArgs) -> AppResult<Profile> {
    let update = SettingsUpdate {
        name: args.name,
        tone: args.tone,
        goal: args.goal,
        work_context: args.work_context,
        ..Default::default()
    };
    Ok(state.update_config(update).await?.profile)
}
