//! Coaching Profile
//!
//! User-editable singleton read by the plan selector and prompt builder to
//! personalize phrasing.

use serde::{Deserialize, Serialize};

use crate::checkin::Tone;

/// Name used when the user never set one.
pub const DEFAULT_PROFILE_NAME: &str = "You";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default = "default_name")]
    pub name: String,
    /// Default coach tone
    #[serde(default)]
    pub tone: Tone,
    /// Long-term goal, echoed back as a reminder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    /// Work or study context given to the generation prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_context: Option<String>,
}

fn default_name() -> String {
    DEFAULT_PROFILE_NAME.to_string()
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: default_name(),
            tone: Tone::default(),
            goal: None,
            work_context: None,
        }
    }
}

impl Profile {
    /// The name to address the user by, if they set a real one.
    pub fn display_name(&self) -> Option<&str> {
        let name = self.name.trim();
        if name.is_empty() || name == DEFAULT_PROFILE_NAME {
            None
        } else {
            Some(name)
        }
    }

    pub fn goal(&self) -> Option<&str> {
        self.goal.as_deref().map(str::trim).filter(|g| !g.is_empty())
    }

    pub fn work_context(&self) -> Option<&str> {
        self.work_context
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}
