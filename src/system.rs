//! Header pause/resume switch.
//!
//! Display state only: the refresh session keeps ticking while paused.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SystemStatus {
    #[default]
    Active,
    Paused,
    Error,
}

impl SystemStatus {
    /// Active pauses; anything else (paused or error) resumes to active.
    pub fn toggle(self) -> Self {
        match self {
            | SystemStatus::Active => SystemStatus::Paused,
            | SystemStatus::Paused | SystemStatus::Error => SystemStatus::Active,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            | SystemStatus::Active => "green",
            | SystemStatus::Paused => "yellow",
            | SystemStatus::Error => "red",
        }
    }
}

impl std::fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            | SystemStatus::Active => write!(f, "active"),
            | SystemStatus::Paused => write!(f, "paused"),
            | SystemStatus::Error => write!(f, "error"),
        }
    }
}
