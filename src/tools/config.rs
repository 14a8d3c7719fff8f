//! Tool for viewing and changing preferences
//!
//! This module implements the `config` command. With no fields it just
//! reports the current settings.

use serde::{Deserialize, Serialize};
use crate::domain::{Config, ConfigPatch, Personality, ReminderFrequency};
use crate::storage::ResolutionStorage;
use crate::{ResolutionTracker, TrackerError};

/// Parameters for the config command
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigParams {
    pub reminder_frequency: Option<ReminderFrequency>,
    pub preferred_time: Option<String>,
    pub ai_personality: Option<Personality>,
}

/// Response from the config command
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub config: Config,
    pub updated: bool,
}

/// Show preferences, applying any supplied changes first
pub fn configure(
    tracker: &ResolutionTracker,
    params: ConfigParams,
) -> Result<ConfigResponse, TrackerError> {
    let patch = ConfigPatch {
        reminder_frequency: params.reminder_frequency,
        preferred_time: params.preferred_time,
        ai_personality: params.ai_personality,
    };

    if patch.is_empty() {
        return Ok(ConfigResponse {
            config: tracker.storage().config()?,
            updated: false,
        });
    }

    let config = tracker.storage().update_config(patch)?;
    tracing::info!("Updated preferences");
    Ok(ConfigResponse {
        config,
        updated: true,
    })
}
