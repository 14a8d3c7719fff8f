//! Tool for listing all resolutions
//!
//! This module implements the `list` command.

use chrono::Local;
use serde::Serialize;
use crate::analytics::GoalProgress;
use crate::storage::ResolutionStorage;
use crate::{ResolutionTracker, TrackerError};

/// Response from listing resolutions
#[derive(Debug, Serialize)]
pub struct ListGoalsResponse {
    /// Goals with their progress, most important first
    pub goals: Vec<GoalProgress>,
}

/// List all resolutions sorted by priority
pub fn list_goals(tracker: &ResolutionTracker) -> Result<ListGoalsResponse, TrackerError> {
    let document = tracker.storage().load()?;
    let today = Local::now().date_naive();

    let goals = tracker
        .analytics()
        .goal_cards(&document.goals, &document.logs, today);

    Ok(ListGoalsResponse { goals })
}
