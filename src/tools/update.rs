//! Tool for editing existing resolutions
//!
//! This module implements the `edit` command to modify a goal's title,
//! category, target or priority in place.

use serde::{Deserialize, Serialize};
use crate::domain::{Goal, GoalId, GoalPatch};
use crate::storage::ResolutionStorage;
use crate::tools::find_goal;
use crate::{ResolutionTracker, TrackerError};

/// Parameters for editing a resolution
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditGoalParams {
    pub goal_id: GoalId,
    pub title: Option<String>,
    pub category: Option<String>,
    pub target: Option<String>,
    pub priority: Option<u8>,
}

/// Response from editing a resolution
#[derive(Debug, Serialize)]
pub struct EditGoalResponse {
    pub goal: Goal,
    /// False when no fields were supplied and nothing was written
    pub updated: bool,
}

/// Apply the supplied fields to a goal
pub fn edit_goal(
    tracker: &ResolutionTracker,
    params: EditGoalParams,
) -> Result<EditGoalResponse, TrackerError> {
    // Fetch the existing goal first so a bad id wins over an empty patch
    let goal = find_goal(tracker, params.goal_id)?;

    let patch = GoalPatch {
        title: params.title,
        category: params.category,
        target: params.target,
        priority: params.priority,
        emoji: None,
    };
    if patch.is_empty() {
        return Ok(EditGoalResponse {
            goal,
            updated: false,
        });
    }

    let goal = tracker
        .storage()
        .update_goal(params.goal_id, patch)?
        .ok_or(TrackerError::GoalNotFound(params.goal_id))?;

    Ok(EditGoalResponse {
        goal,
        updated: true,
    })
}
