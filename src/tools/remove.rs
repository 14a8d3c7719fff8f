//! Tool for removing a resolution and its logs

use serde::{Deserialize, Serialize};
use crate::domain::{Goal, GoalId};
use crate::storage::ResolutionStorage;
use crate::tools::find_goal;
use crate::{ResolutionTracker, TrackerError};

#[derive(Debug, Clone, Deserialize)]
pub struct RemoveGoalParams {
    pub goal_id: GoalId,
}

#[derive(Debug, Serialize)]
pub struct RemoveGoalResponse {
    pub goal: Goal,
    pub removed_logs: usize,
}

/// Remove a goal; its logs go with it
pub fn remove_goal(
    tracker: &ResolutionTracker,
    params: RemoveGoalParams,
) -> Result<RemoveGoalResponse, TrackerError> {
    let storage = tracker.storage();
    let goal = find_goal(tracker, params.goal_id)?;
    let removed_logs = storage.logs(Some(goal.id))?.len();

    if !storage.remove_goal(goal.id)? {
        return Err(TrackerError::GoalNotFound(goal.id));
    }

    Ok(RemoveGoalResponse { goal, removed_logs })
}
