//! Tool for adding new resolutions
//!
//! This module implements the `add` command: optionally ask the coach to
//! categorize the title, then store the goal.

use serde::{Deserialize, Serialize};
use crate::coach::GoalAnalysis;
use crate::domain::{Goal, NewGoal};
use crate::storage::ResolutionStorage;
use crate::tools::AiFallback;
use crate::{ResolutionTracker, TrackerError};

/// Parameters for adding a resolution
#[derive(Debug, Clone, Deserialize)]
pub struct AddGoalParams {
    pub title: String,
    /// Skip AI categorization entirely
    #[serde(default)]
    pub no_ai: bool,
}

/// Response from adding a resolution
#[derive(Debug, Serialize)]
pub struct AddGoalResponse {
    pub goal: Goal,
    /// Present when the coach categorized the goal
    pub analysis: Option<GoalAnalysis>,
    /// Present when the coach was wanted but unavailable
    pub fallback: Option<AiFallback>,
}

/// Add a resolution, categorized by the coach unless `no_ai` is set
///
/// Coach failures never block the add; the goal is stored with defaults and
/// the reason is reported in `fallback`.
pub async fn add_goal(
    tracker: &ResolutionTracker,
    params: AddGoalParams,
) -> Result<AddGoalResponse, TrackerError> {
    // Reject bad titles before spending a model call on them
    let title = Goal::validate_title(&params.title)?;

    if params.no_ai {
        let goal = tracker.storage().add_goal(NewGoal::titled(title))?;
        return Ok(AddGoalResponse {
            goal,
            analysis: None,
            fallback: None,
        });
    }

    let analysis = match tracker.coach() {
        Ok(coach) => coach.analyze_goal(&title).await.map_err(TrackerError::from),
        Err(e) => Err(e),
    };

    match analysis {
        Ok(analysis) => {
            let goal = tracker
                .storage()
                .add_goal(analysis.clone().into_new_goal(title))?;
            Ok(AddGoalResponse {
                goal,
                analysis: Some(analysis),
                fallback: None,
            })
        }
        Err(e) => {
            let fallback = AiFallback::from_error(&e);
            let goal = tracker.storage().add_goal(NewGoal::titled(title))?;
            Ok(AddGoalResponse {
                goal,
                analysis: None,
                fallback: Some(fallback),
            })
        }
    }
}
