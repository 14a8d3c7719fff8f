//! Tools for AI progress analysis and check-in reminders
//!
//! These implement the `analyze` and `remind` commands. Both need the
//! language model, so a missing key or an unreachable API is an error here
//! rather than a fallback. Without any goals they answer with a hint and
//! never touch the model.

use serde::{Deserialize, Serialize};
use crate::coach::{NO_GOALS_ANALYSIS, NO_GOALS_REMINDER};
use crate::domain::{Goal, GoalId};
use crate::storage::ResolutionStorage;
use crate::tools::find_goal;
use crate::{ResolutionTracker, TrackerError};

/// Parameters for progress analysis
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeParams {
    /// Limit the analysis to one goal
    pub goal_id: Option<GoalId>,
    /// A specific question to answer instead of the general review
    pub question: Option<String>,
}

/// Coach text plus the goal it was scoped to, if any
#[derive(Debug, Serialize)]
pub struct CoachResponse {
    pub focus: Option<Goal>,
    pub text: String,
}

/// Generate an AI analysis of progress
pub async fn analyze_progress(
    tracker: &ResolutionTracker,
    params: AnalyzeParams,
) -> Result<CoachResponse, TrackerError> {
    let document = tracker.storage().load()?;
    if document.goals.is_empty() {
        return Ok(CoachResponse {
            focus: None,
            text: NO_GOALS_ANALYSIS.to_string(),
        });
    }

    let focus = params
        .goal_id
        .map(|id| find_goal(tracker, id))
        .transpose()?;

    let text = tracker
        .coach()?
        .coaching(
            &document.goals,
            &document.logs,
            params.goal_id,
            params.question.as_deref(),
        )
        .await?;

    Ok(CoachResponse { focus, text })
}

/// Generate a short personalised check-in
pub async fn check_in(tracker: &ResolutionTracker) -> Result<CoachResponse, TrackerError> {
    let document = tracker.storage().load()?;
    if document.goals.is_empty() {
        return Ok(CoachResponse {
            focus: None,
            text: NO_GOALS_REMINDER.to_string(),
        });
    }

    let text = tracker
        .coach()?
        .reminder(&document.goals, &document.logs)
        .await?;

    Ok(CoachResponse { focus: None, text })
}
