//! Tool for logging progress
//!
//! This module implements the `log` command. With an explicit goal the text
//! is stored as-is; otherwise the coach matches it to a goal and extracts a
//! summary, value, unit and sentiment.

use serde::{Deserialize, Serialize};
use crate::domain::{DomainError, Goal, GoalId, LogEntry, NewLogEntry, Sentiment};
use crate::storage::ResolutionStorage;
use crate::tools::{find_goal, AiFallback};
use crate::{ResolutionTracker, TrackerError};

/// Parameters for logging progress
#[derive(Debug, Clone, Deserialize)]
pub struct LogProgressParams {
    pub text: String,
    /// Attribute the update to this goal instead of asking the coach
    pub goal_id: Option<GoalId>,
}

/// Response from logging progress
#[derive(Debug, Serialize)]
pub struct LogProgressResponse {
    pub goal: Goal,
    pub entry: LogEntry,
    pub fallback: Option<AiFallback>,
}

/// Log a progress update
pub async fn log_progress(
    tracker: &ResolutionTracker,
    params: LogProgressParams,
) -> Result<LogProgressResponse, TrackerError> {
    let storage = tracker.storage();
    let goals = storage.goals()?;
    if goals.is_empty() {
        return Err(TrackerError::NoGoals);
    }
    if params.text.trim().is_empty() {
        return Err(DomainError::Validation {
            message: "Progress update cannot be empty".to_string(),
        }
        .into());
    }

    let (goal, input, fallback) = match params.goal_id {
        Some(goal_id) => {
            let goal = find_goal(tracker, goal_id)?;
            let input = NewLogEntry {
                sentiment: Some(Sentiment::Neutral),
                ..NewLogEntry::plain(goal.id, params.text.clone())
            };
            (goal, input, None)
        }
        None => match analyze(tracker, &params.text, &goals).await {
            Ok((goal, input)) => (goal, input, None),
            Err(e) => {
                // Without the coach, the update goes to the first goal
                let fallback = AiFallback::from_error(&e);
                let goal = goals[0].clone();
                let input = NewLogEntry::plain(goal.id, params.text.clone());
                (goal, input, Some(fallback))
            }
        },
    };

    let entry = storage
        .add_log(input)?
        .ok_or(TrackerError::GoalNotFound(goal.id))?;

    Ok(LogProgressResponse {
        goal,
        entry,
        fallback,
    })
}

async fn analyze(
    tracker: &ResolutionTracker,
    text: &str,
    goals: &[Goal],
) -> Result<(Goal, NewLogEntry), TrackerError> {
    let analysis = tracker.coach()?.analyze_log(text, goals).await?;

    let goal = analysis
        .goal_id
        .and_then(|id| goals.iter().find(|g| g.id == id))
        .unwrap_or(&goals[0])
        .clone();
    let input = analysis.into_new_log(text, goal.id);
    Ok((goal, input))
}
