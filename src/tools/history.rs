//! Tool for viewing recent log entries
//!
//! This module implements the `logs` command.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::domain::{Goal, GoalId, LogEntry};
use crate::storage::ResolutionStorage;
use crate::{ResolutionTracker, TrackerError};

/// Default number of entries shown
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Parameters for viewing log history
#[derive(Debug, Clone, Deserialize)]
pub struct LogHistoryParams {
    pub goal_id: Option<GoalId>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for LogHistoryParams {
    fn default() -> Self {
        Self {
            goal_id: None,
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// One log entry with the goal it belongs to
#[derive(Debug, Serialize)]
pub struct HistoryLine {
    pub entry: LogEntry,
    pub goal: Option<Goal>,
}

/// Response from viewing log history
#[derive(Debug, Serialize)]
pub struct LogHistoryResponse {
    /// Newest first
    pub entries: Vec<HistoryLine>,
}

/// The most recent log entries, newest first
///
/// An unknown goal id simply yields no entries.
pub fn log_history(
    tracker: &ResolutionTracker,
    params: LogHistoryParams,
) -> Result<LogHistoryResponse, TrackerError> {
    let document = tracker.storage().load()?;
    let goals: HashMap<GoalId, &Goal> = document.goals.iter().map(|g| (g.id, g)).collect();

    let mut entries = document.logs_for(params.goal_id);
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    entries.truncate(params.limit);

    let entries = entries
        .into_iter()
        .map(|entry| HistoryLine {
            goal: goals.get(&entry.goal_id).map(|g| (*g).clone()),
            entry,
        })
        .collect();

    Ok(LogHistoryResponse { entries })
}
