//! Tool for the quick progress overview
//!
//! This module implements the `status` command.

use chrono::{Local, Utc};
use serde::Serialize;
use crate::analytics::{DashboardStats, GoalProgress};
use crate::storage::ResolutionStorage;
use crate::{ResolutionTracker, TrackerError};

/// Response from checking status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub goals: Vec<GoalProgress>,
    pub stats: DashboardStats,
    pub insights: Vec<String>,
}

/// Summarize progress across all resolutions
pub fn goal_status(tracker: &ResolutionTracker) -> Result<StatusResponse, TrackerError> {
    let document = tracker.storage().load()?;
    let analytics = tracker.analytics();
    let now = Utc::now();

    let goals = analytics.goal_cards(
        &document.goals,
        &document.logs,
        now.with_timezone(&Local).date_naive(),
    );
    let stats = analytics.dashboard_stats(&document.goals, &document.logs, now);
    let insights = analytics.generate_insights(&document.goals, &document.logs, &stats);

    Ok(StatusResponse {
        goals,
        stats,
        insights,
    })
}
