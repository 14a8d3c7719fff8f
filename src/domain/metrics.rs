//! Derived metrics computed from a goal's log entries
//!
//! Everything here is a pure function of the entries plus the caller's idea
//! of "today" or "now", so nothing is persisted and results are easy to test.
//! Calendar days are taken in the local time zone.

use std::collections::{BTreeSet, HashSet};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use crate::domain::{Goal, GoalId, LogEntry};

/// Number of logs after which a goal counts as fully progressed
pub const PROGRESS_LOG_TARGET: usize = 10;
/// Length of the recent-activity series
pub const ACTIVITY_DAYS: usize = 7;
/// Default trailing window for the on-track count
pub const ON_TRACK_WINDOW_DAYS: i64 = 3;

/// Crude completion ratio: one tenth per log, capped at 1.0
///
/// This is a proxy for momentum, not a measure of the goal's actual target.
pub fn progress_ratio(log_count: usize) -> f64 {
    (log_count as f64 / PROGRESS_LOG_TARGET as f64).min(1.0)
}

/// Count consecutive calendar days with at least one log
///
/// The streak must end today or yesterday; anything older counts as broken
/// and yields 0.
pub fn streak<'a, I>(logs: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = &'a LogEntry>,
{
    let dates: BTreeSet<NaiveDate> = logs.into_iter().map(LogEntry::local_date).collect();

    // Walk the distinct days newest first
    let mut days = dates.iter().rev();
    let Some(&latest) = days.next() else {
        return 0;
    };
    if latest < today - Duration::days(1) {
        return 0;
    }

    let mut streak = 1;
    let mut previous = latest;
    for &day in days {
        if Some(day) == previous.pred_opt() {
            streak += 1;
            previous = day;
        } else {
            break;
        }
    }

    streak
}

/// Per-day activity for the last seven days, oldest first, ending today
///
/// Each entry contributes its value, or 1 when it has none.
pub fn recent_activity<'a, I>(logs: I, today: NaiveDate) -> [f64; ACTIVITY_DAYS]
where
    I: IntoIterator<Item = &'a LogEntry>,
{
    let mut buckets = [0.0; ACTIVITY_DAYS];

    for entry in logs {
        let days_ago = (today - entry.local_date()).num_days();
        if (0..ACTIVITY_DAYS as i64).contains(&days_ago) {
            buckets[ACTIVITY_DAYS - 1 - days_ago as usize] += entry.activity_weight();
        }
    }

    buckets
}

/// Number of goals with at least one log inside the trailing window
pub fn on_track(goals: &[Goal], logs: &[LogEntry], now: DateTime<Utc>, window_days: i64) -> usize {
    let cutoff = now - Duration::days(window_days);
    let recent: HashSet<GoalId> = logs
        .iter()
        .filter(|entry| entry.timestamp > cutoff)
        .map(|entry| entry.goal_id)
        .collect();

    goals.iter().filter(|goal| recent.contains(&goal.id)).count()
}

/// Everything the dashboard shows about one goal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalMetrics {
    pub log_count: usize,
    pub progress: f64,
    pub streak: u32,
    pub activity: [f64; ACTIVITY_DAYS],
}

impl GoalMetrics {
    /// Compute metrics for one goal out of the full log list
    pub fn for_goal(goal_id: GoalId, logs: &[LogEntry], today: NaiveDate) -> Self {
        let goal_logs: Vec<&LogEntry> = logs.iter().filter(|e| e.goal_id == goal_id).collect();

        Self {
            log_count: goal_logs.len(),
            progress: progress_ratio(goal_logs.len()),
            streak: streak(goal_logs.iter().copied(), today),
            activity: recent_activity(goal_logs.iter().copied(), today),
        }
    }

    /// Whole-number percentage of `progress`
    pub fn percent(&self) -> u32 {
        (self.progress * 100.0).round() as u32
    }
}

/// A short line of encouragement for the current streak length
pub fn streak_message(streak: u32) -> String {
    match streak {
        0 => "Ready to start your streak! Every journey begins with a single step.".to_string(),
        1 => "Great start! One day down, keep the momentum going.".to_string(),
        2..=6 => format!("Nice work! {} days in a row. You're building a strong habit.", streak),
        7..=13 => format!("Excellent! {} days strong. You're in the groove now!", streak),
        14..=29 => format!("Amazing! {} days straight. This is becoming second nature.", streak),
        _ => format!("Incredible! {} days of consistency. Keep it going!", streak),
    }
}
