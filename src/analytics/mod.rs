//! Analytics engine for progress summaries
//!
//! This module combines stored goals and logs with the derived metrics to
//! produce the per-goal progress summaries and dashboard stats that the
//! commands and the dashboard display.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::metrics::{self, ON_TRACK_WINDOW_DAYS};
use crate::domain::{Goal, GoalMetrics, LogEntry, Sentiment};

/// How many of a goal's logs carried each sentiment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub struggling: usize,
}

impl SentimentCounts {
    fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Struggling => self.struggling += 1,
        }
    }
}

/// Progress summary for one goal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub goal: Goal,
    pub metrics: GoalMetrics,
    /// Sum of logged values, missing values counting as zero
    pub total_value: f64,
    pub last_logged: Option<DateTime<Utc>>,
    pub sentiments: SentimentCounts,
}

/// Summary numbers for the dashboard stats bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_goals: usize,
    /// Logs with a timestamp in the last seven days
    pub logs_this_week: usize,
    /// Streak across all goals
    pub overall_streak: u32,
    /// Goals logged within the on-track window
    pub on_track: usize,
}

/// Analytics engine for processing goal data
#[derive(Debug, Default)]
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    /// Create a new analytics engine
    pub fn new() -> Self {
        Self
    }

    /// Summarize one goal's progress out of the full log list
    pub fn goal_progress(&self, goal: &Goal, logs: &[LogEntry], today: NaiveDate) -> GoalProgress {
        let mut total_value = 0.0;
        let mut last_logged = None;
        let mut sentiments = SentimentCounts::default();

        for entry in logs.iter().filter(|e| e.goal_id == goal.id) {
            total_value += entry.value.unwrap_or(0.0);
            sentiments.record(entry.sentiment);
            // Insertion order is chronological, so the last one wins
            last_logged = Some(entry.timestamp);
        }

        GoalProgress {
            goal: goal.clone(),
            metrics: GoalMetrics::for_goal(goal.id, logs, today),
            total_value,
            last_logged,
            sentiments,
        }
    }

    /// Progress for every goal, most important first
    ///
    /// Goals with equal priority keep their creation order.
    pub fn goal_cards(&self, goals: &[Goal], logs: &[LogEntry], today: NaiveDate) -> Vec<GoalProgress> {
        let mut sorted: Vec<&Goal> = goals.iter().collect();
        sorted.sort_by_key(|g| (g.priority, g.id));

        sorted
            .into_iter()
            .map(|goal| self.goal_progress(goal, logs, today))
            .collect()
    }

    /// Compute the stats bar numbers
    pub fn dashboard_stats(&self, goals: &[Goal], logs: &[LogEntry], now: DateTime<Utc>) -> DashboardStats {
        let week_ago = now - Duration::days(7);
        let today = now.with_timezone(&chrono::Local).date_naive();

        DashboardStats {
            total_goals: goals.len(),
            logs_this_week: logs.iter().filter(|e| e.timestamp > week_ago).count(),
            overall_streak: metrics::streak(logs, today),
            on_track: metrics::on_track(goals, logs, now, ON_TRACK_WINDOW_DAYS),
        }
    }

    /// Short plain-text observations for the status overview
    pub fn generate_insights(&self, goals: &[Goal], logs: &[LogEntry], stats: &DashboardStats) -> Vec<String> {
        let mut insights = Vec::new();

        if goals.is_empty() {
            insights.push("Start by adding your first resolution to track!".to_string());
            return insights;
        }
        if logs.is_empty() {
            insights.push("Great job setting resolutions! Now start logging your progress.".to_string());
            return insights;
        }

        insights.push(format!(
            "{} of {} resolutions logged in the last {} days.",
            stats.on_track, stats.total_goals, ON_TRACK_WINDOW_DAYS
        ));
        insights.push(metrics::streak_message(stats.overall_streak));

        let idle: Vec<&str> = goals
            .iter()
            .filter(|g| !logs.iter().any(|e| e.goal_id == g.id))
            .map(|g| g.title.as_str())
            .collect();
        if !idle.is_empty() {
            insights.push(format!("Not started yet: {}", idle.join(", ")));
        }

        insights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GoalId, LogId, NewGoal, NewLogEntry};

    fn goal(id: u64, priority: u8) -> Goal {
        let input = NewGoal {
            priority: Some(priority),
            ..NewGoal::titled(format!("Goal {}", id))
        };
        Goal::new(GoalId(id), input).unwrap()
    }

    fn log(id: u64, goal: u64, value: Option<f64>, sentiment: Sentiment, at: DateTime<Utc>) -> LogEntry {
        let input = NewLogEntry {
            value,
            sentiment: Some(sentiment),
            ..NewLogEntry::plain(GoalId(goal), "progress")
        };
        LogEntry::new_at(LogId(id), input, at).unwrap()
    }

    #[test]
    fn test_goal_progress_totals() {
        let engine = AnalyticsEngine::new();
        let now = Utc::now();
        let g = goal(1, 3);
        let logs = vec![
            log(1, 1, Some(3.0), Sentiment::Positive, now - Duration::hours(30)),
            log(2, 2, Some(100.0), Sentiment::Neutral, now - Duration::hours(20)),
            log(3, 1, None, Sentiment::Struggling, now - Duration::hours(2)),
        ];

        let progress = engine.goal_progress(&g, &logs, now.with_timezone(&chrono::Local).date_naive());
        assert_eq!(progress.metrics.log_count, 2);
        assert_eq!(progress.total_value, 3.0);
        assert_eq!(progress.last_logged, Some(logs[2].timestamp));
        assert_eq!(progress.sentiments.positive, 1);
        assert_eq!(progress.sentiments.struggling, 1);
        assert_eq!(progress.sentiments.neutral, 0);
    }

    #[test]
    fn test_goal_progress_without_logs() {
        let engine = AnalyticsEngine::new();
        let progress = engine.goal_progress(&goal(1, 3), &[], Utc::now().date_naive());

        assert_eq!(progress.metrics.log_count, 0);
        assert_eq!(progress.total_value, 0.0);
        assert!(progress.last_logged.is_none());
    }

    #[test]
    fn test_cards_sorted_by_priority_then_id() {
        let engine = AnalyticsEngine::new();
        let goals = vec![goal(1, 5), goal(2, 1), goal(3, 5), goal(4, 2)];

        let cards = engine.goal_cards(&goals, &[], Utc::now().date_naive());
        let order: Vec<u64> = cards.iter().map(|c| c.goal.id.0).collect();
        assert_eq!(order, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_dashboard_stats() {
        let engine = AnalyticsEngine::new();
        let now = Utc::now();
        let goals = vec![goal(1, 1), goal(2, 2)];
        let logs = vec![
            log(1, 1, None, Sentiment::Neutral, now - Duration::days(10)),
            log(2, 2, None, Sentiment::Neutral, now - Duration::days(5)),
            log(3, 1, None, Sentiment::Neutral, now - Duration::minutes(1)),
        ];

        let stats = engine.dashboard_stats(&goals, &logs, now);
        assert_eq!(stats.total_goals, 2);
        assert_eq!(stats.logs_this_week, 2);
        assert_eq!(stats.on_track, 1);
        assert!(stats.overall_streak >= 1);
    }

    #[test]
    fn test_insights_for_empty_tracker() {
        let engine = AnalyticsEngine::new();
        let stats = engine.dashboard_stats(&[], &[], Utc::now());

        let insights = engine.generate_insights(&[], &[], &stats);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].contains("first resolution"));
    }

    #[test]
    fn test_insights_name_idle_goals() {
        let engine = AnalyticsEngine::new();
        let now = Utc::now();
        let goals = vec![goal(1, 1), goal(2, 2)];
        let logs = vec![log(1, 1, None, Sentiment::Neutral, now)];

        let stats = engine.dashboard_stats(&goals, &logs, now);
        let insights = engine.generate_insights(&goals, &logs, &stats);
        assert!(insights.iter().any(|i| i == "Not started yet: Goal 2"));
    }
}
