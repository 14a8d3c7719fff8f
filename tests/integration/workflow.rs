/// The everyday command flow, run offline
use resolution_tracker::tools::*;
use resolution_tracker::*;
use tempfile::TempDir;

#[cfg(test)]
mod workflow_tests {
    use super::*;

    fn offline_tracker(temp_dir: &TempDir) -> ResolutionTracker {
        ResolutionTracker::with_model(temp_dir.path().join("data.json"), None)
    }

    #[tokio::test]
    async fn test_add_log_list_remove() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let tracker = offline_tracker(&temp_dir);

        let added = add_goal(
            &tracker,
            AddGoalParams {
                title: "Run 3x/week".to_string(),
                no_ai: true,
            },
        )
        .await
        .expect("Failed to add goal");
        assert_eq!(added.goal.id, GoalId(1));

        let logged = log_progress(
            &tracker,
            LogProgressParams {
                text: "ran 5k".to_string(),
                goal_id: Some(GoalId(1)),
            },
        )
        .await
        .expect("Failed to log progress");
        assert_eq!(logged.entry.goal_id, GoalId(1));

        let listed = list_goals(&tracker).expect("Failed to list goals");
        assert_eq!(listed.goals.len(), 1);
        assert_eq!(listed.goals[0].metrics.log_count, 1);
        assert_eq!(listed.goals[0].metrics.streak, 1);
        assert_eq!(listed.goals[0].metrics.activity[6], 1.0);

        let removed = remove_goal(&tracker, RemoveGoalParams { goal_id: GoalId(1) })
            .expect("Failed to remove goal");
        assert_eq!(removed.removed_logs, 1);

        assert!(list_goals(&tracker).unwrap().goals.is_empty());
        assert!(tracker.storage().logs(None).unwrap().is_empty());

        let result = remove_goal(&tracker, RemoveGoalParams { goal_id: GoalId(1) });
        assert!(matches!(result, Err(TrackerError::GoalNotFound(GoalId(1)))));
    }

    #[tokio::test]
    async fn test_status_summarizes_the_week() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let tracker = offline_tracker(&temp_dir);

        for title in ["Run", "Read", "Write"] {
            add_goal(
                &tracker,
                AddGoalParams {
                    title: title.to_string(),
                    no_ai: true,
                },
            )
            .await
            .unwrap();
        }
        for text in ["ran 2k", "ran 4k"] {
            log_progress(
                &tracker,
                LogProgressParams {
                    text: text.to_string(),
                    goal_id: Some(GoalId(1)),
                },
            )
            .await
            .unwrap();
        }

        let status = goal_status(&tracker).expect("Failed to get status");
        assert_eq!(status.goals.len(), 3);
        assert_eq!(status.stats.total_goals, 3);
        assert_eq!(status.stats.logs_this_week, 2);
        assert_eq!(status.stats.on_track, 1);
        assert_eq!(status.stats.overall_streak, 1);
        assert!(!status.insights.is_empty());
    }

    #[tokio::test]
    async fn test_cli_commands_run_against_a_fresh_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let tracker = offline_tracker(&temp_dir);

        cli::list(&tracker).expect("list on an empty file");
        cli::logs(&tracker, None, DEFAULT_HISTORY_LIMIT).expect("logs on an empty file");
        cli::status(&tracker).expect("status on an empty file");
        assert!(matches!(
            cli::log(&tracker, "did it".to_string(), None).await,
            Err(TrackerError::NoGoals)
        ));

        cli::add(&tracker, "Learn Rust".to_string(), false)
            .await
            .expect("add falls back without a model");
        cli::log(&tracker, "read a chapter".to_string(), None)
            .await
            .expect("log falls back without a model");
        cli::remove(&tracker, GoalId(1), true).expect("forced remove");

        assert!(tracker.storage().goals().unwrap().is_empty());
        assert!(matches!(
            cli::remove(&tracker, GoalId(1), true),
            Err(TrackerError::GoalNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_demo_seed_drives_dashboard_view() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let tracker = offline_tracker(&temp_dir);
        tracker
            .storage()
            .add_goal(NewGoal::titled("replaced by the demo"))
            .unwrap();

        dashboard::demo::seed(&tracker).expect("Failed to seed demo data");

        let status = goal_status(&tracker).unwrap();
        assert_eq!(status.goals.len(), 10);
        assert_eq!(status.goals[0].goal.title, "Week 1: Resolution Tracker");
        assert_eq!(status.goals[0].metrics.log_count, 4);
        assert_eq!(status.goals[0].metrics.percent(), 40);
        assert_eq!(status.stats.logs_this_week, 4);
        assert_eq!(status.stats.on_track, 1);

        colored::control::set_override(false);
        let chat = [dashboard::ChatMessage::coach("hello")];
        let frame = dashboard::view::Frame {
            cards: &status.goals,
            stats: &status.stats,
            chat: &chat,
            pending: 1,
            width: 80,
        };
        let screen = dashboard::view::screen(&frame).join("\n");
        assert!(screen.contains("Week 10: Build an AI App"));
        assert!(screen.contains("Coach › hello"));
        assert!(screen.contains("Coach is thinking..."));
        assert!(screen.contains("1/10 on track"));
    }
}
