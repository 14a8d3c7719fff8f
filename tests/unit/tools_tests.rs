/// Command functions run against a tracker with AI disabled
use resolution_tracker::tools::*;
use resolution_tracker::*;
use tempfile::TempDir;

#[cfg(test)]
mod tools_tests {
    use super::*;

    fn offline_tracker() -> (ResolutionTracker, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let tracker = ResolutionTracker::with_model(temp_dir.path().join("data.json"), None);
        (tracker, temp_dir)
    }

    async fn add(tracker: &ResolutionTracker, title: &str) -> Goal {
        add_goal(
            tracker,
            AddGoalParams {
                title: title.to_string(),
                no_ai: true,
            },
        )
        .await
        .expect("Failed to add goal")
        .goal
    }

    #[tokio::test]
    async fn test_add_without_ai_uses_defaults() {
        let (tracker, _temp_dir) = offline_tracker();

        let response = add_goal(
            &tracker,
            AddGoalParams {
                title: "  Read 12 books  ".to_string(),
                no_ai: true,
            },
        )
        .await
        .unwrap();

        assert_eq!(response.goal.title, "Read 12 books");
        assert_eq!(response.goal.category, "general");
        assert_eq!(response.goal.priority, 3);
        assert!(response.analysis.is_none());
        assert!(response.fallback.is_none());
    }

    #[tokio::test]
    async fn test_add_falls_back_when_ai_not_configured() {
        let (tracker, _temp_dir) = offline_tracker();

        let response = add_goal(
            &tracker,
            AddGoalParams {
                title: "Learn Spanish".to_string(),
                no_ai: false,
            },
        )
        .await
        .unwrap();

        let fallback = response.fallback.expect("should report the fallback");
        assert!(fallback.not_configured);
        assert_eq!(response.goal.id, GoalId(1));
        assert_eq!(response.goal.category, "general");
    }

    #[test]
    fn test_add_rejects_blank_title() {
        let (tracker, _temp_dir) = offline_tracker();

        let result = tokio_test::block_on(add_goal(
            &tracker,
            AddGoalParams {
                title: "   ".to_string(),
                no_ai: false,
            },
        ));
        assert!(matches!(result, Err(TrackerError::Domain(_))));
        assert!(tracker.storage().goals().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_log_requires_a_goal() {
        let (tracker, _temp_dir) = offline_tracker();

        let result = log_progress(
            &tracker,
            LogProgressParams {
                text: "ran 5k".to_string(),
                goal_id: None,
            },
        )
        .await;
        assert!(matches!(result, Err(TrackerError::NoGoals)));
    }

    #[tokio::test]
    async fn test_log_to_explicit_goal() {
        let (tracker, _temp_dir) = offline_tracker();
        add(&tracker, "Run").await;
        let read = add(&tracker, "Read").await;

        let response = log_progress(
            &tracker,
            LogProgressParams {
                text: "20 pages".to_string(),
                goal_id: Some(read.id),
            },
        )
        .await
        .unwrap();

        assert_eq!(response.goal.id, read.id);
        assert_eq!(response.entry.parsed_update, "20 pages");
        assert_eq!(response.entry.sentiment, Sentiment::Neutral);
        assert!(response.fallback.is_none());
    }

    #[tokio::test]
    async fn test_log_to_unknown_goal_is_not_found() {
        let (tracker, _temp_dir) = offline_tracker();
        add(&tracker, "Run").await;

        let result = log_progress(
            &tracker,
            LogProgressParams {
                text: "ran".to_string(),
                goal_id: Some(GoalId(42)),
            },
        )
        .await;
        assert!(matches!(result, Err(TrackerError::GoalNotFound(GoalId(42)))));
        assert!(tracker.storage().logs(None).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_log_without_ai_goes_to_first_goal() {
        let (tracker, _temp_dir) = offline_tracker();
        let first = add(&tracker, "Run").await;
        add(&tracker, "Read").await;

        let response = log_progress(
            &tracker,
            LogProgressParams {
                text: "read two chapters".to_string(),
                goal_id: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(response.goal.id, first.id);
        assert_eq!(response.entry.raw_input, "read two chapters");
        assert!(response.fallback.map_or(false, |f| f.not_configured));
    }

    #[tokio::test]
    async fn test_analyze_and_remind_need_the_model() {
        let (tracker, _temp_dir) = offline_tracker();

        // No goals: a hint, and the model is never asked
        let response = analyze_progress(&tracker, AnalyzeParams::default()).await.unwrap();
        assert_eq!(response.text, coach::NO_GOALS_ANALYSIS);
        let response = check_in(&tracker).await.unwrap();
        assert_eq!(response.text, coach::NO_GOALS_REMINDER);

        add(&tracker, "Run").await;
        let result = analyze_progress(&tracker, AnalyzeParams::default()).await;
        assert!(matches!(result, Err(TrackerError::Coach(CoachError::MissingApiKey))));
        let result = check_in(&tracker).await;
        assert!(matches!(result, Err(TrackerError::Coach(CoachError::MissingApiKey))));
    }

    #[tokio::test]
    async fn test_analyze_unknown_goal_is_not_found() {
        let (tracker, _temp_dir) = offline_tracker();
        add(&tracker, "Run").await;

        let result = analyze_progress(
            &tracker,
            AnalyzeParams {
                goal_id: Some(GoalId(9)),
                question: None,
            },
        )
        .await;
        assert!(matches!(result, Err(TrackerError::GoalNotFound(GoalId(9)))));
    }

    #[tokio::test]
    async fn test_edit_goal() {
        let (tracker, _temp_dir) = offline_tracker();
        let goal = add(&tracker, "Run").await;

        let response = edit_goal(
            &tracker,
            EditGoalParams {
                goal_id: goal.id,
                ..EditGoalParams::default()
            },
        )
        .unwrap();
        assert!(!response.updated);
        assert_eq!(response.goal, goal);

        let response = edit_goal(
            &tracker,
            EditGoalParams {
                goal_id: goal.id,
                target: Some("Marathon in October".to_string()),
                priority: Some(1),
                ..EditGoalParams::default()
            },
        )
        .unwrap();
        assert!(response.updated);
        assert_eq!(response.goal.title, "Run");
        assert_eq!(response.goal.target, "Marathon in October");
        assert_eq!(response.goal.priority, 1);
        assert_eq!(response.goal.created_at, goal.created_at);

        let result = edit_goal(
            &tracker,
            EditGoalParams {
                goal_id: goal.id,
                priority: Some(11),
                ..EditGoalParams::default()
            },
        );
        assert!(result.is_err());

        let result = edit_goal(
            &tracker,
            EditGoalParams {
                goal_id: GoalId(5),
                ..EditGoalParams::default()
            },
        );
        assert!(matches!(result, Err(TrackerError::GoalNotFound(GoalId(5)))));
    }

    #[tokio::test]
    async fn test_history_is_newest_first_and_limited() {
        let (tracker, _temp_dir) = offline_tracker();
        let run = add(&tracker, "Run").await;
        let read = add(&tracker, "Read").await;

        for (goal, text) in [(run.id, "one"), (read.id, "two"), (run.id, "three")] {
            tracker
                .storage()
                .add_log(NewLogEntry::plain(goal, text))
                .unwrap();
        }

        let all = log_history(&tracker, LogHistoryParams::default()).unwrap();
        assert_eq!(all.entries.len(), 3);
        assert!(all
            .entries
            .windows(2)
            .all(|pair| pair[0].entry.timestamp >= pair[1].entry.timestamp));

        let limited = log_history(
            &tracker,
            LogHistoryParams {
                goal_id: None,
                limit: 2,
            },
        )
        .unwrap();
        assert_eq!(limited.entries.len(), 2);

        let runs = log_history(
            &tracker,
            LogHistoryParams {
                goal_id: Some(run.id),
                ..LogHistoryParams::default()
            },
        )
        .unwrap();
        assert_eq!(runs.entries.len(), 2);
        assert!(runs.entries.iter().all(|l| l.goal.as_ref().map(|g| g.id) == Some(run.id)));

        let unknown = log_history(
            &tracker,
            LogHistoryParams {
                goal_id: Some(GoalId(77)),
                ..LogHistoryParams::default()
            },
        )
        .unwrap();
        assert!(unknown.entries.is_empty());
    }

    #[test]
    fn test_configure() {
        let (tracker, _temp_dir) = offline_tracker();

        let response = configure(&tracker, ConfigParams::default()).unwrap();
        assert!(!response.updated);
        assert_eq!(response.config, Config::default());

        let response = configure(
            &tracker,
            ConfigParams {
                ai_personality: Some(Personality::Analytical),
                ..ConfigParams::default()
            },
        )
        .unwrap();
        assert!(response.updated);
        assert_eq!(response.config.ai_personality, Personality::Analytical);
        assert_eq!(response.config.preferred_time, "09:00");

        let result = configure(
            &tracker,
            ConfigParams {
                preferred_time: Some("25:99".to_string()),
                ..ConfigParams::default()
            },
        );
        assert!(result.is_err());
        assert_eq!(
            tracker.storage().config().unwrap().ai_personality,
            Personality::Analytical
        );
    }
}
