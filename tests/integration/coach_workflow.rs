/// Command flow with a scripted language model standing in for the API
use async_trait::async_trait;
use resolution_tracker::tools::*;
use resolution_tracker::*;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[cfg(test)]
mod coach_workflow_tests {
    use super::*;

    /// Hands out canned replies in order and remembers what it was asked
    struct ScriptedModel {
        replies: Mutex<VecDeque<Result<String, CoachError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn new(replies: Vec<Result<String, CoachError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LanguageModel for ScriptedModel {
        async fn complete(&self, _system: &str, prompt: &str) -> Result<String, CoachError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(CoachError::EmptyResponse))
        }
    }

    fn tracker_with(temp_dir: &TempDir, model: &Arc<ScriptedModel>) -> ResolutionTracker {
        let model: Arc<dyn LanguageModel> = model.clone();
        ResolutionTracker::with_model(temp_dir.path().join("data.json"), Some(model))
    }

    fn reply(text: &str) -> Result<String, CoachError> {
        Ok(text.to_string())
    }

    #[tokio::test]
    async fn test_coach_categorizes_and_routes_logs() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let model = ScriptedModel::new(vec![
            reply(r#"{"category": "fitness", "target": "3 runs a week", "priority": 2, "reasoning": "Health first"}"#),
            reply("Sure! ```json\n{\"category\": \"learning\", \"target\": \"12 books\", \"priority\": 4}\n```"),
            reply(r#"{"goal_id": 2, "parsed_update": "Read 30 pages", "value": 30, "unit": "pages", "sentiment": "positive"}"#),
            reply("  You're doing great, keep reading!  "),
            reply("Quick win: read ten pages before bed."),
        ]);
        let tracker = tracker_with(&temp_dir, &model);

        let run = add_goal(
            &tracker,
            AddGoalParams {
                title: "Run more".to_string(),
                no_ai: false,
            },
        )
        .await
        .unwrap();
        assert!(run.fallback.is_none());
        assert_eq!(run.goal.category, "fitness");
        assert_eq!(run.goal.target, "3 runs a week");
        assert_eq!(run.goal.priority, 2);
        assert_eq!(run.goal.emoji, icons::category_icon("fitness"));
        assert_eq!(run.analysis.map(|a| a.reasoning), Some("Health first".to_string()));

        let read = add_goal(
            &tracker,
            AddGoalParams {
                title: "Read 12 books".to_string(),
                no_ai: false,
            },
        )
        .await
        .unwrap();
        assert_eq!(read.goal.category, "learning");

        let logged = log_progress(
            &tracker,
            LogProgressParams {
                text: "read 30 pages tonight, loved it".to_string(),
                goal_id: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(logged.goal.id, read.goal.id);
        assert_eq!(logged.entry.raw_input, "read 30 pages tonight, loved it");
        assert_eq!(logged.entry.parsed_update, "Read 30 pages");
        assert_eq!(logged.entry.value, Some(30.0));
        assert_eq!(logged.entry.unit, "pages");
        assert_eq!(logged.entry.sentiment, Sentiment::Positive);

        let analysis = analyze_progress(
            &tracker,
            AnalyzeParams {
                goal_id: Some(read.goal.id),
                question: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(analysis.text, "You're doing great, keep reading!");
        assert_eq!(analysis.focus.map(|g| g.id), Some(read.goal.id));

        let reminder = check_in(&tracker).await.unwrap();
        assert_eq!(reminder.text, "Quick win: read ten pages before bed.");

        let prompts = model.prompts();
        assert_eq!(prompts.len(), 5);
        // The log prompt lists every goal so the model can pick one
        assert!(prompts[2].contains("Run more"));
        assert!(prompts[2].contains("Read 12 books"));
        // A focused analysis leaves the other goals out
        assert!(prompts[3].contains("Read 12 books"));
        assert!(!prompts[3].contains("Run more"));
    }

    #[tokio::test]
    async fn test_unreachable_api_falls_back_for_add_and_log() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let model = ScriptedModel::new(vec![
            Err(CoachError::Api {
                status: 529,
                message: "overloaded".to_string(),
            }),
            Err(CoachError::EmptyResponse),
        ]);
        let tracker = tracker_with(&temp_dir, &model);

        let added = add_goal(
            &tracker,
            AddGoalParams {
                title: "Meditate daily".to_string(),
                no_ai: false,
            },
        )
        .await
        .unwrap();
        let fallback = added.fallback.expect("should fall back");
        assert!(!fallback.not_configured);
        assert_eq!(added.goal.category, "general");
        assert_eq!(added.goal.priority, 3);

        let logged = log_progress(
            &tracker,
            LogProgressParams {
                text: "sat for 10 minutes".to_string(),
                goal_id: None,
            },
        )
        .await
        .unwrap();
        assert!(logged.fallback.is_some());
        assert_eq!(logged.goal.id, added.goal.id);
        assert_eq!(logged.entry.parsed_update, "sat for 10 minutes");
    }

    #[tokio::test]
    async fn test_unreadable_reply_uses_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let model = ScriptedModel::new(vec![reply("I think this is a fitness goal!")]);
        let tracker = tracker_with(&temp_dir, &model);

        let added = add_goal(
            &tracker,
            AddGoalParams {
                title: "Swim".to_string(),
                no_ai: false,
            },
        )
        .await
        .unwrap();

        // The model answered, so this is not a fallback, just defaults
        assert!(added.fallback.is_none());
        assert_eq!(added.goal.category, "general");
        assert_eq!(added.goal.priority, 3);
    }

    #[tokio::test]
    async fn test_analyze_surfaces_api_errors() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let model = ScriptedModel::new(vec![Err(CoachError::Api {
            status: 401,
            message: "invalid x-api-key".to_string(),
        })]);
        let tracker = tracker_with(&temp_dir, &model);
        tracker.storage().add_goal(NewGoal::titled("Run")).unwrap();

        let result = analyze_progress(&tracker, AnalyzeParams::default()).await;
        assert!(matches!(
            result,
            Err(TrackerError::Coach(CoachError::Api { status: 401, .. }))
        ));
    }
}
