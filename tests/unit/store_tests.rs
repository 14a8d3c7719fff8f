/// Store behavior through the public `ResolutionStorage` interface
use resolution_tracker::*;
use std::fs;
use tempfile::TempDir;

#[cfg(test)]
mod store_tests {
    use super::*;

    fn storage_in(dir: &TempDir) -> JsonStorage {
        JsonStorage::new(dir.path().join("data.json"))
    }

    #[test]
    fn test_ids_keep_increasing_after_removal() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage = storage_in(&temp_dir);

        let first = storage.add_goal(NewGoal::titled("Run")).expect("Failed to add goal");
        let second = storage.add_goal(NewGoal::titled("Read")).expect("Failed to add goal");
        assert!(storage.remove_goal(second.id).expect("Failed to remove goal"));

        let third = storage.add_goal(NewGoal::titled("Write")).expect("Failed to add goal");
        assert_eq!(first.id, GoalId(1));
        assert_eq!(third.id, GoalId(3));
    }

    #[test]
    fn test_removing_goal_removes_its_logs_only() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage = storage_in(&temp_dir);

        let run = storage.add_goal(NewGoal::titled("Run")).unwrap();
        let read = storage.add_goal(NewGoal::titled("Read")).unwrap();
        storage.add_log(NewLogEntry::plain(run.id, "ran 5k")).unwrap();
        storage.add_log(NewLogEntry::plain(read.id, "read 20 pages")).unwrap();
        storage.add_log(NewLogEntry::plain(run.id, "ran 3k")).unwrap();

        assert!(storage.remove_goal(run.id).unwrap());
        assert!(!storage.remove_goal(run.id).unwrap());

        let logs = storage.logs(None).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].goal_id, read.id);
    }

    #[test]
    fn test_log_for_unknown_goal_changes_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage = storage_in(&temp_dir);
        let goal = storage.add_goal(NewGoal::titled("Run")).unwrap();

        let before = storage.load().unwrap();
        let entry = storage.add_log(NewLogEntry::plain(GoalId(99), "ran")).unwrap();
        assert!(entry.is_none());
        assert_eq!(storage.load().unwrap(), before);

        // The counter was not consumed by the failed attempt
        let entry = storage.add_log(NewLogEntry::plain(goal.id, "ran")).unwrap().unwrap();
        assert_eq!(entry.id, LogId(1));
    }

    #[test]
    fn test_two_stores_see_each_others_writes() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let writer = storage_in(&temp_dir);
        let reader = storage_in(&temp_dir);

        writer.add_goal(NewGoal::titled("Run")).unwrap();
        assert_eq!(reader.goals().unwrap().len(), 1);

        writer.add_goal(NewGoal::titled("Read a lot more books")).unwrap();
        let goals = reader.goals().unwrap();
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[1].title, "Read a lot more books");
    }

    #[test]
    fn test_data_survives_a_new_store() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        {
            let storage = storage_in(&temp_dir);
            let goal = storage
                .add_goal(NewGoal {
                    category: Some("fitness".to_string()),
                    target: Some("Run 3x/week".to_string()),
                    priority: Some(2),
                    ..NewGoal::titled("Get fit")
                })
                .unwrap();
            storage
                .add_log(NewLogEntry {
                    value: Some(5.0),
                    unit: Some("km".to_string()),
                    sentiment: Some(Sentiment::Positive),
                    ..NewLogEntry::plain(goal.id, "ran 5k")
                })
                .unwrap();
        }

        let storage = storage_in(&temp_dir);
        let goal = storage.goal(GoalId(1)).unwrap().expect("goal should persist");
        assert_eq!(goal.category, "fitness");
        assert_eq!(goal.target, "Run 3x/week");
        assert_eq!(goal.priority, 2);

        let logs = storage.logs(Some(goal.id)).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].value, Some(5.0));
        assert_eq!(logs[0].unit, "km");
        assert_eq!(logs[0].sentiment, Sentiment::Positive);
        assert_eq!(logs[0].parsed_update, "ran 5k");
    }

    #[test]
    fn test_empty_file_is_fresh_document() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage = storage_in(&temp_dir);
        fs::write(storage.path(), "").unwrap();

        assert_eq!(storage.load().unwrap(), Document::default());
        let goal = storage.add_goal(NewGoal::titled("Start fresh")).unwrap();
        assert_eq!(goal.id, GoalId(1));
    }

    #[test]
    fn test_file_uses_snake_case_fields() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage = storage_in(&temp_dir);
        let goal = storage.add_goal(NewGoal::titled("Run")).unwrap();
        storage.add_log(NewLogEntry::plain(goal.id, "ran")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(storage.path()).unwrap()).unwrap();
        assert_eq!(raw["next_goal_id"], 2);
        assert_eq!(raw["next_log_id"], 2);
        assert_eq!(raw["logs"][0]["goal_id"], 1);
        assert_eq!(raw["logs"][0]["raw_input"], "ran");
        assert_eq!(raw["logs"][0]["sentiment"], "neutral");
        assert_eq!(raw["config"]["preferred_time"], "09:00");
    }

    #[test]
    fn test_save_then_load_round_trips_document() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage = storage_in(&temp_dir);

        let mut document = Document::default();
        let goal = document.add_goal(NewGoal::titled("Meditate")).unwrap();
        document.add_log(NewLogEntry::plain(goal.id, "10 minutes")).unwrap();
        storage.save(&document).unwrap();

        assert_eq!(storage.load().unwrap(), document);
    }

    #[test]
    fn test_zero_counters_and_empty_fields_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage = storage_in(&temp_dir);

        let mut document = Document::default();
        let goal = document.add_goal(NewGoal::titled("Stretch")).unwrap();
        let entry = document
            .add_log(NewLogEntry::plain(goal.id, "stretched"))
            .unwrap()
            .unwrap();
        assert_eq!(entry.value, None);
        assert_eq!(entry.unit, "");
        document.next_goal_id = 0;
        document.next_log_id = 0;

        storage.save(&document).unwrap();
        let loaded = storage.load().unwrap();
        assert_eq!(loaded, document);
        storage.save(&loaded).unwrap();
        assert_eq!(storage.load().unwrap(), document);

        // A zeroed counter never hands out an id that is already taken
        let next = storage.add_goal(NewGoal::titled("Walk")).unwrap();
        assert_eq!(next.id, GoalId(2));
        let log = storage.add_log(NewLogEntry::plain(next.id, "walked")).unwrap().unwrap();
        assert_eq!(log.id, LogId(2));
    }
}
