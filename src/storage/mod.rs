//! Storage layer for persisting goals, logs and preferences
//!
//! The whole state lives in one [`Document`] that is read and written in full.
//! [`JsonStorage`] keeps that document in a JSON file; the [`ResolutionStorage`]
//! trait is the interface the rest of the crate programs against.

pub mod cache;
pub mod json;

// Re-export the main storage types
pub use json::*;

use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::domain::{
    Config, ConfigPatch, DomainError, Goal, GoalId, GoalPatch, LogEntry, LogId, NewGoal,
    NewLogEntry,
};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data file {path} is not valid: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// Trait defining the storage interface for resolutions
///
/// Lookups that can miss return `Option`/`bool` instead of an error so the
/// caller decides what a missing goal means.
pub trait ResolutionStorage {
    /// Read the full document; an absent file yields a fresh one
    fn load(&self) -> Result<Document, StorageError>;

    /// Replace the stored document
    fn save(&self, document: &Document) -> Result<(), StorageError>;

    /// Create a goal and assign it the next id
    fn add_goal(&self, input: NewGoal) -> Result<Goal, StorageError>;

    /// All goals in insertion order
    fn goals(&self) -> Result<Vec<Goal>, StorageError>;

    /// Get a goal by id
    fn goal(&self, id: GoalId) -> Result<Option<Goal>, StorageError>;

    /// Apply a patch to a goal, returning the updated goal
    fn update_goal(&self, id: GoalId, patch: GoalPatch) -> Result<Option<Goal>, StorageError>;

    /// Remove a goal together with its logs
    fn remove_goal(&self, id: GoalId) -> Result<bool, StorageError>;

    /// Append a log entry; `None` when the goal does not exist
    fn add_log(&self, input: NewLogEntry) -> Result<Option<LogEntry>, StorageError>;

    /// Logs in insertion order, optionally for one goal
    fn logs(&self, goal_id: Option<GoalId>) -> Result<Vec<LogEntry>, StorageError>;

    /// Current preferences
    fn config(&self) -> Result<Config, StorageError>;

    /// Update preferences, returning the result
    fn update_config(&self, patch: ConfigPatch) -> Result<Config, StorageError>;
}

/// The root of the persisted state
///
/// Missing top-level fields take their defaults so older or hand-edited
/// files still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
    #[serde(default)]
    pub config: Config,
    #[serde(default = "first_id")]
    pub next_goal_id: u64,
    #[serde(default = "first_id")]
    pub next_log_id: u64,
}

fn first_id() -> u64 {
    1
}

impl Default for Document {
    fn default() -> Self {
        Self {
            goals: Vec::new(),
            logs: Vec::new(),
            config: Config::default(),
            next_goal_id: first_id(),
            next_log_id: first_id(),
        }
    }
}

impl Document {
    /// Validate and append a goal, advancing the goal counter
    pub fn add_goal(&mut self, input: NewGoal) -> Result<Goal, DomainError> {
        let id = self.free_goal_id();
        let goal = Goal::new(GoalId(id), input)?;
        self.next_goal_id = id + 1;
        self.goals.push(goal.clone());
        Ok(goal)
    }

    pub fn goal(&self, id: GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    /// Patch a goal in place; `Ok(None)` when no such goal exists
    pub fn update_goal(&mut self, id: GoalId, patch: GoalPatch) -> Result<Option<Goal>, DomainError> {
        match self.goals.iter_mut().find(|g| g.id == id) {
            Some(goal) => {
                goal.apply(patch)?;
                Ok(Some(goal.clone()))
            }
            None => Ok(None),
        }
    }

    /// Drop a goal and every log that references it
    pub fn remove_goal(&mut self, id: GoalId) -> bool {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != id);
        if self.goals.len() == before {
            return false;
        }
        self.logs.retain(|l| l.goal_id != id);
        true
    }

    /// Append a log for an existing goal, advancing the log counter
    ///
    /// The counter is only touched when the goal exists.
    pub fn add_log(&mut self, input: NewLogEntry) -> Result<Option<LogEntry>, DomainError> {
        if self.goal(input.goal_id).is_none() {
            return Ok(None);
        }
        let id = self.free_log_id();
        let entry = LogEntry::new(LogId(id), input)?;
        self.next_log_id = id + 1;
        self.logs.push(entry.clone());
        Ok(Some(entry))
    }

    /// The counter, raised past 0 and past any id already in the file
    fn free_goal_id(&self) -> u64 {
        let taken = self.goals.iter().map(|g| g.id.0).max().unwrap_or(0);
        self.next_goal_id.max(taken + 1)
    }

    fn free_log_id(&self) -> u64 {
        let taken = self.logs.iter().map(|l| l.id.0).max().unwrap_or(0);
        self.next_log_id.max(taken + 1)
    }

    pub fn logs_for(&self, goal_id: Option<GoalId>) -> Vec<LogEntry> {
        self.logs
            .iter()
            .filter(|l| goal_id.map_or(true, |id| l.goal_id == id))
            .cloned()
            .collect()
    }
}
