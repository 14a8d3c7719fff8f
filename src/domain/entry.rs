//! LogEntry entity for tracking progress updates
//!
//! This module defines the LogEntry struct that represents a single progress
//! update attributed to one goal, along with the NewLogEntry input.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Local, NaiveDate, Utc};
use crate::domain::{DomainError, GoalId, LogId, Sentiment};

/// A progress update for a goal
///
/// Entries are immutable once written and are only ever removed together
/// with the goal they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Store-assigned identifier, never reused
    pub id: LogId,
    /// Which goal this update is for
    pub goal_id: GoalId,
    /// What the user typed, verbatim
    pub raw_input: String,
    /// Cleaned-up summary of what was done
    #[serde(default)]
    pub parsed_update: String,
    /// Numeric measurement, if the update mentioned one
    #[serde(default)]
    pub value: Option<f64>,
    /// Unit for `value` ("miles", "pages"), empty when not applicable
    #[serde(default)]
    pub unit: String,
    /// When this update was logged
    pub timestamp: DateTime<Utc>,
    /// Tone of the update
    #[serde(default)]
    pub sentiment: Sentiment,
}

/// Input for logging progress
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewLogEntry {
    pub goal_id: GoalId,
    pub raw_input: String,
    /// Defaults to `raw_input` when absent or blank
    pub parsed_update: Option<String>,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub sentiment: Option<Sentiment>,
}

impl NewLogEntry {
    /// A plain update: the text is both raw input and summary
    pub fn plain(goal_id: GoalId, raw_input: impl Into<String>) -> Self {
        Self {
            goal_id,
            raw_input: raw_input.into(),
            ..Self::default()
        }
    }
}

impl LogEntry {
    /// Create a log entry with validation, timestamped now
    pub fn new(id: LogId, input: NewLogEntry) -> Result<Self, DomainError> {
        Self::new_at(id, input, Utc::now())
    }

    /// Create a log entry with an explicit timestamp
    ///
    /// Used by demo seeding and tests that need entries on specific days.
    pub fn new_at(
        id: LogId,
        input: NewLogEntry,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let raw_input = input.raw_input;
        if raw_input.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Progress update cannot be empty".to_string(),
            });
        }
        Self::validate_value(input.value)?;

        let parsed_update = input
            .parsed_update
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| raw_input.trim().to_string());

        Ok(Self {
            id,
            goal_id: input.goal_id,
            raw_input,
            parsed_update,
            value: input.value,
            unit: input.unit.unwrap_or_default().trim().to_string(),
            timestamp,
            sentiment: input.sentiment.unwrap_or_default(),
        })
    }

    /// Calendar day this entry falls on, in the local time zone
    pub fn local_date(&self) -> NaiveDate {
        self.timestamp.with_timezone(&Local).date_naive()
    }

    /// Summary text, falling back to the raw input for old entries
    pub fn summary(&self) -> &str {
        if self.parsed_update.is_empty() {
            &self.raw_input
        } else {
            &self.parsed_update
        }
    }

    /// Contribution to the activity series: the value, or 1 per entry
    pub fn activity_weight(&self) -> f64 {
        self.value.unwrap_or(1.0)
    }

    fn validate_value(value: Option<f64>) -> Result<(), DomainError> {
        if let Some(v) = value {
            if !v.is_finite() {
                return Err(DomainError::InvalidValue {
                    message: "Value must be a finite number".to_string(),
                });
            }
        }
        Ok(())
    }
}
