//! Core types used throughout the domain layer
//!
//! This module defines the identifier newtypes and the Sentiment enum that
//! Goal, LogEntry and the metrics functions share.

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::icons;

/// Unique identifier for a goal
///
/// A wrapper around the store-assigned counter value so a goal id can't be
/// passed where a log id is expected. Serialized as a bare integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(pub u64);

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for GoalId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Unique identifier for a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogId(pub u64);

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the user felt about a progress update
///
/// Stored lowercase in the data file. Text coming back from the language
/// model goes through [`Sentiment::parse_lenient`] instead of serde so an
/// unexpected label never breaks a log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Things went well
    Positive,
    /// Plain progress report
    #[default]
    Neutral,
    /// The user is having a hard time
    Struggling,
}

impl Sentiment {
    /// Parse a sentiment label, falling back to Neutral for anything unknown
    pub fn parse_lenient(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "positive" => Sentiment::Positive,
            "struggling" | "negative" => Sentiment::Struggling,
            _ => Sentiment::Neutral,
        }
    }

    /// Lowercase label, as stored on disk
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Struggling => "struggling",
        }
    }

    /// Glyph shown next to a log entry
    pub fn icon(&self) -> &'static str {
        match self {
            Sentiment::Positive => icons::CHECK,
            Sentiment::Neutral => icons::NOTE,
            Sentiment::Struggling => icons::ZAP,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
