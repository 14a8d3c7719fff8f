//! AI coach: goal analysis, log matching and coaching prose
//!
//! The [`Coach`] talks to any [`LanguageModel`]; production code uses the
//! [`AnthropicClient`]. Replies that should be JSON are parsed leniently and
//! fall back to sensible defaults, so a confused model never turns into an
//! error for the caller. Only configuration and transport problems do.

pub mod client;
pub mod extract;
pub mod prompts;

pub use client::AnthropicClient;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::{
    Goal, GoalId, LogEntry, NewGoal, NewLogEntry, Personality, Sentiment, DEFAULT_CATEGORY,
    DEFAULT_PRIORITY, MAX_PRIORITY, MIN_PRIORITY,
};
use crate::icons;
use extract::extract_json_object;

/// Logs included as context for progress analysis
const COACHING_LOG_LIMIT: usize = 20;
/// Logs included as context for a check-in reminder
const REMINDER_LOG_LIMIT: usize = 10;

pub const NO_GOALS_ANALYSIS: &str = "No resolutions yet! Add some with `res add \"Your goal here\"`";
pub const NO_GOALS_REMINDER: &str =
    "You haven't set any resolutions yet. Start with `res add \"Your goal\"`!";

/// Errors that can occur while talking to the language model
#[derive(Error, Debug)]
pub enum CoachError {
    #[error("ANTHROPIC_API_KEY environment variable not set. Export it in your shell to enable AI features.")]
    MissingApiKey,

    #[error("Could not reach the language model: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Language model API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Language model returned an empty response")]
    EmptyResponse,
}

impl CoachError {
    /// True when the coach is not set up, as opposed to failing at runtime
    pub fn is_configuration(&self) -> bool {
        matches!(self, CoachError::MissingApiKey)
    }
}

/// Anything that can turn a system prompt and a user prompt into text
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, CoachError>;
}

/// Structured reading of a new goal's title
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalAnalysis {
    pub category: String,
    pub target: String,
    pub priority: u8,
    pub icon: String,
    pub reasoning: String,
}

impl GoalAnalysis {
    /// Defaults used when the model's reply can't be read
    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            target: String::new(),
            priority: DEFAULT_PRIORITY,
            icon: icons::category_icon(DEFAULT_CATEGORY).to_string(),
            reasoning: reason.into(),
        }
    }

    fn from_json(data: &Map<String, Value>) -> Self {
        let category = string_field(data, "category")
            .map(|c| c.to_lowercase())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        Self {
            icon: icons::category_icon(&category).to_string(),
            target: string_field(data, "target").unwrap_or_default(),
            priority: data
                .get("priority")
                .and_then(number_value)
                .filter(|p| p.is_finite())
                .map(clamp_priority)
                .unwrap_or(DEFAULT_PRIORITY),
            reasoning: string_field(data, "reasoning").unwrap_or_default(),
            category,
        }
    }

    /// Goal input for `title` carrying this analysis
    pub fn into_new_goal(self, title: impl Into<String>) -> NewGoal {
        NewGoal {
            title: title.into(),
            category: Some(self.category),
            target: Some(self.target),
            priority: Some(self.priority),
            emoji: Some(self.icon),
        }
    }
}

/// Structured reading of a progress update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogAnalysis {
    /// Matched goal; `None` only when there were no goals to match
    pub goal_id: Option<GoalId>,
    pub parsed_update: String,
    pub value: Option<f64>,
    pub unit: String,
    pub sentiment: Sentiment,
}

impl LogAnalysis {
    fn unmatched(raw_input: &str, goal_id: Option<GoalId>) -> Self {
        Self {
            goal_id,
            parsed_update: raw_input.to_string(),
            value: None,
            unit: String::new(),
            sentiment: Sentiment::Neutral,
        }
    }

    fn from_json(data: &Map<String, Value>, raw_input: &str, goals: &[Goal]) -> Self {
        let first = goals.first().map(|g| g.id);
        // Unknown ids fall back to the first goal
        let goal_id = data
            .get("goal_id")
            .and_then(number_value)
            .filter(|id| id.fract() == 0.0 && *id > 0.0)
            .map(|id| GoalId(id as u64))
            .filter(|id| goals.iter().any(|g| g.id == *id))
            .or(first);

        Self {
            goal_id,
            parsed_update: string_field(data, "parsed_update")
                .unwrap_or_else(|| raw_input.to_string()),
            value: data.get("value").and_then(number_value).filter(|v| v.is_finite()),
            unit: string_field(data, "unit").unwrap_or_default(),
            sentiment: string_field(data, "sentiment")
                .map(|s| Sentiment::parse_lenient(&s))
                .unwrap_or_default(),
        }
    }

    /// Log input attributed to `goal_id`
    pub fn into_new_log(self, raw_input: impl Into<String>, goal_id: GoalId) -> NewLogEntry {
        NewLogEntry {
            goal_id,
            raw_input: raw_input.into(),
            parsed_update: Some(self.parsed_update),
            value: self.value,
            unit: Some(self.unit),
            sentiment: Some(self.sentiment),
        }
    }
}

fn string_field(data: &Map<String, Value>, key: &str) -> Option<String> {
    data.get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Read a number that may have been sent as a string
fn number_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn clamp_priority(raw: f64) -> u8 {
    raw.round().clamp(MIN_PRIORITY as f64, MAX_PRIORITY as f64) as u8
}

/// Newest logs first, at most `limit`
fn latest<'a>(logs: impl IntoIterator<Item = &'a LogEntry>, limit: usize) -> Vec<&'a LogEntry> {
    let mut logs: Vec<&LogEntry> = logs.into_iter().collect();
    logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    logs.truncate(limit);
    logs
}

/// The AI coach
#[derive(Clone)]
pub struct Coach {
    model: Arc<dyn LanguageModel>,
    personality: Personality,
}

impl Coach {
    pub fn new(model: Arc<dyn LanguageModel>, personality: Personality) -> Self {
        Self { model, personality }
    }

    fn system(&self, base: &str) -> String {
        format!("{} {}", base, self.personality.instruction())
    }

    /// Suggest category, target and priority for a new goal
    pub async fn analyze_goal(&self, title: &str) -> Result<GoalAnalysis, CoachError> {
        let reply = self
            .model
            .complete(&self.system(prompts::ASSISTANT_SYSTEM), &prompts::analyze_goal(title))
            .await?;

        Ok(match extract_json_object(&reply) {
            Some(data) => GoalAnalysis::from_json(&data),
            None => {
                tracing::warn!("Goal analysis reply had no JSON object, using defaults");
                GoalAnalysis::fallback("Could not analyze goal: no JSON object in the reply")
            }
        })
    }

    /// Match a free-text update to one of `goals` and extract its details
    ///
    /// No model call is made when there are no goals.
    pub async fn analyze_log(&self, raw_input: &str, goals: &[Goal]) -> Result<LogAnalysis, CoachError> {
        let Some(first) = goals.first() else {
            return Ok(LogAnalysis::unmatched(raw_input, None));
        };

        let reply = self
            .model
            .complete(
                &self.system(prompts::ASSISTANT_SYSTEM),
                &prompts::analyze_log(raw_input, goals),
            )
            .await?;

        Ok(match extract_json_object(&reply) {
            Some(data) => LogAnalysis::from_json(&data, raw_input, goals),
            None => {
                tracing::warn!("Log analysis reply had no JSON object, using first goal");
                LogAnalysis::unmatched(raw_input, Some(first.id))
            }
        })
    }

    /// Progress analysis, optionally scoped to one goal or answering a question
    pub async fn coaching(
        &self,
        goals: &[Goal],
        logs: &[LogEntry],
        focus: Option<GoalId>,
        question: Option<&str>,
    ) -> Result<String, CoachError> {
        if goals.is_empty() {
            return Ok(NO_GOALS_ANALYSIS.to_string());
        }

        let in_focus = |id: GoalId| focus.map_or(true, |f| f == id);
        let goals: Vec<&Goal> = goals.iter().filter(|g| in_focus(g.id)).collect();
        let recent = latest(logs.iter().filter(|l| in_focus(l.goal_id)), COACHING_LOG_LIMIT);

        let reply = self
            .model
            .complete(
                &self.system(prompts::COACH_SYSTEM),
                &prompts::coaching(&goals, &recent, question),
            )
            .await?;
        Ok(reply.trim().to_string())
    }

    /// A short personalised check-in
    pub async fn reminder(&self, goals: &[Goal], logs: &[LogEntry]) -> Result<String, CoachError> {
        if goals.is_empty() {
            return Ok(NO_GOALS_REMINDER.to_string());
        }

        let recent = latest(logs, REMINDER_LOG_LIMIT);
        let reply = self
            .model
            .complete(
                &self.system(prompts::REMINDER_SYSTEM),
                &prompts::reminder(goals, &recent),
            )
            .await?;
        Ok(reply.trim().to_string())
    }
}
