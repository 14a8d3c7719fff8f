//! User preferences stored alongside goals and logs

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::domain::DomainError;

/// How often the user wants to be nudged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderFrequency {
    #[default]
    Daily,
    Weekly,
    Adaptive,
}

/// Tone the coach should take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    Encouraging,
    Analytical,
    #[default]
    Balanced,
}

impl Personality {
    /// Extra instruction appended to the coach's system prompt
    pub fn instruction(&self) -> &'static str {
        match self {
            Personality::Encouraging => "Lean warm and upbeat; celebrate small wins.",
            Personality::Analytical => "Lean factual; point at numbers and patterns.",
            Personality::Balanced => "Balance encouragement with honest observations.",
        }
    }
}

/// Display and reminder preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub reminder_frequency: ReminderFrequency,
    /// 24-hour `HH:MM`
    pub preferred_time: String,
    pub ai_personality: Personality,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reminder_frequency: ReminderFrequency::Daily,
            preferred_time: "09:00".to_string(),
            ai_personality: Personality::Balanced,
        }
    }
}

/// Partial update for [`Config`]; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPatch {
    pub reminder_frequency: Option<ReminderFrequency>,
    pub preferred_time: Option<String>,
    pub ai_personality: Option<Personality>,
}

impl ConfigPatch {
    pub fn is_empty(&self) -> bool {
        self.reminder_frequency.is_none()
            && self.preferred_time.is_none()
            && self.ai_personality.is_none()
    }
}

impl Config {
    /// Apply a patch, rejecting a malformed preferred time
    pub fn apply(&mut self, patch: ConfigPatch) -> Result<(), DomainError> {
        if let Some(ref time) = patch.preferred_time {
            chrono::NaiveTime::parse_from_str(time.trim(), "%H:%M").map_err(|_| {
                DomainError::Validation {
                    message: format!("Preferred time must be HH:MM, got '{}'", time),
                }
            })?;
        }

        if let Some(frequency) = patch.reminder_frequency {
            self.reminder_frequency = frequency;
        }
        if let Some(time) = patch.preferred_time {
            self.preferred_time = time.trim().to_string();
        }
        if let Some(personality) = patch.ai_personality {
            self.ai_personality = personality;
        }
        Ok(())
    }
}

impl FromStr for ReminderFrequency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(ReminderFrequency::Daily),
            "weekly" => Ok(ReminderFrequency::Weekly),
            "adaptive" => Ok(ReminderFrequency::Adaptive),
            other => Err(DomainError::Validation {
                message: format!(
                    "Invalid reminder frequency '{}'. Valid options: daily, weekly, adaptive",
                    other
                ),
            }),
        }
    }
}

impl FromStr for Personality {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "encouraging" => Ok(Personality::Encouraging),
            "analytical" => Ok(Personality::Analytical),
            "balanced" => Ok(Personality::Balanced),
            other => Err(DomainError::Validation {
                message: format!(
                    "Invalid personality '{}'. Valid options: encouraging, analytical, balanced",
                    other
                ),
            }),
        }
    }
}

impl fmt::Display for ReminderFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReminderFrequency::Daily => "daily",
            ReminderFrequency::Weekly => "weekly",
            ReminderFrequency::Adaptive => "adaptive",
        })
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Personality::Encouraging => "encouraging",
            Personality::Analytical => "analytical",
            Personality::Balanced => "balanced",
        })
    }
}
