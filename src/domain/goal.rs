//! Goal entity and related functionality
//!
//! This module defines the Goal struct that represents a resolution the user
//! is tracking, the NewGoal input used to create one and the GoalPatch used
//! to edit one in place.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{DomainError, GoalId};

/// Lowest (most important) allowed priority
pub const MIN_PRIORITY: u8 = 1;
/// Highest (least important) allowed priority
pub const MAX_PRIORITY: u8 = 10;
/// Priority given to goals when nothing better is known
pub const DEFAULT_PRIORITY: u8 = 3;
/// Category given to goals when nothing better is known
pub const DEFAULT_CATEGORY: &str = "general";

const MAX_TITLE_LEN: usize = 200;

/// A resolution the user wants to make progress on
///
/// Goals are created by the store, which assigns the id. Everything except
/// `id` and `created_at` can later be replaced through a [`GoalPatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Store-assigned identifier, never reused
    pub id: GoalId,
    /// Display title (e.g., "Run 3x/week")
    pub title: String,
    /// Free-form tag such as "fitness" or "learning"
    #[serde(default = "default_category")]
    pub category: String,
    /// Free-form description of the measurable aim ("12 books", "daily")
    #[serde(default)]
    pub target: String,
    /// When this goal was created
    pub created_at: DateTime<Utc>,
    /// 1 is most important, 10 least
    #[serde(default = "default_priority")]
    pub priority: u8,
    /// Short display glyph
    #[serde(default)]
    pub emoji: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_priority() -> u8 {
    DEFAULT_PRIORITY
}

/// Input for creating a goal
///
/// Optional fields fall back to the goal defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewGoal {
    pub title: String,
    pub category: Option<String>,
    pub target: Option<String>,
    pub priority: Option<u8>,
    pub emoji: Option<String>,
}

impl NewGoal {
    /// A goal with only a title, everything else defaulted
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update for a goal
///
/// Each `None` field leaves the current value unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub target: Option<String>,
    pub priority: Option<u8>,
    pub emoji: Option<String>,
}

impl GoalPatch {
    /// True when the patch would not change anything
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.target.is_none()
            && self.priority.is_none()
            && self.emoji.is_none()
    }
}

impl Goal {
    /// Create a goal with validation
    ///
    /// The id comes from the store; `created_at` is set to now.
    pub fn new(id: GoalId, input: NewGoal) -> Result<Self, DomainError> {
        let title = Self::validate_title(&input.title)?;
        let priority = input.priority.unwrap_or(DEFAULT_PRIORITY);
        Self::validate_priority(priority)?;

        let category = input
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(default_category);

        Ok(Self {
            id,
            title,
            category,
            target: input.target.unwrap_or_default().trim().to_string(),
            created_at: Utc::now(),
            priority,
            emoji: input.emoji.unwrap_or_default(),
        })
    }

    /// Apply a patch with validation
    ///
    /// Either every supplied field is applied or, on a validation error,
    /// none of them are.
    pub fn apply(&mut self, patch: GoalPatch) -> Result<(), DomainError> {
        // Validate new values before applying them
        let title = match patch.title {
            Some(ref title) => Some(Self::validate_title(title)?),
            None => None,
        };
        if let Some(priority) = patch.priority {
            Self::validate_priority(priority)?;
        }

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(category) = patch.category {
            let category = category.trim();
            self.category = if category.is_empty() {
                default_category()
            } else {
                category.to_string()
            };
        }
        if let Some(target) = patch.target {
            self.target = target.trim().to_string();
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(emoji) = patch.emoji {
            self.emoji = emoji;
        }

        Ok(())
    }

    /// Title prefixed with the goal's glyph, if it has one
    pub fn display_title(&self) -> String {
        if self.emoji.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.emoji, self.title)
        }
    }

    /// Target text, or a placeholder when none is set
    pub fn target_display(&self) -> &str {
        if self.target.is_empty() {
            "not set"
        } else {
            &self.target
        }
    }

    // Validation helper methods

    /// Trim a title and check it is non-empty and not too long
    pub fn validate_title(title: &str) -> Result<String, DomainError> {
        let trimmed = title.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidTitle(
                "Goal title cannot be empty".to_string()
            ));
        }

        if trimmed.chars().count() > MAX_TITLE_LEN {
            return Err(DomainError::InvalidTitle(format!(
                "Goal title cannot be longer than {} characters",
                MAX_TITLE_LEN
            )));
        }

        Ok(trimmed.to_string())
    }

    /// Validate that a priority is in the canonical 1-10 range
    pub fn validate_priority(priority: u8) -> Result<(), DomainError> {
        if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
            return Err(DomainError::InvalidPriority(priority));
        }
        Ok(())
    }
}
