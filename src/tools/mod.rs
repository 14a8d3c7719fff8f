//! Commands for resolution management
//!
//! One function per user-facing command. Each takes the tracker and a
//! parameters struct and returns a response struct; none of them print.
//! The CLI and the dashboard both call into this module.

pub mod create;
pub mod log;
pub mod status;
pub mod list;
pub mod insights;
pub mod update;
pub mod remove;
pub mod history;
pub mod config;

// Re-export tool functions for easy access
pub use create::*;
pub use log::*;
pub use status::*;
pub use list::*;
pub use insights::*;
pub use update::*;
pub use remove::*;
pub use history::*;
pub use config::*;

use serde::Serialize;
use crate::domain::{Goal, GoalId};
use crate::storage::ResolutionStorage;
use crate::{ResolutionTracker, TrackerError};

/// Why a command went ahead without AI help
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AiFallback {
    /// The model is not configured at all, rather than unreachable
    pub not_configured: bool,
    pub reason: String,
}

impl AiFallback {
    fn from_error(error: &TrackerError) -> Self {
        let not_configured = matches!(error, TrackerError::Coach(e) if e.is_configuration());
        tracing::warn!("Continuing without AI: {}", error);
        Self {
            not_configured,
            reason: error.to_string(),
        }
    }
}

/// Look up a goal, turning a miss into [`TrackerError::GoalNotFound`]
pub fn find_goal(tracker: &ResolutionTracker, goal_id: GoalId) -> Result<Goal, TrackerError> {
    tracker
        .storage()
        .goal(goal_id)?
        .ok_or(TrackerError::GoalNotFound(goal_id))
}
