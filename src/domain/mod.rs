//! Domain module containing core business logic and data types
//!
//! This module defines the core entities (Goal, LogEntry, Config), their
//! validation rules and the pure metric functions derived from them.

pub mod goal;
pub mod entry;
pub mod config;
pub mod metrics;
pub mod types;

// Re-export public types for easy access
pub use goal::*;
pub use entry::*;
pub use config::*;
pub use metrics::GoalMetrics;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid goal title: {0}")]
    InvalidTitle(String),

    #[error("Priority must be between 1 and 10, got {0}")]
    InvalidPriority(u8),

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },
}
