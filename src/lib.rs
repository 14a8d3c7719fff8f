//! Public library interface for the resolution tracker
//!
//! This module exports the tracker that owns the store, the analytics engine
//! and the optional language model, plus the public types the `res` binary
//! and the tests build on.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

// Internal modules
pub mod domain;
pub mod storage;
pub mod analytics;
pub mod coach;
pub mod tools;
pub mod cli;
pub mod dashboard;
pub mod icons;
pub mod render;

// Re-export public modules and types
pub use domain::*;
pub use storage::{Document, JsonStorage, ResolutionStorage, StorageError};
pub use analytics::{AnalyticsEngine, DashboardStats, GoalProgress, SentimentCounts};
pub use coach::{AnthropicClient, Coach, CoachError, GoalAnalysis, LanguageModel, LogAnalysis};

/// Errors that can occur while running a tracker command
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    Storage(#[from] storage::StorageError),

    #[error(transparent)]
    Coach(#[from] coach::CoachError),

    #[error("Validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Goal {0} not found!")]
    GoalNotFound(GoalId),

    #[error("No resolutions to log against! Add one first with: res add \"Your goal\"")]
    NoGoals,
}

/// The resolution tracker
///
/// One explicit instance per process. It owns the JSON store (and with it
/// the document cache), the analytics engine, and the language model used
/// by the coach, if one was configured.
pub struct ResolutionTracker {
    storage: JsonStorage,
    analytics: AnalyticsEngine,
    model: Option<Arc<dyn LanguageModel>>,
}

impl ResolutionTracker {
    /// Create a tracker for the data file at `data_path`
    ///
    /// The Anthropic client is built from the environment. A missing key is
    /// not an error here; AI commands report it when they need the model.
    pub fn new(data_path: PathBuf) -> Self {
        tracing::info!("Initializing resolution tracker with data file: {:?}", data_path);

        let model: Option<Arc<dyn LanguageModel>> = match AnthropicClient::from_env() {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                tracing::info!("AI features disabled: {}", e);
                None
            }
        };

        Self {
            storage: JsonStorage::new(data_path),
            analytics: AnalyticsEngine::new(),
            model,
        }
    }

    /// Create a tracker with an explicit model, or none to disable AI
    pub fn with_model(data_path: PathBuf, model: Option<Arc<dyn LanguageModel>>) -> Self {
        Self {
            storage: JsonStorage::new(data_path),
            analytics: AnalyticsEngine::new(),
            model,
        }
    }

    /// The coach, using the personality from the stored preferences
    pub fn coach(&self) -> Result<Coach, TrackerError> {
        let model = self.model.clone().ok_or(CoachError::MissingApiKey)?;
        let personality = self.storage.config()?.ai_personality;
        Ok(Coach::new(model, personality))
    }

    /// True when a language model is configured
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Get a reference to the storage layer
    pub fn storage(&self) -> &JsonStorage {
        &self.storage
    }

    /// Get a reference to the analytics engine
    pub fn analytics(&self) -> &AnalyticsEngine {
        &self.analytics
    }
}
