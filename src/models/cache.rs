//! Process-lifetime cache of the loaded artifacts

use crate::config::ModelsConfig;
use crate::error::{RecommendError, RecommendResult};
use crate::models::inference::RecommendationEngine;
use crate::types::{Recommendation, SoilReading};
use std::sync::{Arc, OnceLock};
use tracing::error;

/// Outcome of the one-time artifact load
#[derive(Clone)]
pub enum ModelState {
    /// Artifacts loaded; predictions are served
    Ready(Arc<RecommendationEngine>),
    /// Artifacts unavailable; every prediction is refused with `reason`
    Disabled { reason: String },
}

impl ModelState {
    /// Load the artifacts, converting any failure into the disabled state.
    pub fn load(config: &ModelsConfig) -> Self {
        match RecommendationEngine::from_config(config) {
            Ok(engine) => ModelState::Ready(Arc::new(engine)),
            Err(e) => {
                error!(error = %e, "Prediction disabled");
                ModelState::Disabled {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ModelState::Ready(_))
    }

    /// Engine, or the error explaining why prediction is disabled.
    pub fn engine(&self) -> RecommendResult<&Arc<RecommendationEngine>> {
        match self {
            ModelState::Ready(engine) => Ok(engine),
            ModelState::Disabled { reason } => Err(RecommendError::Unavailable(reason.clone())),
        }
    }
}

impl std::fmt::Debug for ModelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelState::Ready(engine) => f
                .debug_tuple("Ready")
                .field(&engine.classifier_name())
                .finish(),
            ModelState::Disabled { reason } => {
                f.debug_struct("Disabled").field("reason", reason).finish()
            }
        }
    }
}

/// Loads the artifacts on first use and keeps the outcome for the life of
/// the process. There is no reload.
pub struct ArtifactCache {
    config: ModelsConfig,
    state: OnceLock<ModelState>,
}

impl ArtifactCache {
    pub fn new(config: ModelsConfig) -> Self {
        Self {
            config,
            state: OnceLock::new(),
        }
    }

    /// Cache pre-filled with a known state
    pub fn with_state(config: ModelsConfig, state: ModelState) -> Self {
        let cache = Self::new(config);
        let _ = cache.state.set(state);
        cache
    }

    /// Current state, loading the artifacts on the first call.
    pub fn state(&self) -> &ModelState {
        self.state.get_or_init(|| ModelState::load(&self.config))
    }

    /// Whether the load has been attempted yet.
    pub fn is_initialized(&self) -> bool {
        self.state.get().is_some()
    }

    /// Recommend through the cached engine.
    pub fn recommend(&self, reading: &SoilReading) -> RecommendResult<Recommendation> {
        self.state().engine()?.recommend(reading)
    }
}
