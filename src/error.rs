//! Error types for the crop recommendation pipeline.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for recommendation operations.
pub type RecommendResult<T> = Result<T, RecommendError>;

/// Errors surfaced by the model loader and the prediction pipeline.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// One of the model artifacts does not exist on disk.
    #[error("Model files not found: {}", path.display())]
    ArtifactsMissing { path: PathBuf },

    /// An artifact exists but could not be read or parsed.
    #[error("Failed to load artifact {}: {message}", path.display())]
    ArtifactLoad { path: PathBuf, message: String },

    /// A reading value is non-finite or outside its accepted range.
    #[error("Invalid {field}: {value} is outside [{min}, {max}]")]
    InvalidInput {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Scaling or classification failed for a single request.
    #[error("An error occurred during prediction: {0}")]
    Prediction(String),

    /// Prediction is disabled because the artifacts could not be loaded.
    #[error("Unable to load the model: {0}")]
    Unavailable(String),
}

/// Machine-readable failure class carried by service error replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Payload could not be decoded into a reading
    MalformedRequest,
    /// Reading decoded but a value is out of range
    InvalidInput,
    /// Scaler or classifier failed for this request
    PredictionFailed,
    /// Model artifacts are missing or failed to load
    ArtifactsUnavailable,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedRequest => "malformed_request",
            Self::InvalidInput => "invalid_input",
            Self::PredictionFailed => "prediction_failed",
            Self::ArtifactsUnavailable => "artifacts_unavailable",
        }
    }

    /// Whether the request itself was at fault rather than the model.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::MalformedRequest | Self::InvalidInput)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RecommendError {
    /// Create an artifact load error.
    pub fn artifact_load(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::ArtifactLoad {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create a prediction error.
    pub fn prediction(message: impl ToString) -> Self {
        Self::Prediction(message.to_string())
    }

    /// Failure class used in service replies.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ArtifactsMissing { .. } | Self::ArtifactLoad { .. } | Self::Unavailable(_) => {
                ErrorKind::ArtifactsUnavailable
            }
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::Prediction(_) => ErrorKind::PredictionFailed,
        }
    }
}
