//! Model artifact loader

use crate::config::ModelsConfig;
use crate::error::{RecommendError, RecommendResult};
use crate::feature_extractor::FEATURE_COUNT;
use crate::models::classifier::{CropClassifier, OnnxClassifier};
use crate::models::scaler::FeatureScaler;
use std::path::Path;
use tracing::{info, warn};

/// Classifier and scaler pair read from disk
pub struct LoadedArtifacts {
    pub classifier: Box<dyn CropClassifier>,
    pub scaler: FeatureScaler,
}

/// Loader for the classifier and scaler artifacts
pub struct ModelLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
}

impl ModelLoader {
    /// Create a new model loader with default settings (1 thread)
    pub fn new() -> Self {
        Self::with_threads(1)
    }

    /// Create a new model loader with specified number of threads
    pub fn with_threads(onnx_threads: usize) -> Self {
        Self {
            onnx_threads: onnx_threads.max(1),
        }
    }

    /// Load both artifacts named by the configuration.
    ///
    /// Existence of both files is checked before either is parsed, so a
    /// missing artifact never touches ONNX Runtime.
    pub fn load(&self, config: &ModelsConfig) -> RecommendResult<LoadedArtifacts> {
        Self::ensure_exists(&config.classifier_path)?;
        Self::ensure_exists(&config.scaler_path)?;

        // Load scaler, then classifier
        let scaler = FeatureScaler::from_file(&config.scaler_path, FEATURE_COUNT)
            .map_err(|e| RecommendError::artifact_load(&config.scaler_path, format!("{:#}", e)))?;

        let classifier = OnnxClassifier::load(&config.classifier_path, self.onnx_threads)
            .map_err(|e| {
                RecommendError::artifact_load(&config.classifier_path, format!("{:#}", e))
            })?;

        info!(
            classifier = %config.classifier_path.display(),
            scaler = %config.scaler_path.display(),
            "Model artifacts loaded"
        );

        Ok(LoadedArtifacts {
            classifier: Box::new(classifier),
            scaler,
        })
    }

    fn ensure_exists(path: &Path) -> RecommendResult<()> {
        if path.is_file() {
            Ok(())
        } else {
            warn!(path = %path.display(), "Model file not found");
            Err(RecommendError::ArtifactsMissing {
                path: path.to_path_buf(),
            })
        }
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &Path) -> ModelsConfig {
        ModelsConfig {
            classifier_path: dir.join("crop_recommendation_model.onnx"),
            scaler_path: dir.join("scaler.json"),
            onnx_threads: 1,
        }
    }

    #[test]
    fn test_missing_classifier_reported_first() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        match ModelLoader::new().load(&config) {
            Err(RecommendError::ArtifactsMissing { path }) => {
                assert_eq!(path, config.classifier_path)
            }
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("load should fail without artifacts"),
        }
    }

    #[test]
    fn test_missing_scaler() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(&config.classifier_path, b"not really onnx").unwrap();

        match ModelLoader::new().load(&config) {
            Err(RecommendError::ArtifactsMissing { path }) => assert_eq!(path, config.scaler_path),
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("load should fail without a scaler"),
        }
    }

    #[test]
    fn test_corrupt_scaler_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(&config.classifier_path, b"not really onnx").unwrap();
        std::fs::write(&config.scaler_path, b"{\"kind\":\"standard\"").unwrap();

        match ModelLoader::new().load(&config) {
            Err(RecommendError::ArtifactLoad { path, .. }) => assert_eq!(path, config.scaler_path),
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("load should fail with a corrupt scaler"),
        }
    }

    #[test]
    fn test_corrupt_classifier_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(&config.classifier_path, b"not really onnx").unwrap();
        std::fs::write(
            &config.scaler_path,
            r#"{"kind":"min_max","scale":[1,1,1,1,1,1,1],"min":[0,0,0,0,0,0,0]}"#,
        )
        .unwrap();

        match ModelLoader::new().load(&config) {
            Err(RecommendError::ArtifactLoad { path, .. }) => {
                assert_eq!(path, config.classifier_path)
            }
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("load should fail with a corrupt classifier"),
        }

        let state = crate::models::ModelState::load(&config);
        assert!(!state.is_ready());
        match state {
            crate::models::ModelState::Disabled { reason } => {
                assert!(reason.contains("crop_recommendation_model.onnx"))
            }
            crate::models::ModelState::Ready(_) => panic!("corrupt classifier must disable prediction"),
        }
    }
}
