//! Prediction pipeline for crop recommendation

use crate::config::ModelsConfig;
use crate::error::{RecommendError, RecommendResult};
use crate::feature_extractor::FeatureExtractor;
use crate::models::classifier::CropClassifier;
use crate::models::loader::{LoadedArtifacts, ModelLoader};
use crate::models::scaler::FeatureScaler;
use crate::types::{Recommendation, SoilReading};
use tracing::{debug, info};

/// Scaler plus classifier, ready to serve recommendations
pub struct RecommendationEngine {
    classifier: Box<dyn CropClassifier>,
    scaler: FeatureScaler,
    extractor: FeatureExtractor,
}

impl RecommendationEngine {
    /// Create an engine from an already-loaded classifier and scaler
    pub fn new(classifier: Box<dyn CropClassifier>, scaler: FeatureScaler) -> Self {
        Self {
            classifier,
            scaler,
            extractor: FeatureExtractor::new(),
        }
    }

    /// Load the artifacts named by the configuration
    pub fn from_config(config: &ModelsConfig) -> RecommendResult<Self> {
        let LoadedArtifacts { classifier, scaler } =
            ModelLoader::with_threads(config.onnx_threads).load(config)?;

        info!(
            classifier = %classifier.name(),
            features = scaler.width(),
            "Recommendation engine initialized"
        );

        Ok(Self::new(classifier, scaler))
    }

    /// Name of the underlying classifier
    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Run the pipeline up to the raw classifier label.
    ///
    /// validate → extract → scale → classify
    pub fn predict_label(&self, reading: &SoilReading) -> RecommendResult<i64> {
        reading.validate()?;

        let features = self.extractor.extract(reading);
        let scaled = self
            .scaler
            .transform(&features)
            .map_err(|e| RecommendError::prediction(format!("{:#}", e)))?;

        let input: Vec<f32> = scaled.iter().map(|&v| v as f32).collect();
        let label = self
            .classifier
            .predict(&input)
            .map_err(|e| RecommendError::prediction(format!("{:#}", e)))?;

        debug!(
            classifier = %self.classifier.name(),
            features = ?features,
            label = label,
            "Prediction complete"
        );

        Ok(label)
    }

    /// Recommend a crop for one reading
    pub fn recommend(&self, reading: &SoilReading) -> RecommendResult<Recommendation> {
        let label = self.predict_label(reading)?;
        Ok(Recommendation::from_label(label, *reading))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use std::sync::Mutex;

    /// Classifier returning a fixed label and recording its last input
    pub(crate) struct FixedClassifier {
        pub label: i64,
        pub seen: Mutex<Vec<f32>>,
    }

    impl FixedClassifier {
        pub(crate) fn new(label: i64) -> Self {
            Self {
                label,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl CropClassifier for FixedClassifier {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict(&self, features: &[f32]) -> Result<i64> {
            *self.seen.lock().unwrap() = features.to_vec();
            Ok(self.label)
        }
    }

    struct FailingClassifier;

    impl CropClassifier for FailingClassifier {
        fn name(&self) -> &str {
            "failing"
        }

        fn predict(&self, _features: &[f32]) -> Result<i64> {
            Err(anyhow!("input shape mismatch"))
        }
    }

    pub(crate) fn identity_scaler() -> FeatureScaler {
        FeatureScaler::Standard {
            mean: vec![0.0; 7],
            scale: vec![1.0; 7],
        }
    }

    fn reference_reading() -> SoilReading {
        SoilReading::new(90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9)
    }

    #[test]
    fn test_recommend_known_crop() {
        let engine = RecommendationEngine::new(Box::new(FixedClassifier::new(1)), identity_scaler());

        let rec = engine.recommend(&reference_reading()).unwrap();

        assert_eq!(rec.label, 1);
        assert_eq!(rec.crop, "Rice");
        assert!(rec.info.is_some());
    }

    #[test]
    fn test_recommend_unknown_label() {
        let engine =
            RecommendationEngine::new(Box::new(FixedClassifier::new(999)), identity_scaler());

        let rec = engine.recommend(&reference_reading()).unwrap();

        assert_eq!(rec.crop, "Unknown");
        assert!(rec.info.is_none());
    }

    #[test]
    fn test_scaled_features_reach_classifier() {
        let scaler = FeatureScaler::MinMax {
            scale: vec![0.5; 7],
            min: vec![1.0; 7],
        };
        let classifier = std::sync::Arc::new(FixedClassifier::new(2));

        struct Shared(std::sync::Arc<FixedClassifier>);
        impl CropClassifier for Shared {
            fn name(&self) -> &str {
                self.0.name()
            }
            fn predict(&self, features: &[f32]) -> Result<i64> {
                self.0.predict(features)
            }
        }

        let engine = RecommendationEngine::new(Box::new(Shared(classifier.clone())), scaler);
        engine
            .predict_label(&SoilReading::new(2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0))
            .unwrap();

        let seen = classifier.seen.lock().unwrap().clone();
        assert_eq!(seen, vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_classifier_failure_is_prediction_error() {
        let engine = RecommendationEngine::new(Box::new(FailingClassifier), identity_scaler());

        let err = engine.recommend(&reference_reading()).unwrap_err();

        assert_eq!(err.kind(), crate::error::ErrorKind::PredictionFailed);
        assert!(err.to_string().contains("input shape mismatch"));
    }

    #[test]
    fn test_scaler_width_mismatch_is_prediction_error() {
        let scaler = FeatureScaler::Standard {
            mean: vec![0.0; 6],
            scale: vec![1.0; 6],
        };
        let engine = RecommendationEngine::new(Box::new(FixedClassifier::new(1)), scaler);

        let err = engine.recommend(&reference_reading()).unwrap_err();
        assert!(matches!(err, RecommendError::Prediction(_)));
    }

    #[test]
    fn test_invalid_reading_rejected_before_inference() {
        let classifier = FixedClassifier::new(1);
        let engine = RecommendationEngine::new(Box::new(classifier), identity_scaler());
        let reading = SoilReading {
            nitrogen: 141.0,
            ..reference_reading()
        };

        let err = engine.recommend(&reading).unwrap_err();
        assert!(matches!(
            err,
            RecommendError::InvalidInput {
                field: "nitrogen",
                ..
            }
        ));
    }
}
