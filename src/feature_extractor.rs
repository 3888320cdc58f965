//! Feature extraction for crop classifier inference.
//!
//! The classifier was trained on seven raw measurements in a fixed column
//! order. This module assembles that vector from a reading.

use crate::types::reading::SoilReading;

/// Number of features the classifier expects.
pub const FEATURE_COUNT: usize = 7;

/// Feature extractor that turns readings into model input vectors.
///
/// Features are produced in the exact order expected by the scaler and the
/// ONNX classifier.
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Create a new feature extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract the ordered feature vector from a reading.
    pub fn extract(&self, reading: &SoilReading) -> [f64; FEATURE_COUNT] {
        reading.values()
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        FEATURE_COUNT
    }

    /// Get feature names (matching training column order).
    pub fn feature_names(&self) -> [&'static str; FEATURE_COUNT] {
        ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"]
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}
