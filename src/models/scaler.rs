//! Fitted feature scaler loaded from its JSON export

use anyhow::{bail, ensure, Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Normalization fitted alongside the classifier.
///
/// Parameters mirror scikit-learn's fitted attributes so an exported scaler
/// can be written straight from `mean_`/`scale_` or `scale_`/`min_`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureScaler {
    /// `(x - mean) / scale`
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min`
    MinMax { scale: Vec<f64>, min: Vec<f64> },
}

impl FeatureScaler {
    /// Read and validate a scaler export.
    pub fn from_file<P: AsRef<Path>>(path: P, width: usize) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scaler from {:?}", path))?;
        let scaler: FeatureScaler = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse scaler from {:?}", path))?;
        scaler.validate(width)?;
        Ok(scaler)
    }

    /// Check that both parameter vectors match `width` and are finite.
    pub fn validate(&self, width: usize) -> Result<()> {
        let (a, b) = self.params();
        ensure!(
            a.len() == width && b.len() == width,
            "scaler fitted on {} features, expected {}",
            a.len().max(b.len()),
            width
        );
        if a.iter().chain(b).any(|v| !v.is_finite()) {
            bail!("scaler parameters contain non-finite values");
        }
        Ok(())
    }

    /// Number of features the scaler was fitted on.
    pub fn width(&self) -> usize {
        self.params().0.len()
    }

    /// Apply the fitted transform to one feature vector.
    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>> {
        ensure!(
            features.len() == self.width(),
            "X has {} features, but scaler is expecting {} features as input",
            features.len(),
            self.width()
        );

        let out = match self {
            FeatureScaler::Standard { mean, scale } => features
                .iter()
                .zip(mean.iter().zip(scale))
                .map(|(x, (m, s))| {
                    // constant columns are fitted with a zero scale
                    let s = if *s == 0.0 { 1.0 } else { *s };
                    (x - m) / s
                })
                .collect(),
            FeatureScaler::MinMax { scale, min } => features
                .iter()
                .zip(scale.iter().zip(min))
                .map(|(x, (s, m))| x * s + m)
                .collect(),
        };
        Ok(out)
    }

    fn params(&self) -> (&[f64], &[f64]) {
        match self {
            FeatureScaler::Standard { mean, scale } => (mean.as_slice(), scale.as_slice()),
            FeatureScaler::MinMax { scale, min } => (scale.as_slice(), min.as_slice()),
        }
    }
}
