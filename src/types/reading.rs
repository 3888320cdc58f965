//! Soil and climate readings submitted for a recommendation

use crate::error::{RecommendError, RecommendResult};
use serde::{Deserialize, Serialize};

/// Inclusive range accepted for one reading field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureBounds {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

impl FeatureBounds {
    /// Midpoint of the range.
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Check a value against the range.
    pub fn check(&self, value: f64) -> RecommendResult<()> {
        if value.is_finite() && value >= self.min && value <= self.max {
            Ok(())
        } else {
            Err(RecommendError::InvalidInput {
                field: self.field,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Accepted ranges, in feature order.
pub const FEATURE_BOUNDS: [FeatureBounds; 7] = [
    FeatureBounds { field: "nitrogen", min: 0.0, max: 140.0 },
    FeatureBounds { field: "phosphorus", min: 0.0, max: 145.0 },
    FeatureBounds { field: "potassium", min: 0.0, max: 205.0 },
    FeatureBounds { field: "temperature", min: 0.0, max: 50.0 },
    FeatureBounds { field: "humidity", min: 0.0, max: 100.0 },
    FeatureBounds { field: "ph", min: 0.0, max: 14.0 },
    FeatureBounds { field: "rainfall", min: 0.0, max: 300.0 },
];

/// One set of soil and climate measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilReading {
    /// Nitrogen content (mg/kg)
    #[serde(alias = "N")]
    pub nitrogen: f64,

    /// Phosphorus content (mg/kg)
    #[serde(alias = "P")]
    pub phosphorus: f64,

    /// Potassium content (mg/kg)
    #[serde(alias = "K")]
    pub potassium: f64,

    /// Average temperature (°C)
    pub temperature: f64,

    /// Relative humidity (%)
    pub humidity: f64,

    /// Soil pH
    #[serde(alias = "pH")]
    pub ph: f64,

    /// Rainfall (mm)
    pub rainfall: f64,
}

impl SoilReading {
    /// Create a reading from values in feature order.
    pub fn new(
        nitrogen: f64,
        phosphorus: f64,
        potassium: f64,
        temperature: f64,
        humidity: f64,
        ph: f64,
        rainfall: f64,
    ) -> Self {
        Self {
            nitrogen,
            phosphorus,
            potassium,
            temperature,
            humidity,
            ph,
            rainfall,
        }
    }

    /// Values in feature order: N, P, K, temperature, humidity, pH, rainfall.
    pub fn values(&self) -> [f64; 7] {
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }

    /// Reject non-finite or out-of-range values, naming the first offender.
    pub fn validate(&self) -> RecommendResult<()> {
        FEATURE_BOUNDS
            .iter()
            .zip(self.values())
            .try_for_each(|(bounds, value)| bounds.check(value))
    }
}

impl Default for SoilReading {
    fn default() -> Self {
        Self::new(50.0, 50.0, 50.0, 25.0, 50.0, 7.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_reading_is_valid() {
        let reading = SoilReading::new(90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9);
        assert!(reading.validate().is_ok());
        assert!(SoilReading::default().validate().is_ok());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let low = SoilReading::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let high = SoilReading::new(140.0, 145.0, 205.0, 50.0, 100.0, 14.0, 300.0);
        assert!(low.validate().is_ok());
        assert!(high.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_names_field() {
        let reading = SoilReading {
            ph: 14.1,
            ..SoilReading::default()
        };
        match reading.validate() {
            Err(RecommendError::InvalidInput { field, .. }) => assert_eq!(field, "ph"),
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        let reading = SoilReading {
            rainfall: f64::NAN,
            ..SoilReading::default()
        };
        assert!(reading.validate().is_err());
    }

    #[test]
    fn test_short_aliases() {
        let json = r#"{"N":90,"P":42,"K":43,"temperature":20.8,"humidity":82,"pH":6.5,"rainfall":202.9}"#;
        let reading: SoilReading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.nitrogen, 90.0);
        assert_eq!(reading.ph, 6.5);
    }
}
