//! Type definitions for the crop recommendation pipeline

pub mod reading;
pub mod recommendation;

pub use reading::{FeatureBounds, SoilReading, FEATURE_BOUNDS};
pub use recommendation::{Recommendation, RecommendationReply};
