//! Crop Advisor Library
//!
//! Recommends a crop from seven soil and climate measurements using a
//! classifier and scaler trained elsewhere and exported to disk.

pub mod cli;
pub mod config;
pub mod consumer;
pub mod crops;
pub mod dashboard;
pub mod error;
pub mod feature_extractor;
pub mod metrics;
pub mod models;
pub mod producer;
pub mod service;
pub mod types;

pub use config::AppConfig;
pub use consumer::RequestConsumer;
pub use crops::{crop_name, Crop, CropInfo, UNKNOWN_CROP};
pub use error::{ErrorKind, RecommendError, RecommendResult};
pub use feature_extractor::FeatureExtractor;
pub use models::{ArtifactCache, ModelState, RecommendationEngine};
pub use producer::ReplyPublisher;
pub use service::RecommendationService;
pub use types::{Recommendation, RecommendationReply, SoilReading};
