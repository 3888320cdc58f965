//! Model artifacts and the prediction pipeline

pub mod cache;
pub mod classifier;
pub mod inference;
pub mod loader;
pub mod scaler;

pub use cache::{ArtifactCache, ModelState};
pub use classifier::{CropClassifier, OnnxClassifier};
pub use inference::RecommendationEngine;
pub use loader::{LoadedArtifacts, ModelLoader};
pub use scaler::FeatureScaler;
