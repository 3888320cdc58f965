//! Crop classifiers
//!
//! [`CropClassifier`] is the seam between the pipeline and the trained model.
//! The production implementation runs an ONNX export through ONNX Runtime.

use anyhow::{anyhow, Context, Result};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::tensor::TensorElementType;
use ort::value::{Tensor, ValueType};
use std::path::Path;
use std::sync::RwLock;
use tracing::{debug, info};

/// A trained classifier mapping a scaled feature vector to a crop label.
pub trait CropClassifier: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Predict the class label for one scaled feature vector.
    fn predict(&self, features: &[f32]) -> Result<i64>;
}

/// ONNX Runtime session with its discovered input/output names
pub struct OnnxClassifier {
    name: String,
    /// Running a session needs `&mut`, hence the lock
    session: RwLock<Session>,
    input_name: String,
    label_name: String,
}

impl OnnxClassifier {
    /// Load an ONNX classifier from file
    pub fn load<P: AsRef<Path>>(path: P, onnx_threads: usize) -> Result<Self> {
        let path = path.as_ref();

        ort::init().commit()?;

        info!(path = %path.display(), threads = onnx_threads, "Loading ONNX classifier");

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(onnx_threads)?
            .commit_from_file(path)
            .context(format!("Failed to load classifier from {:?}", path))?;

        // Discover input/output names
        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "float_input".to_string());

        let outputs: Vec<(&str, bool)> = session
            .outputs
            .iter()
            .map(|o| (o.name.as_str(), is_int64_tensor(&o.output_type)))
            .collect();
        let label_name = select_label_output(&outputs)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("classifier graph has no int64 label output"))?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "classifier".to_string());

        info!(
            model = %name,
            input = %input_name,
            output = %label_name,
            "Classifier loaded successfully"
        );

        Ok(Self {
            name,
            session: RwLock::new(session),
            input_name,
            label_name,
        })
    }
}

/// Pick the output holding the predicted label from `(name, is_int64)`
/// pairs in graph order.
///
/// skl2onnx exports "output_label" next to "output_probability"; other
/// exporters may only be matched by element type.
pub(crate) fn select_label_output<'a>(outputs: &[(&'a str, bool)]) -> Option<&'a str> {
    let int64 = || outputs.iter().filter(|(_, is_int64)| *is_int64);
    int64()
        .find(|(name, _)| name.contains("label"))
        .or_else(|| int64().next())
        .map(|(name, _)| *name)
}

fn is_int64_tensor(ty: &ValueType) -> bool {
    matches!(
        ty,
        ValueType::Tensor {
            ty: TensorElementType::Int64,
            ..
        }
    )
}

impl CropClassifier for OnnxClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, features: &[f32]) -> Result<i64> {
        // Create input tensor with shape [1, num_features]
        let shape = vec![1_i64, features.len() as i64];
        let input_tensor =
            Tensor::from_array((shape, features.to_vec())).context("Failed to create input tensor")?;

        let mut session = self
            .session
            .write()
            .map_err(|e| anyhow!("Lock error: {}", e))?;

        // Run inference
        let outputs = session.run(ort::inputs![self.input_name.as_str() => input_tensor])?;

        let output = outputs
            .get(self.label_name.as_str())
            .ok_or_else(|| anyhow!("classifier produced no '{}' output", self.label_name))?;

        // Extract predicted label
        let (_, labels) = output
            .try_extract_tensor::<i64>()
            .context("Failed to read label tensor")?;

        let label = labels
            .first()
            .copied()
            .ok_or_else(|| anyhow!("classifier returned an empty label tensor"))?;

        debug!(model = %self.name, label = label, "Classifier inference complete");
        Ok(label)
    }
}
