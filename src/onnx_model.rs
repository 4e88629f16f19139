//! ONNX classifier artifacts, executed with tract.
//!
//! The graph is pinned to a single `[1, 7]` f32 input at load time; output 0
//! is read as the predicted label (scikit-learn exports emit an int64
//! `label` tensor first).

use std::path::Path;

use tract_onnx::prelude::*;

use crate::errors::{ArtifactLoadError, ModelError, ModelResult};
use crate::feature_vector::FEATURE_COUNT;
use crate::model::Classifier;

type OnnxPlan = TypedRunnableModel<TypedModel>;

pub struct OnnxClassifier {
    plan: OnnxPlan,
    source: String,
}

impl OnnxClassifier {
    /// Parse and optimize an ONNX graph; `path` is only used in error reports
    pub fn from_bytes(path: &Path, bytes: &[u8]) -> Result<Self, ArtifactLoadError> {
        let mut reader = std::io::Cursor::new(bytes);
        let model = tract_onnx::onnx()
            .model_for_read(&mut reader)
            .map_err(|e| ArtifactLoadError::malformed(path, format!("{e:#}")))?;

        let plan = model
            .with_input_fact(0, f32::fact([1, FEATURE_COUNT]).into())
            .and_then(|m| m.into_optimized())
            .and_then(|m| m.into_runnable())
            .map_err(|e| {
                ArtifactLoadError::contract(path, format!("graph cannot run on a [1, {FEATURE_COUNT}] input: {e:#}"))
            })?;

        Ok(Self {
            plan,
            source: path.display().to_string(),
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, features: &[f64]) -> ModelResult<i64> {
        if features.len() != FEATURE_COUNT {
            return Err(ModelError::DimensionMismatch {
                expected: FEATURE_COUNT,
                actual: features.len(),
            });
        }

        let values: Vec<f32> = features.iter().map(|v| *v as f32).collect();
        let input = Tensor::from_shape(&[1, FEATURE_COUNT], &values)
            .map_err(|e| ModelError::backend(format!("{e:#}")))?;

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| ModelError::backend(format!("{e:#}")))?;

        let label = outputs
            .first()
            .ok_or_else(|| ModelError::backend("graph produced no outputs"))?
            .cast_to::<i64>()
            .map_err(|e| ModelError::backend(format!("label output is not numeric: {e:#}")))?;

        label
            .as_slice::<i64>()
            .map_err(|e| ModelError::backend(format!("{e:#}")))?
            .first()
            .copied()
            .ok_or_else(|| ModelError::backend("label output is empty"))
    }

    fn describe(&self) -> String {
        format!("onnx classifier ({})", self.source)
    }
}
