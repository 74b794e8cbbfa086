//! Adapter around the pre-trained ONNX scoring artifact.

use std::path::Path;

use tract_onnx::prelude::*;

use crate::error::ApiError;
use crate::features::FEATURE_DIM;

/// Anything that can turn an encoded feature vector into a calibrated
/// habitability probability. The production implementation is the ONNX
/// plan below; tests substitute fixed-output stubs.
pub trait Scorer: Send + Sync {
    fn score(&self, features: &[f32; FEATURE_DIM]) -> Result<f64, ApiError>;
}

pub struct OnnxScorer {
    plan: TypedRunnableModel<TypedModel>,
}

impl OnnxScorer {
    /// Load and optimize the artifact once, at startup. The input fact
    /// is pinned to `[1, FEATURE_DIM]` so a model exported against a
    /// different feature schema fails here instead of mis-scoring.
    pub fn load(path: impl AsRef<Path>) -> TractResult<Self> {
        let plan = tract_onnx::onnx()
            .model_for_path(path)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, FEATURE_DIM)),
            )?
            .into_optimized()?
            .into_runnable()?;
        Ok(OnnxScorer { plan })
    }
}

impl Scorer for OnnxScorer {
    fn score(&self, features: &[f32; FEATURE_DIM]) -> Result<f64, ApiError> {
        let tensor = tract_ndarray::Array2::from_shape_vec((1, FEATURE_DIM), features.to_vec())
            .map_err(|e| ApiError::Scoring(e.to_string()))?
            .into_tensor();

        let outputs = self
            .plan
            .run(tvec!(tensor.into()))
            .map_err(|e| ApiError::Scoring(e.to_string()))?;

        // Classifier exports carry either a single probability column or
        // a [P(negative), P(positive)] pair, sometimes after an integer
        // label output. Take the last float output, last element.
        let view = outputs
            .iter()
            .rev()
            .find_map(|t| t.to_array_view::<f32>().ok())
            .ok_or_else(|| ApiError::Scoring("model produced no float output".to_string()))?;
        let p = view
            .iter()
            .last()
            .copied()
            .ok_or_else(|| ApiError::Scoring("model output tensor is empty".to_string()))?;

        Ok((p as f64).clamp(0.0, 1.0))
    }
}
