// SPDX-License-Identifier: MIT

//! ONNX runtime backend (tract).

use crate::error::{AppError, Result};
use crate::inference::{Classifier, ImageTensor, NUM_CATEGORIES, UNIT_SIZE};
use std::path::Path;
use tract_onnx::prelude::*;

/// Classifier backed by a tract-onnx optimized plan.
///
/// Input contract: `[1, 256, 256, 1]` float32 in [0, 1]. Output: a 3-way
/// class score tensor; anything else fails at load time via the warm-up pass.
pub struct OnnxClassifier {
    plan: TypedSimplePlan<TypedModel>,
}

impl OnnxClassifier {
    /// Load and optimize the model artifact from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(|e| AppError::ModelLoad(format!("{}: {}", path.display(), e)))?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(
                    f32::datum_type(),
                    tvec!(1, UNIT_SIZE, UNIT_SIZE, 1),
                ),
            )
            .map_err(|e| AppError::ModelLoad(e.to_string()))?
            .into_optimized()
            .map_err(|e| AppError::ModelLoad(e.to_string()))?
            .into_runnable()
            .map_err(|e| AppError::ModelLoad(e.to_string()))?;

        tracing::info!(path = %path.display(), "Model artifact loaded");
        Ok(Self { plan })
    }
}

impl Classifier for OnnxClassifier {
    fn scores(&mut self, input: &ImageTensor) -> Result<[f32; NUM_CATEGORIES]> {
        let tensor = tract_ndarray::Array4::from_shape_vec(
            (1, UNIT_SIZE, UNIT_SIZE, 1),
            input.as_slice().to_vec(),
        )
        .map_err(|e| AppError::Inference(e.to_string()))?;

        let outputs = self
            .plan
            .run(tvec!(Tensor::from(tensor).into()))
            .map_err(|e| AppError::Inference(e.to_string()))?;

        let view = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| AppError::Inference(e.to_string()))?;
        let scores: Vec<f32> = view.iter().copied().collect();
        if scores.len() != NUM_CATEGORIES {
            return Err(AppError::Inference(format!(
                "expected {} class scores, got {}",
                NUM_CATEGORIES,
                scores.len()
            )));
        }
        Ok([scores[0], scores[1], scores[2]])
    }
}
