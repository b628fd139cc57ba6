// SPDX-License-Identifier: MIT

//! Classification endpoint handler: turns an authenticated image upload into
//! a predicted category.

use crate::error::{AppError, Result};
use crate::inference::{preprocess, ModelServer};
use serde::Serialize;
use std::sync::Arc;

/// Classification response returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub predicted_category: String,
    pub inference_time_ms: f64,
}

/// Detection service: preprocessing plus model invocation.
#[derive(Clone)]
pub struct DetectionService {
    model: Arc<ModelServer>,
}

impl DetectionService {
    pub fn new(model: Arc<ModelServer>) -> Self {
        Self { model }
    }

    /// Classify an uploaded image on behalf of an authenticated provider.
    ///
    /// Rejects before touching the model: a missing identity is
    /// `Unauthorized`, undecodable bytes are `InvalidImage`. Inference runs
    /// on the blocking pool because the forward pass is CPU-bound and
    /// serialized behind the model mutex. No side effects: registering a
    /// diagnosis is a separate, explicit operation.
    pub async fn detect(&self, provider: Option<i64>, image_bytes: &[u8]) -> Result<Classification> {
        let provider_id = provider.ok_or(AppError::Unauthorized)?;

        let input = preprocess::decode_image(image_bytes)?;

        let model = Arc::clone(&self.model);
        let (category, elapsed_ms) = tokio::task::spawn_blocking(move || model.classify(&input))
            .await
            .map_err(|e| AppError::Inference(format!("inference task failed: {}", e)))??;

        tracing::debug!(
            provider_id,
            category = category.label(),
            elapsed_ms,
            "Classification served"
        );

        Ok(Classification {
            predicted_category: category.label().to_string(),
            inference_time_ms: (elapsed_ms * 100.0).round() / 100.0,
        })
    }
}
