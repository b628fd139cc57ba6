// SPDX-License-Identifier: MIT

//! Model serving: a classifier loaded once at startup and shared, read-only,
//! across all requests.
//!
//! The underlying runtime is not safe for concurrent invocation, so the
//! server guards it with a mutex: at most one forward pass runs at a time.
//! Callers are expected to go through `spawn_blocking` so the executor is not
//! parked on CPU-bound work.

pub mod onnx;
pub mod preprocess;

use crate::error::{AppError, Result};
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;

pub use onnx::OnnxClassifier;
pub use preprocess::decode_image;

/// Square input dimension expected by the classifier.
pub const UNIT_SIZE: usize = 256;

/// Number of diagnostic categories produced by the classifier.
pub const NUM_CATEGORIES: usize = 3;

/// Diagnostic category predicted by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Benign,
    Malignant,
    Normal,
}

impl Category {
    /// Wire label matching the model's training categories.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Benign => "Benign cases",
            Category::Malignant => "Malignant cases",
            Category::Normal => "Normal cases",
        }
    }

    /// Category for a class-score index (the model's output ordering).
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Category::Benign),
            1 => Some(Category::Malignant),
            2 => Some(Category::Normal),
            _ => None,
        }
    }

    /// All categories, in model output order.
    pub const ALL: [Category; NUM_CATEGORIES] =
        [Category::Benign, Category::Malignant, Category::Normal];
}

/// A normalized model input: 256x256 single-channel float32 in [0, 1].
///
/// The batch and channel dimensions are added at the runtime boundary.
#[derive(Debug, Clone)]
pub struct ImageTensor {
    data: Vec<f32>,
}

impl ImageTensor {
    /// Wrap a normalized pixel buffer, validating its length.
    pub fn new(data: Vec<f32>) -> Result<Self> {
        if data.len() != UNIT_SIZE * UNIT_SIZE {
            return Err(AppError::InvalidImage(format!(
                "expected {} pixels, got {}",
                UNIT_SIZE * UNIT_SIZE,
                data.len()
            )));
        }
        Ok(Self { data })
    }

    /// All-zero input, used for the warm-up pass.
    pub fn zeros() -> Self {
        Self {
            data: vec![0.0; UNIT_SIZE * UNIT_SIZE],
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// A loaded classifier backend.
///
/// `scores` takes `&mut self` because interpreter state is reused between
/// invocations; exclusive access is the safety contract.
pub trait Classifier: Send {
    /// Raw class scores for a normalized input, in model output order.
    fn scores(&mut self, input: &ImageTensor) -> Result<[f32; NUM_CATEGORIES]>;
}

/// The process-wide model handle: constructed once at startup and shared via
/// `Arc`, never mutated after warm-up.
pub struct ModelServer {
    classifier: Mutex<Option<Box<dyn Classifier>>>,
}

impl ModelServer {
    /// Load the classifier artifact and run one dummy forward pass so lazy
    /// initialization costs are paid before the first real request.
    ///
    /// Fails if the artifact is missing, malformed, or the warm-up pass does
    /// not produce the expected three class scores; the process must not
    /// begin serving in that case.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut classifier = OnnxClassifier::load(path.as_ref())?;

        let started = Instant::now();
        classifier
            .scores(&ImageTensor::zeros())
            .map_err(|e| AppError::ModelLoad(format!("warm-up inference failed: {}", e)))?;
        tracing::info!(
            warmup_ms = started.elapsed().as_millis() as u64,
            "Model loaded and warmed up"
        );

        Ok(Self::with_classifier(Box::new(classifier)))
    }

    /// Build a server around an already-constructed classifier (tests inject
    /// a deterministic fake here).
    pub fn with_classifier(classifier: Box<dyn Classifier>) -> Self {
        Self {
            classifier: Mutex::new(Some(classifier)),
        }
    }

    /// A server with no model; every classify fails with `ModelUnavailable`.
    pub fn uninitialized() -> Self {
        Self {
            classifier: Mutex::new(None),
        }
    }

    /// Classify a normalized input, returning the argmax category and the
    /// measured inference wall-clock time in milliseconds.
    ///
    /// Blocking: serializes on the interpreter mutex.
    pub fn classify(&self, input: &ImageTensor) -> Result<(Category, f64)> {
        let mut guard = self
            .classifier
            .lock()
            .map_err(|_| AppError::Inference("classifier mutex poisoned".to_string()))?;
        let classifier = guard.as_mut().ok_or(AppError::ModelUnavailable)?;

        let started = Instant::now();
        let scores = classifier.scores(input)?;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        // First maximal score wins on ties, matching argmax semantics.
        let mut index = 0;
        for (i, score) in scores.iter().enumerate() {
            if *score > scores[index] {
                index = i;
            }
        }
        let category = Category::from_index(index)
            .ok_or_else(|| AppError::Inference(format!("score index {} out of range", index)))?;

        Ok((category, elapsed_ms))
    }
}
