// SPDX-License-Identifier: MIT

//! Application error types.

/// Application error type covering auth, storage, and inference failures.
///
/// Identity and credential errors are client-facing rejections. Inference
/// errors mean the runtime failed on input that already passed validation,
/// so they are logged distinctly from `InvalidImage`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid password")]
    InvalidCredentials,

    #[error("User does not exist")]
    UserNotFound,

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Patient not found")]
    PatientNotFound,

    #[error("Patient email already registered")]
    DuplicatePatientEmail,

    #[error("Invalid image format: {0}")]
    InvalidImage(String),

    #[error("Model not loaded")]
    ModelUnavailable,

    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

/// Result type alias for services
pub type Result<T> = std::result::Result<T, AppError>;
