// SPDX-License-Identifier: MIT

//! Shared test fixtures: in-memory database, service wiring, and a
//! deterministic fake classifier.

use pulmoscan::db::Db;
use pulmoscan::error::Result;
use pulmoscan::inference::{Classifier, ImageTensor, NUM_CATEGORIES, UNIT_SIZE};
use pulmoscan::services::{AuditLog, AuthService, SignupRequest};
use std::io::Cursor;
use std::time::Duration;

#[allow(dead_code)]
pub const TEST_SIGNING_KEY: &[u8] = b"test_jwt_key_32_bytes_minimum!!!";

/// Create a fresh in-memory database.
#[allow(dead_code)]
pub async fn test_db() -> Db {
    Db::in_memory().await.expect("Failed to create in-memory db")
}

/// Auth service over the given database with a configurable token lifetime.
#[allow(dead_code)]
pub fn auth_service(db: &Db, token_expiry_minutes: u64) -> AuthService {
    AuthService::new(
        db.clone(),
        AuditLog::new(db.clone()),
        TEST_SIGNING_KEY.to_vec(),
        token_expiry_minutes,
    )
}

/// Register a provider, returning its id.
#[allow(dead_code)]
pub async fn signup_provider(auth: &AuthService, db: &Db, email: &str) -> Result<i64> {
    auth.signup(&SignupRequest {
        provider_username: "drtest".to_string(),
        provider_email: email.to_string(),
        provider_password: "hunter2!".to_string(),
    })
    .await?;
    let provider = db
        .find_provider_by_email(email)
        .await?
        .expect("provider should exist after signup");
    Ok(provider.provider_id)
}

/// Deterministic classifier: the first three pixels of the input are taken
/// verbatim as the class scores, so tests control the prediction directly.
#[allow(dead_code)]
pub struct FakeClassifier {
    delay: Option<Duration>,
}

impl FakeClassifier {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self { delay: None }
    }

    /// Sleep inside each forward pass to widen the window for interleaving.
    #[allow(dead_code)]
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay: Some(delay) }
    }
}

impl Classifier for FakeClassifier {
    fn scores(&mut self, input: &ImageTensor) -> Result<[f32; NUM_CATEGORIES]> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        let pixels = input.as_slice();
        Ok([pixels[0], pixels[1], pixels[2]])
    }
}

/// An input whose fake-classifier prediction is the category at `index`.
#[allow(dead_code)]
pub fn tensor_for_category(index: usize) -> ImageTensor {
    let mut data = vec![0.0; UNIT_SIZE * UNIT_SIZE];
    data[index % NUM_CATEGORIES] = 1.0;
    ImageTensor::new(data).expect("tensor dimensions are fixed")
}

/// Encode a uniform grayscale PNG in memory.
#[allow(dead_code)]
pub fn png_bytes(width: u32, height: u32, value: u8) -> Vec<u8> {
    let img = image::GrayImage::from_pixel(width, height, image::Luma([value]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("png encoding should not fail");
    bytes
}
