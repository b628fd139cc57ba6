// SPDX-License-Identifier: MIT

//! Upload preprocessing: arbitrary image bytes to a normalized model input.
//!
//! Canonical pipeline: decode, convert to grayscale, resize to the model's
//! fixed square dimension with triangle (bilinear) filtering, scale to
//! [0, 1] float32. The filter choice is part of the classification contract;
//! changing it changes model outputs.

use crate::error::{AppError, Result};
use crate::inference::{ImageTensor, UNIT_SIZE};
use image::imageops::FilterType;

/// Decode uploaded bytes into a normalized input tensor.
///
/// Undecodable or corrupt uploads fail with `InvalidImage`.
pub fn decode_image(bytes: &[u8]) -> Result<ImageTensor> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| AppError::InvalidImage(e.to_string()))?;

    let gray = decoded
        .grayscale()
        .resize_exact(UNIT_SIZE as u32, UNIT_SIZE as u32, FilterType::Triangle)
        .to_luma8();

    let data = gray.pixels().map(|p| f32::from(p.0[0]) / 255.0).collect();
    ImageTensor::new(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32, value: u8) -> Vec<u8> {
        let img = GrayImage::from_pixel(width, height, Luma([value]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageLuma8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn garbage_bytes_are_invalid_image() {
        let result = decode_image(b"definitely not an image");
        assert!(matches!(result, Err(AppError::InvalidImage(_))));
    }

    #[test]
    fn empty_bytes_are_invalid_image() {
        let result = decode_image(&[]);
        assert!(matches!(result, Err(AppError::InvalidImage(_))));
    }

    #[test]
    fn uniform_image_normalizes_to_unit_range() {
        let tensor = decode_image(&png_bytes(64, 64, 255)).unwrap();
        assert_eq!(tensor.as_slice().len(), UNIT_SIZE * UNIT_SIZE);
        assert!(tensor.as_slice().iter().all(|&v| (v - 1.0).abs() < 1e-6));
    }

    #[test]
    fn non_square_image_is_resized_to_unit_size() {
        let tensor = decode_image(&png_bytes(100, 37, 128)).unwrap();
        assert_eq!(tensor.as_slice().len(), UNIT_SIZE * UNIT_SIZE);
        assert!(tensor
            .as_slice()
            .iter()
            .all(|&v| (0.0..=1.0).contains(&v)));
    }
}
