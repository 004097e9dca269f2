// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Object detector collaborator trait

use async_trait::async_trait;
use image::DynamicImage;
use thiserror::Error;

use super::types::DetectorOutput;

/// Errors from the detector collaborator
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("Detector request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Detector returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Detector unavailable: {0}")]
    Unavailable(String),
}

/// Trait for object detectors
///
/// Implementations run inference on one decoded frame and save a crop per
/// eligible bounding box. Both the raw detections and the crop list are
/// returned; the pipeline normalizes the former and dispatches specialists
/// on the latter.
#[async_trait]
pub trait ObjectDetector: Send + Sync {
    /// Detect objects in a frame
    ///
    /// # Arguments
    /// * `image` - Decoded frame, used for cropping
    /// * `encoded` - Original encoded bytes, forwarded to remote models as-is
    async fn detect(&self, image: &DynamicImage, encoded: &[u8]) -> Result<DetectorOutput, DetectionError>;

    /// Detector name for logging
    fn name(&self) -> &'static str;
}
