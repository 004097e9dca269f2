// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detector sidecar client
//!
//! Talks to an open-vocabulary detection service over HTTP. The service
//! answers with either aggregated counts or per-box records; boxes are cut
//! out locally and saved for the specialists.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::DynamicImage;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::crops::{confident_records, save_crops, MIN_CONFIDENCE};
use super::detector::{DetectionError, ObjectDetector};
use super::types::{DetectionRecord, DetectorOutput, RawDetections};
use crate::vision::vocabulary::DETECTOR_CLASSES;

/// IoU threshold passed to the detector's NMS
pub const IOU_THRESHOLD: f32 = 0.5;

#[derive(Debug, Serialize)]
struct DetectRequest<'a> {
    model: &'a str,
    image: String,
    classes: &'a [&'a str],
    conf: f32,
    iou: f32,
}

#[derive(Debug, Deserialize)]
struct DetectResponse {
    #[serde(default)]
    detections: RawDetections,
    /// Per-box records sent alongside aggregated counts
    #[serde(default)]
    boxes: Vec<DetectionRecord>,
}

impl DetectResponse {
    /// Drop low-confidence records and save crops for what remains
    ///
    /// Per-box records are filtered before they become the raw detections,
    /// so counts and crops always agree on what was seen.
    fn into_output(self, image: &DynamicImage, crop_dir: &Path) -> DetectorOutput {
        match self.detections {
            RawDetections::Records(records) => {
                let records = confident_records(records);
                let crops = save_crops(image, &records, crop_dir);
                DetectorOutput {
                    raw: RawDetections::Records(records),
                    crops,
                }
            }
            raw => {
                let boxes = confident_records(self.boxes);
                let crops = save_crops(image, &boxes, crop_dir);
                DetectorOutput { raw, crops }
            }
        }
    }
}

/// Client for an object-detection sidecar
pub struct DetectorClient {
    client: Client,
    endpoint: String,
    model_name: String,
    crop_dir: PathBuf,
}

impl DetectorClient {
    /// Create a new detector client that saves crops into `crop_dir`
    pub fn new(endpoint: &str, model_name: &str, crop_dir: PathBuf) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(120)).build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!("Detector client configured: endpoint={}, model={}", endpoint, model_name);

        Ok(Self {
            client,
            endpoint,
            model_name: model_name.to_string(),
            crop_dir,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Check if the detector sidecar is healthy
    pub async fn health_check(&self) -> bool {
        match self.client.get(format!("{}/health", self.endpoint)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!("Detector health check failed: {}", e);
                false
            }
        }
    }
}

#[async_trait]
impl ObjectDetector for DetectorClient {
    async fn detect(&self, image: &DynamicImage, encoded: &[u8]) -> Result<DetectorOutput, DetectionError> {
        let request = DetectRequest {
            model: &self.model_name,
            image: STANDARD.encode(encoded),
            classes: DETECTOR_CLASSES,
            conf: MIN_CONFIDENCE,
            iou: IOU_THRESHOLD,
        };

        let response = self
            .client
            .post(format!("{}/v1/detect", self.endpoint))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(DetectionError::Status { status, body });
        }

        let parsed: DetectResponse = response.json().await?;
        let output = parsed.into_output(image, &self.crop_dir);

        debug!("Detector returned {:?} with {} crops", output.raw, output.crops.len());

        Ok(output)
    }

    fn name(&self) -> &'static str {
        "detector-sidecar"
    }
}
