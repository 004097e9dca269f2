// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Step-detection sidecar client
//!
//! Sends each stair crop to a step-detection model, counts the steps it
//! reports, and writes an annotated copy of the crop for the client app.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::annotate::{draw_box, STEP_COLOR, STEP_THICKNESS};
use super::counter::{select_stair_crops, StepCountError, StepCounter, StepMeasurement, StepMeasurements};
use crate::vision::detection::DetectionRecord;

/// Steps below this confidence are not counted
pub const STEP_CONFIDENCE_THRESHOLD: f32 = 0.2;

#[derive(Debug, Serialize)]
struct StepRequest<'a> {
    model: &'a str,
    image: String,
    conf: f32,
}

#[derive(Debug, Deserialize)]
struct StepResponse {
    #[serde(default)]
    detections: Vec<DetectionRecord>,
}

/// Client for a step-detection sidecar
pub struct StepCountClient {
    client: Client,
    endpoint: String,
    model_name: String,
    output_dir: PathBuf,
}

/// Count steps at or above the threshold
///
/// Returns the count and the confidence of the last counted step.
pub fn count_confident_steps(detections: &[DetectionRecord]) -> (u32, f32) {
    detections
        .iter()
        .filter(|d| d.confidence >= STEP_CONFIDENCE_THRESHOLD)
        .fold((0, 0.0), |(count, _), d| (count + 1, d.confidence))
}

impl StepCountClient {
    /// Create a new step-count client writing annotated crops to `output_dir`
    pub fn new(endpoint: &str, model_name: &str, output_dir: PathBuf) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!(
            "Step-count client configured: endpoint={}, model={}",
            endpoint, model_name
        );

        Ok(Self {
            client,
            endpoint,
            model_name: model_name.to_string(),
            output_dir,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Check if the step-detection sidecar is healthy
    pub async fn health_check(&self) -> bool {
        match self
            .client
            .get(format!("{}/health", self.endpoint))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!("Step-count health check failed: {}", e);
                false
            }
        }
    }

    async fn detect_steps(&self, encoded: &[u8]) -> Result<Vec<DetectionRecord>, StepCountError> {
        let request = StepRequest {
            model: &self.model_name,
            image: STANDARD.encode(encoded),
            conf: STEP_CONFIDENCE_THRESHOLD,
        };

        let response = self
            .client
            .post(format!("{}/v1/detect", self.endpoint))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    StepCountError::ModelUnavailable(e.to_string())
                } else {
                    StepCountError::Request(e)
                }
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StepCountError::ModelUnavailable(format!(
                "model '{}' not found at {}",
                self.model_name, self.endpoint
            )));
        }

        let parsed: StepResponse = response.error_for_status()?.json().await?;
        Ok(parsed.detections)
    }

    fn annotate(&self, crop: &Path, decoded: image::DynamicImage, detections: &[DetectionRecord]) -> Option<PathBuf> {
        let mut canvas = decoded.to_rgb8();
        for bbox in detections
            .iter()
            .filter(|d| d.confidence >= STEP_CONFIDENCE_THRESHOLD)
            .filter_map(|d| d.bounding_box.as_ref())
        {
            draw_box(&mut canvas, bbox, STEP_COLOR, STEP_THICKNESS);
        }

        let output = self.output_dir.join(crop.file_name()?);
        match canvas.save(&output) {
            Ok(()) => Some(output),
            Err(e) => {
                warn!("Failed to save annotated image {}: {}", output.display(), e);
                None
            }
        }
    }
}

#[async_trait]
impl StepCounter for StepCountClient {
    async fn count_steps(&self, crops: &[PathBuf]) -> Result<StepMeasurements, StepCountError> {
        let mut results = StepMeasurements::new();

        for crop in select_stair_crops(crops) {
            let encoded = match tokio::fs::read(crop).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("Failed to load image {}: {}", crop.display(), e);
                    continue;
                }
            };
            let decoded = match image::load_from_memory(&encoded) {
                Ok(img) => img,
                Err(e) => {
                    warn!("Failed to decode image {}: {}", crop.display(), e);
                    continue;
                }
            };

            let detections = self.detect_steps(&encoded).await?;
            let (step_count, confidence) = count_confident_steps(&detections);
            let annotated_image = self.annotate(crop, decoded, &detections);

            info!("Detected {} steps in {}", step_count, crop.display());
            results.push((
                crop.to_path_buf(),
                StepMeasurement {
                    step_count,
                    confidence,
                    annotated_image,
                },
            ));
        }

        Ok(results)
    }

    fn name(&self) -> &'static str {
        "step-count-sidecar"
    }
}
