// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Frame-to-description pipeline
//!
//! One call per uploaded frame, stages in sequence: decode, detect, adapt,
//! specialists, compose, speak. Only an undecodable frame or an unusable
//! artifact root fails the request; every collaborator failure degrades.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use super::dispatch::{dispatch_ocr, dispatch_step_count};
use super::layout::{ArtifactLayout, DETECTED_URL};
use super::report::{FrameReport, FRAME_PROCESSED};
use crate::scene::{compose_description, SceneInputs};
use crate::speech::SpeechSynthesizer;
use crate::vision::detection::{normalize, DetectorOutput, ObjectDetector};
use crate::vision::ocr::TextRecognizer;
use crate::vision::stepcount::StepCounter;
use crate::vision::{decode_frame, ImageError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid image format: {0}")]
    InvalidImage(#[from] ImageError),

    #[error("Artifact storage unavailable: {0}")]
    Storage(#[from] std::io::Error),
}

/// Collaborator names, reported by the health endpoint
#[derive(Debug, Clone, serde::Serialize)]
pub struct CollaboratorNames {
    pub detector: &'static str,
    pub ocr: &'static str,
    pub step_counter: &'static str,
    pub speech: &'static str,
}

/// The four-stage pipeline with its injected collaborators
pub struct FramePipeline {
    detector: Arc<dyn ObjectDetector>,
    recognizer: Arc<dyn TextRecognizer>,
    step_counter: Arc<dyn StepCounter>,
    speech: Arc<dyn SpeechSynthesizer>,
    layout: ArtifactLayout,
}

impl FramePipeline {
    pub fn new(
        detector: Arc<dyn ObjectDetector>,
        recognizer: Arc<dyn TextRecognizer>,
        step_counter: Arc<dyn StepCounter>,
        speech: Arc<dyn SpeechSynthesizer>,
        layout: ArtifactLayout,
    ) -> Self {
        Self {
            detector,
            recognizer,
            step_counter,
            speech,
            layout,
        }
    }

    pub fn layout(&self) -> &ArtifactLayout {
        &self.layout
    }

    pub fn collaborators(&self) -> CollaboratorNames {
        CollaboratorNames {
            detector: self.detector.name(),
            ocr: self.recognizer.name(),
            step_counter: self.step_counter.name(),
            speech: self.speech.name(),
        }
    }

    /// Process one uploaded frame
    ///
    /// # Errors
    /// * `PipelineError::InvalidImage` - bytes are not a decodable image
    /// * `PipelineError::Storage` - artifact directories cannot be created
    pub async fn process_frame(&self, bytes: &[u8]) -> Result<FrameReport, PipelineError> {
        let start = std::time::Instant::now();
        let (image, frame) = decode_frame(bytes)?;
        info!(
            "Processing {}x{} {:?} frame ({} bytes)",
            frame.width, frame.height, frame.format, frame.size_bytes
        );

        self.layout.ensure_dirs().await?;

        let output = match self.detector.detect(&image, bytes).await {
            Ok(output) => output,
            Err(e) => {
                warn!("{} failed, continuing with no detections: {}", self.detector.name(), e);
                DetectorOutput::default()
            }
        };

        let normalized = normalize(output.raw);
        info!(
            "Detected objects: {}",
            serde_json::to_string(&normalized.counts).unwrap_or_default()
        );

        let crop_paths: Vec<PathBuf> = output.crops.iter().map(|c| c.path.clone()).collect();
        let ocr_results = dispatch_ocr(self.recognizer.as_ref(), &crop_paths).await;
        let step_count = dispatch_step_count(self.step_counter.as_ref(), &normalized.counts, &crop_paths).await;

        let scene_description = compose_description(SceneInputs {
            counts: &normalized.counts,
            steps: step_count.as_ref(),
            ocr: &ocr_results,
        });
        info!("Scene description: {}", scene_description);

        let audio_path = match self.speech.synthesize(&scene_description, None).await {
            Ok(url) => {
                self.check_artifact(&url).await;
                Some(url)
            }
            Err(e) => {
                warn!("Speech synthesis failed, returning text only: {}", e);
                None
            }
        };

        let bounding_box_images = output
            .crops
            .iter()
            .map(|crop| format!("{}/{}", DETECTED_URL, crop.file_name()))
            .collect();

        info!("Frame processed in {}ms", start.elapsed().as_millis());

        Ok(FrameReport {
            message: FRAME_PROCESSED.to_string(),
            detections: normalized.view,
            bounding_box_images,
            ocr_results,
            step_count_results: step_count,
            scene_description,
            audio_path,
            counts: normalized.counts,
        })
    }

    async fn check_artifact(&self, url: &str) {
        let exists = match self.layout.static_path_for(url) {
            Some(path) => tokio::fs::try_exists(&path).await.unwrap_or(false),
            None => false,
        };
        if !exists {
            warn!("Audio artifact {} not found under {}", url, self.layout.static_dir().display());
        }
    }
}
