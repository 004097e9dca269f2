// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-frame result returned to the client app

use serde::Serialize;

use crate::vision::detection::{DetectionsView, ObjectCountMap};
use crate::vision::ocr::OcrResults;
use crate::vision::stepcount::StepCountSummary;

pub const FRAME_PROCESSED: &str = "Frame processed successfully";

/// Everything one processed frame produced
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub message: String,
    /// Detector output echoed back, counts rendered as `{class, count}` rows
    pub detections: DetectionsView,
    /// `/detected/<name>` for every saved crop
    pub bounding_box_images: Vec<String>,
    pub ocr_results: OcrResults,
    pub step_count_results: Option<StepCountSummary>,
    pub scene_description: String,
    pub audio_path: Option<String>,
    /// Normalized counts the description was composed from
    #[serde(skip)]
    pub counts: ObjectCountMap,
}
