// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Conditional specialist dispatch
//!
//! Step counting only runs when a stair class was detected. OCR always scans
//! the crop list and picks out signboards itself. The two fail independently.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::vision::detection::ObjectCountMap;
use crate::vision::ocr::{read_signboards, OcrResults, TextRecognizer};
use crate::vision::stepcount::{StepCountSummary, StepCounter};
use crate::vision::vocabulary::is_stair_class;

/// Detected classes that belong to the stair vocabulary, in map order
pub fn detected_stairs(counts: &ObjectCountMap) -> Vec<&str> {
    counts.class_names().filter(|c| is_stair_class(c)).collect()
}

/// Run the step counter if any stair class is present
///
/// Returns `None` when no stairs were detected or when the counter failed;
/// a failed run never contributes partial results.
pub async fn dispatch_step_count(
    counter: &dyn StepCounter,
    counts: &ObjectCountMap,
    crops: &[PathBuf],
) -> Option<StepCountSummary> {
    let stairs = detected_stairs(counts);
    if stairs.is_empty() {
        return None;
    }

    info!("Stairs detected ({}), running {}", stairs.join(", "), counter.name());
    match counter.count_steps(crops).await {
        Ok(measurements) => Some(StepCountSummary::from_measurements(&measurements)),
        Err(e) => {
            warn!("Step counting failed, omitting step data: {}", e);
            None
        }
    }
}

/// Run OCR over the signboard crops
pub async fn dispatch_ocr(recognizer: &dyn TextRecognizer, crops: &[PathBuf]) -> OcrResults {
    let results = read_signboards(recognizer, crops).await;
    if !results.is_empty() {
        info!("OCR read {} signboard crops", results.len());
    }
    results
}
