// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Bounding-box crop extraction
//!
//! Crops are what the OCR and step-count specialists work on. The file name
//! carries the source class (`sign_board_<ms>_<n>.jpg`), which the specialists
//! use to pick their inputs. `<n>` is the crop's position in the frame so
//! same-class boxes saved within one millisecond never share a file.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};
use tracing::{debug, warn};

use super::types::{BoundingBox, BoundingBoxCrop, DetectionRecord};
use crate::vision::vocabulary::is_crop_class;

/// Detections below this confidence are neither counted nor cropped
pub const MIN_CONFIDENCE: f32 = 0.15;

/// Crops narrower or shorter than this are discarded
pub const MIN_CROP_SIDE: u32 = 5;

/// Clamp a box to the image and convert it to `(x, y, width, height)`
///
/// Returns `None` when the clamped region is smaller than `MIN_CROP_SIDE`
/// on either side.
pub fn clamp_box(bbox: &BoundingBox, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
    let clamp = |v: f32, max: u32| -> u32 {
        if v.is_nan() || v <= 0.0 {
            0
        } else {
            (v as u32).min(max)
        }
    };

    let x1 = clamp(bbox.x1, width);
    let y1 = clamp(bbox.y1, height);
    let x2 = clamp(bbox.x2, width);
    let y2 = clamp(bbox.y2, height);

    if x2 < x1 + MIN_CROP_SIDE || y2 < y1 + MIN_CROP_SIDE {
        return None;
    }
    Some((x1, y1, x2 - x1, y2 - y1))
}

/// File name for a crop: spaces in the class become underscores
pub fn crop_file_name(class_name: &str, timestamp_ms: i64, index: usize) -> String {
    format!("{}_{}_{}.jpg", class_name.replace(' ', "_"), timestamp_ms, index)
}

/// Records at or above `MIN_CONFIDENCE`, in detector order
pub fn confident_records(records: Vec<DetectionRecord>) -> Vec<DetectionRecord> {
    let total = records.len();
    let kept: Vec<DetectionRecord> = records
        .into_iter()
        .filter(|r| r.confidence >= MIN_CONFIDENCE)
        .collect();
    if kept.len() < total {
        debug!("Dropped {} detections below {}", total - kept.len(), MIN_CONFIDENCE);
    }
    kept
}

/// Save crops for every eligible record into `dir`
///
/// A record is eligible when it has a box, passes `MIN_CONFIDENCE`, and its
/// lower-cased class is in the crop vocabulary. Write failures are logged and
/// the crop is skipped.
pub fn save_crops(image: &DynamicImage, records: &[DetectionRecord], dir: &Path) -> Vec<BoundingBoxCrop> {
    let mut crops = Vec::new();

    for record in records {
        let (Some(class_name), Some(bbox)) = (record.class_name.as_deref(), record.bounding_box.as_ref()) else {
            continue;
        };
        if record.confidence < MIN_CONFIDENCE || !is_crop_class(&class_name.to_lowercase()) {
            continue;
        }
        let Some((x, y, w, h)) = clamp_box(bbox, image.width(), image.height()) else {
            debug!("Skipping undersized {} box {:?}", class_name, bbox);
            continue;
        };

        let timestamp_ms = chrono::Utc::now().timestamp_millis();
        let path: PathBuf = dir.join(crop_file_name(class_name, timestamp_ms, crops.len()));
        let region = image.crop_imm(x, y, w, h).to_rgb8();

        match region.save_with_format(&path, ImageFormat::Jpeg) {
            Ok(()) => {
                debug!("Saved {} bounding box at {}", class_name, path.display());
                crops.push(BoundingBoxCrop {
                    path,
                    class_name: class_name.to_string(),
                    timestamp_ms,
                });
            }
            Err(e) => warn!("Failed to save {} crop to {}: {}", class_name, path.display(), e),
        }
    }

    crops
}
