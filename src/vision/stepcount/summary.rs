// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Step-count summary returned to the API caller and fed to the composer

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::counter::{StepMeasurement, StepMeasurements};

/// URL prefix the annotated images are served under
pub const OUTPUT_FRAMES_URL: &str = "/output_frames";

/// One stair crop's result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StairInfo {
    pub stair_type: String,
    pub step_count: u32,
    pub confidence: f32,
    pub annotated_image: Option<String>,
}

/// Formatted step-count results; only built when the specialist succeeded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepCountSummary {
    pub status: String,
    pub stairs_detected: bool,
    pub results: Vec<StairInfo>,
}

/// Stair type from a crop path: the first underscore token of the file stem
///
/// `detected/wooden_stairs_1700000000000_0.jpg` gives `wooden`.
pub fn stair_type_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy())
        .and_then(|stem| stem.split('_').next().map(str::to_string))
        .unwrap_or_default()
}

impl StepCountSummary {
    /// Build the summary from a successful step-count run
    ///
    /// Each crop path yields one result; a repeated path keeps its first
    /// position and its last measurement.
    pub fn from_measurements(measurements: &StepMeasurements) -> Self {
        let mut unique: Vec<(&Path, &StepMeasurement)> = Vec::with_capacity(measurements.len());
        for (path, m) in measurements {
            match unique.iter_mut().find(|(seen, _)| *seen == path.as_path()) {
                Some(entry) => entry.1 = m,
                None => unique.push((path.as_path(), m)),
            }
        }

        let results = unique
            .into_iter()
            .map(|(path, m)| StairInfo {
                stair_type: stair_type_from_path(path),
                step_count: m.step_count,
                confidence: m.confidence,
                annotated_image: m
                    .annotated_image
                    .as_ref()
                    .and_then(|p| p.file_name())
                    .map(|name| format!("{}/{}", OUTPUT_FRAMES_URL, name.to_string_lossy())),
            })
            .collect();

        Self {
            status: "success".to_string(),
            stairs_detected: true,
            results,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}
