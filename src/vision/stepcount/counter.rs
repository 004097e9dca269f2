// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Step-count specialist trait and result types

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::vision::vocabulary::is_stair_crop;

/// Errors that abort a whole step-count run
///
/// Any of these means no step data reaches the description.
#[derive(Debug, Error)]
pub enum StepCountError {
    #[error("Step-count model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Step-count request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Step-count processing failed: {0}")]
    Processing(String),
}

/// Steps found on one stair crop
#[derive(Debug, Clone, PartialEq)]
pub struct StepMeasurement {
    pub step_count: u32,
    /// Confidence of the last counted step, 0.0 when none were counted
    pub confidence: f32,
    pub annotated_image: Option<PathBuf>,
}

/// Per-crop measurements in processing order
pub type StepMeasurements = Vec<(PathBuf, StepMeasurement)>;

/// Trait for stair step counters
///
/// Callers pass every crop of the frame. Implementations only measure the
/// ones whose file name marks them as stairs (see [`select_stair_crops`]) and
/// skip the rest without error.
#[async_trait]
pub trait StepCounter: Send + Sync {
    async fn count_steps(&self, crops: &[PathBuf]) -> Result<StepMeasurements, StepCountError>;

    fn name(&self) -> &'static str;
}

/// Crops a step counter should look at
pub fn select_stair_crops(crops: &[PathBuf]) -> Vec<&Path> {
    crops
        .iter()
        .filter(|p| {
            p.file_name()
                .map(|n| is_stair_crop(&n.to_string_lossy()))
                .unwrap_or(false)
        })
        .map(PathBuf::as_path)
        .collect()
}
