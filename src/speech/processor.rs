// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Playback-speed adjustment of synthesized audio

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::backend::SynthesisError;

/// Default playback speed-up applied to spoken descriptions
pub const DEFAULT_SPEED_FACTOR: f32 = 1.5;

/// Range a single `atempo` filter accepts
const ATEMPO_RANGE: std::ops::RangeInclusive<f32> = 0.5..=2.0;

/// Trait for audio post-processors
#[async_trait]
pub trait AudioProcessor: Send + Sync {
    /// Re-encode `input` into `output` played back `factor` times faster
    async fn change_speed(&self, input: &Path, output: &Path, factor: f32) -> Result<(), SynthesisError>;

    fn name(&self) -> &'static str;
}

/// Speed adjustment through an external `ffmpeg` binary
pub struct FfmpegProcessor {
    binary: String,
}

impl FfmpegProcessor {
    pub fn new(binary: impl Into<String>) -> Self {
        Self { binary: binary.into() }
    }
}

impl Default for FfmpegProcessor {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

#[async_trait]
impl AudioProcessor for FfmpegProcessor {
    async fn change_speed(&self, input: &Path, output: &Path, factor: f32) -> Result<(), SynthesisError> {
        if !ATEMPO_RANGE.contains(&factor) {
            return Err(SynthesisError::Processing(format!(
                "speed factor {} outside {:?}",
                factor, ATEMPO_RANGE
            )));
        }

        let filter = format!("atempo={}", factor);
        let mut cmd = Command::new(&self.binary);
        cmd.arg("-y")
            .args(["-hide_banner", "-loglevel", "error"])
            .arg("-i")
            .arg(input)
            .args(["-filter:a", &filter, "-vn"])
            .arg(output)
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        debug!("FFmpeg command: {:?}", cmd);

        let result = cmd
            .output()
            .await
            .map_err(|e| SynthesisError::Processing(format!("failed to run {}: {}", self.binary, e)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(SynthesisError::Processing(format!(
                "ffmpeg exited with {:?}: {}",
                result.status.code(),
                stderr.trim()
            )));
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "ffmpeg"
    }
}
