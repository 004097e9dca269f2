// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Node configuration
//!
//! Every value can come from a flag or an environment variable (a `.env`
//! file is loaded first in `main`). All fields have defaults so the node
//! starts against local sidecars with no configuration at all.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::pipeline::ArtifactLayout;
use crate::speech::DEFAULT_SPEED_FACTOR;

/// Assistive Vision Node
#[derive(Parser, Debug, Clone)]
#[command(name = "assistive-vision-node")]
#[command(version = crate::version::VERSION_NUMBER)]
#[command(about = "Frame-to-speech scene description service", long_about = None)]
pub struct NodeConfig {
    /// Address the HTTP server binds to
    #[arg(long, env = "NODE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// HTTP port
    #[arg(long, env = "API_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Object-detection sidecar
    #[arg(long, env = "DETECTOR_ENDPOINT", default_value = "http://localhost:8091")]
    pub detector_endpoint: String,

    #[arg(long, env = "DETECTOR_MODEL", default_value = "yolov8x-worldv2")]
    pub detector_model: String,

    /// OpenAI-compatible VLM sidecar used for signboard OCR
    #[arg(long, env = "OCR_ENDPOINT", default_value = "http://localhost:8081")]
    pub ocr_endpoint: String,

    #[arg(long, env = "OCR_MODEL", default_value = "qwen3-vl")]
    pub ocr_model: String,

    /// Step-detection sidecar
    #[arg(long, env = "STEP_COUNT_ENDPOINT", default_value = "http://localhost:8092")]
    pub step_count_endpoint: String,

    #[arg(long, env = "STEP_COUNT_MODEL", default_value = "stair-steps")]
    pub step_count_model: String,

    /// Text-to-speech sidecar
    #[arg(long, env = "TTS_ENDPOINT", default_value = "http://localhost:8093")]
    pub tts_endpoint: String,

    #[arg(long, env = "TTS_MODEL", default_value = "gtts")]
    pub tts_model: String,

    /// ffmpeg binary used for audio speed-up
    #[arg(long, env = "FFMPEG_PATH", default_value = "ffmpeg")]
    pub ffmpeg_path: String,

    /// Playback speed of the spoken description
    #[arg(long, env = "SPEECH_SPEED", default_value_t = DEFAULT_SPEED_FACTOR)]
    pub speech_speed: f32,

    /// Root holding static/, detected/ and output_frames/
    #[arg(long, env = "ARTIFACT_ROOT", default_value = ".")]
    pub artifact_root: PathBuf,

    /// Largest accepted upload body in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = 16 * 1024 * 1024)]
    pub max_upload_bytes: usize,
}

impl NodeConfig {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }

    pub fn layout(&self) -> ArtifactLayout {
        ArtifactLayout::new(&self.artifact_root)
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::parse_from(["assistive-vision-node"])
    }
}
