// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use assistive_vision_node::{
    api::{create_router, serve},
    config::NodeConfig,
    pipeline::FramePipeline,
    speech::{FfmpegProcessor, SpeechService, TtsClient},
    vision::{detection::DetectorClient, ocr::VlmOcrClient, stepcount::StepCountClient},
};
use clap::Parser;
use std::{env, sync::Arc};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    info!("Starting {}", assistive_vision_node::version::get_version_string());

    let config = NodeConfig::parse();
    let layout = config.layout();
    layout.ensure_dirs().await?;

    let detector = DetectorClient::new(
        &config.detector_endpoint,
        &config.detector_model,
        layout.detected_dir(),
    )?;
    let recognizer = VlmOcrClient::new(&config.ocr_endpoint, &config.ocr_model)?;
    let step_counter = StepCountClient::new(
        &config.step_count_endpoint,
        &config.step_count_model,
        layout.output_frames_dir(),
    )?;
    let tts = TtsClient::new(&config.tts_endpoint, &config.tts_model)?;

    // Sidecars may come up after the node; requests degrade until they do
    if !detector.health_check().await {
        warn!("Detector sidecar at {} is not reachable yet", config.detector_endpoint);
    }
    if !recognizer.health_check().await {
        warn!("OCR sidecar at {} is not reachable yet", config.ocr_endpoint);
    }
    if !step_counter.health_check().await {
        warn!("Step-count sidecar at {} is not reachable yet", config.step_count_endpoint);
    }
    if !tts.health_check().await {
        warn!("TTS sidecar at {} is not reachable yet", config.tts_endpoint);
    }

    let speech = SpeechService::new(
        Arc::new(tts),
        Arc::new(FfmpegProcessor::new(config.ffmpeg_path.clone())),
        layout.audio_dir(),
        config.speech_speed,
    );

    let pipeline = Arc::new(FramePipeline::new(
        Arc::new(detector),
        Arc::new(recognizer),
        Arc::new(step_counter),
        Arc::new(speech),
        layout,
    ));

    let router = create_router(pipeline, config.max_upload_bytes);
    serve(router, config.listen_addr()?).await?;

    info!("Node stopped");
    Ok(())
}
