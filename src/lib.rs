// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod pipeline;
pub mod scene;
pub mod speech;
pub mod version;
pub mod vision;

pub use config::NodeConfig;
pub use pipeline::{ArtifactLayout, FramePipeline, FrameReport, PipelineError};
pub use scene::{compose_description, SceneInputs};
pub use speech::{SpeechService, SpeechSynthesizer, SynthesisError};
pub use vision::detection::{normalize, ObjectCountMap, ObjectDetector, RawDetections};
pub use vision::ocr::{OcrResults, TextRecognizer};
pub use vision::stepcount::{StepCountSummary, StepCounter};
