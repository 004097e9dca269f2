// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Frame pipeline: specialist dispatch, artifact layout and the per-frame
//! orchestration tying the vision, scene and speech stages together.

pub mod dispatch;
pub mod frame;
pub mod layout;
pub mod report;

pub use dispatch::{detected_stairs, dispatch_ocr, dispatch_step_count};
pub use frame::{CollaboratorNames, FramePipeline, PipelineError};
pub use layout::{ArtifactLayout, DETECTED_URL, STATIC_URL};
pub use report::{FrameReport, FRAME_PROCESSED};
