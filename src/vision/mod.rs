// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision collaborators and the logic that arbitrates their results
//!
//! This module provides:
//! - Object detection plus the adapter that normalizes its output
//! - Signboard OCR over saved crops
//! - Stair step counting over saved crops
//!
//! Inference itself runs in sidecar services; these types only talk to them.

pub mod detection;
pub mod image_utils;
pub mod ocr;
pub mod stepcount;
pub mod vocabulary;

pub use image_utils::{decode_frame, detect_format, FrameInfo, ImageError};
