// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Signboard OCR
//!
//! Components:
//! - `recognizer` - Collaborator trait for OCR engines
//! - `client` - VLM sidecar implementation
//! - `dispatch` - Picks signboard/banner crops and collects their text

pub mod client;
pub mod dispatch;
pub mod recognizer;

pub use client::VlmOcrClient;
pub use dispatch::{read_signboards, OcrResults};
pub use recognizer::TextRecognizer;
