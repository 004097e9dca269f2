// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Frame upload endpoint
//!
//! Accepts a camera frame and returns the full per-frame report.

mod handler;

pub use handler::{upload_frame_handler, UPLOAD_FIELD};
