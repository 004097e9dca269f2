// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Stair step counting
//!
//! Only dispatched when the frame contains a stair class. The counter sees
//! every crop and measures the stair ones; a failed run yields no summary.

pub mod annotate;
pub mod client;
pub mod counter;
pub mod summary;

pub use client::StepCountClient;
pub use counter::{select_stair_crops, StepCountError, StepCounter, StepMeasurement, StepMeasurements};
pub use summary::{StairInfo, StepCountSummary};
