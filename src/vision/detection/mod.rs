// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Object detection: collaborator client, crop extraction and the adapter
//! that reduces either detector output shape to one count map.

pub mod adapter;
pub mod client;
pub mod crops;
pub mod detector;
pub mod types;

pub use adapter::{normalize, NormalizedDetections};
pub use client::DetectorClient;
pub use detector::{DetectionError, ObjectDetector};
pub use types::{
    BoundingBox, BoundingBoxCrop, ClassCount, ClassCounts, DetectionRecord, DetectionsView,
    DetectorOutput, ObjectCountMap, RawDetections,
};
