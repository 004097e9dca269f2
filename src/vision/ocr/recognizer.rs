// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text recognizer trait definition

use std::path::Path;

use async_trait::async_trait;

/// Trait for OCR engines
///
/// Recognizers take a crop on disk and return whatever text they can find.
/// An empty string means "no text"; an error means the engine failed.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Extract text from a crop image
    async fn recognize(&self, crop: &Path) -> anyhow::Result<String>;

    /// Engine name for logging
    fn name(&self) -> &'static str;
}
