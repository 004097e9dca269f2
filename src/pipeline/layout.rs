// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! On-disk artifact directories and the URLs they are served under

use std::path::{Path, PathBuf};

use tracing::info;

/// URL prefix for the static root (audio lives under `/static/audio`)
pub const STATIC_URL: &str = "/static";
/// URL prefix for saved crops
pub const DETECTED_URL: &str = "/detected";

/// Directory layout under one artifact root
///
/// ```text
/// <root>/static/audio/*.mp3
/// <root>/detected/*.jpg
/// <root>/output_frames/*.jpg
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    root: PathBuf,
}

impl ArtifactLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn static_dir(&self) -> PathBuf {
        self.root.join("static")
    }

    pub fn audio_dir(&self) -> PathBuf {
        self.static_dir().join("audio")
    }

    pub fn detected_dir(&self) -> PathBuf {
        self.root.join("detected")
    }

    pub fn output_frames_dir(&self) -> PathBuf {
        self.root.join("output_frames")
    }

    /// Create every artifact directory that does not exist yet
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        for dir in [self.audio_dir(), self.detected_dir(), self.output_frames_dir()] {
            tokio::fs::create_dir_all(&dir).await?;
        }
        info!("Artifact directories ready under {}", self.root.display());
        Ok(())
    }

    /// Map a served URL like `/static/audio/x.mp3` back to its file
    ///
    /// Returns `None` for URLs outside the static mount.
    pub fn static_path_for(&self, url: &str) -> Option<PathBuf> {
        let relative = url.strip_prefix(STATIC_URL)?.strip_prefix('/')?;
        if relative.split('/').any(|part| part.is_empty() || part == "..") {
            return None;
        }
        Some(self.static_dir().join(relative))
    }
}

impl Default for ArtifactLayout {
    fn default() -> Self {
        Self::new(".")
    }
}
