// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Speech synthesis with its fallback chain
//!
//! Raw TTS output lands in a temp file, gets sped up into the final file, and
//! is copied verbatim when the speed-up fails. Only a final file that exists
//! and has content is ever referenced.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::backend::{SpeechBackend, SynthesisError};
use super::processor::AudioProcessor;

/// URL prefix the audio directory is served under
pub const AUDIO_URL: &str = "/static/audio";

/// Language passed to the TTS engine
pub const SPEECH_LANGUAGE: &str = "en";

/// Trait for whatever turns a description into a served audio file
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` and return the artifact URL
    ///
    /// `file_name` overrides the default `description_<ms>.mp3`.
    async fn synthesize(&self, text: &str, file_name: Option<&str>) -> Result<String, SynthesisError>;

    fn name(&self) -> &'static str;
}

/// TTS backend plus speed-up, writing into one audio directory
pub struct SpeechService {
    backend: Arc<dyn SpeechBackend>,
    processor: Arc<dyn AudioProcessor>,
    audio_dir: PathBuf,
    speed_factor: f32,
}

/// True when `path` is a regular file with at least one byte
async fn has_content(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false)
}

/// Reject names that would escape the audio directory
fn validate_file_name(name: &str) -> Result<&str, SynthesisError> {
    let is_plain = Path::new(name).file_name().map(|n| n == name).unwrap_or(false);
    if name.is_empty() || !is_plain {
        return Err(SynthesisError::InvalidFileName(name.to_string()));
    }
    Ok(name)
}

impl SpeechService {
    pub fn new(
        backend: Arc<dyn SpeechBackend>,
        processor: Arc<dyn AudioProcessor>,
        audio_dir: PathBuf,
        speed_factor: f32,
    ) -> Self {
        Self {
            backend,
            processor,
            audio_dir,
            speed_factor,
        }
    }

    pub fn audio_dir(&self) -> &Path {
        &self.audio_dir
    }

    /// Speed up `temp` into `target`, copying it verbatim when that fails
    async fn finalize(&self, temp: &Path, target: &Path) -> Result<(), SynthesisError> {
        match self.processor.change_speed(temp, target, self.speed_factor).await {
            Ok(()) if has_content(target).await => {
                debug!("Audio sped up {}x by {}", self.speed_factor, self.processor.name());
                return Ok(());
            }
            Ok(()) => warn!(
                "{} reported success but left no audio at {}",
                self.processor.name(),
                target.display()
            ),
            Err(e) => warn!("Speed adjustment failed, using raw audio: {}", e),
        }

        tokio::fs::copy(temp, target).await?;
        Ok(())
    }
}

#[async_trait]
impl SpeechSynthesizer for SpeechService {
    async fn synthesize(&self, text: &str, file_name: Option<&str>) -> Result<String, SynthesisError> {
        let millis = chrono::Utc::now().timestamp_millis();
        let final_name = match file_name {
            Some(name) => validate_file_name(name)?.to_string(),
            None => format!("description_{}.mp3", millis),
        };
        let temp_path = self.audio_dir.join(format!("temp_{}.mp3", millis));
        let final_path = self.audio_dir.join(&final_name);

        let audio = self.backend.synthesize(text, SPEECH_LANGUAGE).await?;
        if audio.is_empty() {
            return Err(SynthesisError::EmptyAudio);
        }
        tokio::fs::write(&temp_path, &audio).await?;

        let outcome = if has_content(&temp_path).await {
            self.finalize(&temp_path, &final_path).await
        } else {
            Err(SynthesisError::MissingArtifact(temp_path.display().to_string()))
        };

        if let Err(e) = tokio::fs::remove_file(&temp_path).await {
            warn!("Could not remove temp audio {}: {}", temp_path.display(), e);
        }
        outcome?;

        if !has_content(&final_path).await {
            let _ = tokio::fs::remove_file(&final_path).await;
            return Err(SynthesisError::MissingArtifact(final_path.display().to_string()));
        }

        info!("Audio ready: {} ({})", final_name, self.backend.name());
        Ok(format!("{}/{}", AUDIO_URL, final_name))
    }

    fn name(&self) -> &'static str {
        "speech-service"
    }
}
