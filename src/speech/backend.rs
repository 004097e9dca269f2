// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! TTS collaborator trait and its sidecar client

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

/// Errors from any tier of speech synthesis
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("TTS request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("TTS service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("TTS service returned no audio")]
    EmptyAudio,

    #[error("Audio processing failed: {0}")]
    Processing(String),

    #[error("Audio file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No usable audio artifact at {0}")]
    MissingArtifact(String),

    #[error("Invalid audio file name: {0}")]
    InvalidFileName(String),
}

/// Trait for text-to-speech engines
///
/// Returns encoded MP3 bytes for `text`.
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Bytes, SynthesisError>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    language: &'a str,
    response_format: &'a str,
}

/// Client for a TTS sidecar speaking the OpenAI `/v1/audio/speech` shape
pub struct TtsClient {
    client: Client,
    endpoint: String,
    model_name: String,
}

impl TtsClient {
    pub fn new(endpoint: &str, model_name: &str) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(120)).build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!("TTS client configured: endpoint={}, model={}", endpoint, model_name);

        Ok(Self {
            client,
            endpoint,
            model_name: model_name.to_string(),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Check if the TTS sidecar is healthy
    pub async fn health_check(&self) -> bool {
        match self.client.get(format!("{}/health", self.endpoint)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!("TTS health check failed: {}", e);
                false
            }
        }
    }
}

#[async_trait]
impl SpeechBackend for TtsClient {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Bytes, SynthesisError> {
        let start = std::time::Instant::now();
        let request = SpeechRequest {
            model: &self.model_name,
            input: text,
            language,
            response_format: "mp3",
        };

        let response = self
            .client
            .post(format!("{}/v1/audio/speech", self.endpoint))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Status { status, body });
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(SynthesisError::EmptyAudio);
        }

        debug!(
            "Synthesized {} chars into {} bytes in {}ms",
            text.len(),
            audio.len(),
            start.elapsed().as_millis()
        );
        Ok(audio)
    }

    fn name(&self) -> &'static str {
        "tts-sidecar"
    }
}
