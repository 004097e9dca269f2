// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! VLM sidecar client for signboard OCR via OpenAI-compatible API

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use tracing::{debug, info};

use super::recognizer::TextRecognizer;
use crate::vision::image_utils::{detect_format, format_to_extension};

// --- OpenAI-compatible serde structs ---

#[derive(serde::Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(serde::Serialize)]
struct ChatMessage {
    role: String,
    content: serde_json::Value,
}

#[derive(serde::Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(serde::Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(serde::Deserialize)]
struct ChatResponseMessage {
    content: String,
}

const OCR_PROMPT: &str = "Read all text on this sign or banner. Return only the text, one line per line on the sign. If no text is found, respond with an empty string.";

/// Join recognized lines into one string
///
/// Lines are trimmed and blank ones dropped; the rest are joined with a
/// single space.
pub fn join_lines(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text recognizer backed by a VLM sidecar
pub struct VlmOcrClient {
    client: Client,
    endpoint: String,
    model_name: String,
}

impl VlmOcrClient {
    /// Create a new VLM OCR client
    pub fn new(endpoint: &str, model_name: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!(
            "OCR client configured: endpoint={}, model={}",
            endpoint, model_name
        );

        Ok(Self {
            client,
            endpoint,
            model_name: model_name.to_string(),
        })
    }

    /// Get the model name
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Check if the VLM sidecar is healthy
    pub async fn health_check(&self) -> bool {
        match self
            .client
            .get(format!("{}/health", self.endpoint))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!("OCR health check failed: {}", e);
                false
            }
        }
    }

    fn build_request(&self, data_url: String) -> ChatRequest {
        ChatRequest {
            model: self.model_name.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: serde_json::json!([
                    {"type": "text", "text": OCR_PROMPT},
                    {"type": "image_url", "image_url": {"url": data_url}}
                ]),
            }],
            max_tokens: 512,
            temperature: 0.1,
        }
    }
}

#[async_trait]
impl TextRecognizer for VlmOcrClient {
    async fn recognize(&self, crop: &Path) -> Result<String> {
        let start = std::time::Instant::now();
        let bytes = tokio::fs::read(crop)
            .await
            .with_context(|| format!("reading crop {}", crop.display()))?;
        let format = detect_format(&bytes)?;
        let data_url = format!(
            "data:image/{};base64,{}",
            format_to_extension(format),
            STANDARD.encode(&bytes)
        );

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.endpoint))
            .json(&self.build_request(data_url))
            .send()
            .await?
            .error_for_status()?;

        let chat_response: ChatResponse = response.json().await?;
        let text = chat_response
            .choices
            .first()
            .map(|c| join_lines(&c.message.content))
            .unwrap_or_default();

        debug!(
            "OCR on {} took {}ms: {:?}",
            crop.display(),
            start.elapsed().as_millis(),
            text
        );
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "vlm-ocr"
    }
}
