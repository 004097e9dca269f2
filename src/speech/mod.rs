// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Speech synthesis dispatch
//!
//! Components:
//! - `backend` - TTS collaborator trait and sidecar client
//! - `processor` - Playback speed-up via ffmpeg
//! - `service` - Fallback chain producing the served audio file

pub mod backend;
pub mod processor;
pub mod service;

pub use backend::{SpeechBackend, SynthesisError, TtsClient};
pub use processor::{AudioProcessor, FfmpegProcessor, DEFAULT_SPEED_FACTOR};
pub use service::{SpeechService, SpeechSynthesizer, AUDIO_URL};
