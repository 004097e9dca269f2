// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// tests/common/mod.rs - Fake collaborators shared by the integration suites

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use assistive_vision_node::{
    pipeline::{ArtifactLayout, FramePipeline},
    speech::{SpeechSynthesizer, SynthesisError},
    vision::{
        detection::{
            crops::{confident_records, save_crops},
            BoundingBox, DetectionError, DetectionRecord, DetectorOutput,
            ObjectDetector, RawDetections,
        },
        ocr::TextRecognizer,
        stepcount::{StepCountError, StepCounter, StepMeasurement, StepMeasurements},
    },
};
use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

/// A 64x64 PNG frame
pub fn png_frame() -> Vec<u8> {
    let img = RgbImage::from_pixel(64, 64, Rgb([120, 120, 120]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

pub fn record(class_name: &str, confidence: f32, bbox: [f32; 4]) -> DetectionRecord {
    DetectionRecord::new(class_name, confidence, Some(BoundingBox::from(bbox)))
}

/// Detector returning canned output and cutting real crops from the frame
pub struct FakeDetector {
    pub raw: RawDetections,
    pub boxes: Vec<DetectionRecord>,
    pub crop_dir: PathBuf,
    pub fail: bool,
}

impl FakeDetector {
    /// Per-box output, filtered by confidence the way the real client does
    pub fn records(records: Vec<DetectionRecord>, crop_dir: PathBuf) -> Self {
        let records = confident_records(records);
        Self {
            raw: RawDetections::Records(records.clone()),
            boxes: records,
            crop_dir,
            fail: false,
        }
    }

    pub fn failing(crop_dir: PathBuf) -> Self {
        Self {
            raw: RawDetections::default(),
            boxes: Vec::new(),
            crop_dir,
            fail: true,
        }
    }
}

#[async_trait]
impl ObjectDetector for FakeDetector {
    async fn detect(&self, image: &DynamicImage, _encoded: &[u8]) -> Result<DetectorOutput, DetectionError> {
        if self.fail {
            return Err(DetectionError::Unavailable("fake detector down".to_string()));
        }
        Ok(DetectorOutput {
            raw: self.raw.clone(),
            crops: save_crops(image, &self.boxes, &self.crop_dir),
        })
    }

    fn name(&self) -> &'static str {
        "fake-detector"
    }
}

/// Recognizer answering by crop-name prefix; unknown prefixes fail
#[derive(Default)]
pub struct FakeRecognizer {
    pub texts: HashMap<String, String>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeRecognizer {
    pub fn with(pairs: &[(&str, &str)]) -> Self {
        Self {
            texts: pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TextRecognizer for FakeRecognizer {
    async fn recognize(&self, crop: &Path) -> anyhow::Result<String> {
        let name = crop.file_name().unwrap().to_string_lossy().into_owned();
        self.calls.lock().unwrap().push(name.clone());
        self.texts
            .iter()
            .find(|(prefix, _)| name.starts_with(prefix.as_str()))
            .map(|(_, text)| text.clone())
            .ok_or_else(|| anyhow::anyhow!("no text for {}", name))
    }

    fn name(&self) -> &'static str {
        "fake-ocr"
    }
}

/// Step counter reporting a fixed count per stair crop, or failing
pub struct FakeStepCounter {
    pub steps: u32,
    pub fail: bool,
    pub calls: Mutex<usize>,
}

impl FakeStepCounter {
    pub fn counting(steps: u32) -> Self {
        Self {
            steps,
            fail: false,
            calls: Mutex::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            steps: 0,
            fail: true,
            calls: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl StepCounter for FakeStepCounter {
    async fn count_steps(&self, crops: &[PathBuf]) -> Result<StepMeasurements, StepCountError> {
        *self.calls.lock().unwrap() += 1;
        if self.fail {
            return Err(StepCountError::ModelUnavailable("fake weights missing".to_string()));
        }
        Ok(crops
            .iter()
            .filter(|p| p.to_string_lossy().contains("stair"))
            .map(|p| {
                (
                    p.clone(),
                    StepMeasurement {
                        step_count: self.steps,
                        confidence: 0.9,
                        annotated_image: None,
                    },
                )
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "fake-step-counter"
    }
}

/// Synthesizer writing the text itself as the "audio"
pub struct FakeSpeech {
    pub audio_dir: PathBuf,
    pub fail: bool,
    pub spoken: Mutex<Vec<String>>,
}

impl FakeSpeech {
    pub fn new(audio_dir: PathBuf) -> Self {
        Self {
            audio_dir,
            fail: false,
            spoken: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(audio_dir: PathBuf) -> Self {
        Self {
            fail: true,
            ..Self::new(audio_dir)
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for FakeSpeech {
    async fn synthesize(&self, text: &str, file_name: Option<&str>) -> Result<String, SynthesisError> {
        self.spoken.lock().unwrap().push(text.to_string());
        if self.fail {
            return Err(SynthesisError::EmptyAudio);
        }
        let name = file_name.unwrap_or("description_test.mp3").to_string();
        tokio::fs::write(self.audio_dir.join(&name), text.as_bytes()).await?;
        Ok(format!("/static/audio/{}", name))
    }

    fn name(&self) -> &'static str {
        "fake-speech"
    }
}

/// Collaborators plus the pipeline built from them
pub struct Harness {
    pub root: tempfile::TempDir,
    pub layout: ArtifactLayout,
    pub recognizer: Arc<FakeRecognizer>,
    pub step_counter: Arc<FakeStepCounter>,
    pub speech: Arc<FakeSpeech>,
    pub pipeline: Arc<FramePipeline>,
}

pub struct HarnessBuilder {
    root: tempfile::TempDir,
    records: Vec<DetectionRecord>,
    raw: Option<RawDetections>,
    detector_fails: bool,
    recognizer: FakeRecognizer,
    step_counter: FakeStepCounter,
    speech_fails: bool,
}

impl HarnessBuilder {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
            records: Vec::new(),
            raw: None,
            detector_fails: false,
            recognizer: FakeRecognizer::default(),
            step_counter: FakeStepCounter::counting(0),
            speech_fails: false,
        }
    }

    pub fn records(mut self, records: Vec<DetectionRecord>) -> Self {
        self.records = records;
        self
    }

    /// Report `raw` to the adapter while still cropping `records`
    pub fn raw(mut self, raw: RawDetections) -> Self {
        self.raw = Some(raw);
        self
    }

    pub fn detector_fails(mut self) -> Self {
        self.detector_fails = true;
        self
    }

    pub fn recognizer(mut self, recognizer: FakeRecognizer) -> Self {
        self.recognizer = recognizer;
        self
    }

    pub fn step_counter(mut self, counter: FakeStepCounter) -> Self {
        self.step_counter = counter;
        self
    }

    pub fn speech_fails(mut self) -> Self {
        self.speech_fails = true;
        self
    }

    pub fn build(self) -> Harness {
        let layout = ArtifactLayout::new(self.root.path());
        std::fs::create_dir_all(layout.audio_dir()).unwrap();
        std::fs::create_dir_all(layout.detected_dir()).unwrap();

        let detector = if self.detector_fails {
            FakeDetector::failing(layout.detected_dir())
        } else {
            let mut detector = FakeDetector::records(self.records, layout.detected_dir());
            if let Some(raw) = self.raw {
                detector.raw = raw;
            }
            detector
        };

        let recognizer = Arc::new(self.recognizer);
        let step_counter = Arc::new(self.step_counter);
        let speech = Arc::new(if self.speech_fails {
            FakeSpeech::failing(layout.audio_dir())
        } else {
            FakeSpeech::new(layout.audio_dir())
        });

        let pipeline = Arc::new(FramePipeline::new(
            Arc::new(detector),
            recognizer.clone(),
            step_counter.clone(),
            speech.clone(),
            layout.clone(),
        ));

        Harness {
            root: self.root,
            layout,
            recognizer,
            step_counter,
            speech,
            pipeline,
        }
    }
}
