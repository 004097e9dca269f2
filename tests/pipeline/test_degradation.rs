// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Collaborator failures degrade the report instead of failing the frame

use assistive_vision_node::pipeline::PipelineError;
use assistive_vision_node::vision::detection::DetectionsView;
use assistive_vision_node::vision::ImageError;

use crate::common::{png_frame, record, FakeRecognizer, FakeStepCounter, HarnessBuilder};

#[tokio::test]
async fn test_step_count_failure_omits_step_data() {
    let harness = HarnessBuilder::new()
        .records(vec![
            record("staircase", 0.9, [0.0, 0.0, 40.0, 40.0]),
            record("door", 0.9, [40.0, 0.0, 64.0, 40.0]),
        ])
        .step_counter(FakeStepCounter::failing())
        .build();

    let report = harness.pipeline.process_frame(&png_frame()).await.unwrap();

    assert_eq!(harness.step_counter.call_count(), 1);
    assert!(report.step_count_results.is_none());
    assert_eq!(report.scene_description, "a staircase and a door ahead.");
}

#[tokio::test]
async fn test_ocr_failure_records_empty_text() {
    let harness = HarnessBuilder::new()
        .records(vec![record("sign board", 0.9, [0.0, 0.0, 40.0, 40.0])])
        .recognizer(FakeRecognizer::default())
        .build();

    let report = harness.pipeline.process_frame(&png_frame()).await.unwrap();

    assert_eq!(harness.recognizer.call_count(), 1);
    let ocr: Vec<(&str, &str)> = report.ocr_results.iter().collect();
    assert_eq!(ocr.len(), 1);
    assert_eq!(ocr[0].1, "");
    assert_eq!(report.scene_description, "Nothing relevant ahead.");
}

#[tokio::test]
async fn test_detector_failure_yields_empty_scene() {
    let harness = HarnessBuilder::new().detector_fails().build();

    let report = harness.pipeline.process_frame(&png_frame()).await.unwrap();

    assert_eq!(report.scene_description, "Nothing relevant ahead.");
    assert_eq!(report.detections, DetectionsView::Records(vec![]));
    assert!(report.bounding_box_images.is_empty());
    assert!(report.ocr_results.is_empty());
    assert!(report.audio_path.is_some());
}

#[tokio::test]
async fn test_speech_failure_keeps_description() {
    let harness = HarnessBuilder::new()
        .records(vec![record("elevator", 0.9, [0.0, 0.0, 40.0, 40.0])])
        .speech_fails()
        .build();

    let report = harness.pipeline.process_frame(&png_frame()).await.unwrap();

    assert_eq!(report.scene_description, "an elevator ahead.");
    assert!(report.audio_path.is_none());
    assert_eq!(harness.speech.spoken.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_image_is_rejected_before_any_stage() {
    let harness = HarnessBuilder::new()
        .records(vec![record("chair", 0.9, [0.0, 0.0, 40.0, 40.0])])
        .build();

    let result = harness.pipeline.process_frame(b"definitely not an image").await;

    assert!(matches!(
        result,
        Err(PipelineError::InvalidImage(ImageError::UnsupportedFormat))
    ));
    assert!(harness.speech.spoken.lock().unwrap().is_empty());
    assert_eq!(std::fs::read_dir(harness.layout.detected_dir()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_low_confidence_box_neither_counted_nor_cropped() {
    let harness = HarnessBuilder::new()
        .records(vec![
            record("chair", 0.1, [0.0, 0.0, 40.0, 40.0]),
            record("trash bin", 0.5, [0.0, 0.0, 3.0, 40.0]),
        ])
        .build();

    let report = harness.pipeline.process_frame(&png_frame()).await.unwrap();

    assert!(report.bounding_box_images.is_empty());
    assert_eq!(report.scene_description, "a trash bin ahead.");
}
