// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Router-level tests for /upload-frame, /health and the artifact mounts

use assistive_vision_node::api::create_router;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

use crate::common::{png_frame, record, FakeRecognizer, Harness, HarnessBuilder};

const BOUNDARY: &str = "----avn-test-boundary";
const UPLOAD_LIMIT: usize = 2 * 1024 * 1024;

fn multipart_body(field: &str, file_name: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/upload-frame")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn app(harness: &Harness) -> Router {
    create_router(harness.pipeline.clone(), UPLOAD_LIMIT)
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_upload_frame_success() {
    let harness = HarnessBuilder::new()
        .records(vec![
            record("chair", 0.9, [0.0, 0.0, 30.0, 30.0]),
            record("sign board", 0.9, [30.0, 30.0, 60.0, 60.0]),
        ])
        .recognizer(FakeRecognizer::with(&[("sign_board", "Exit")]))
        .build();

    let response = app(&harness)
        .oneshot(upload_request(multipart_body("file", "frame.png", &png_frame())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["message"], "Frame processed successfully");
    assert_eq!(json["scene_description"], "a chair ahead. Signboard reads 'Exit'.");
    assert_eq!(json["bounding_box_images"].as_array().unwrap().len(), 2);
    assert_eq!(json["audio_path"], "/static/audio/description_test.mp3");
    assert!(json["step_count_results"].is_null());
    assert_eq!(json["detections"][0]["class"], "chair");
}

#[tokio::test]
async fn test_upload_frame_invalid_image() {
    let harness = HarnessBuilder::new().build();

    let response = app(&harness)
        .oneshot(upload_request(multipart_body("file", "frame.png", b"not an image")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["message"], "Invalid image format");
    assert_eq!(json["error_type"], "invalid_image");
    assert!(json["request_id"].as_str().is_some());
}

#[tokio::test]
async fn test_upload_frame_missing_file_field() {
    let harness = HarnessBuilder::new().build();

    let response = app(&harness)
        .oneshot(upload_request(multipart_body("image", "frame.png", &png_frame())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error_type"], "validation_error");
    assert_eq!(json["details"]["field"], "file");
}

#[tokio::test]
async fn test_upload_frame_empty_file_name() {
    let harness = HarnessBuilder::new().build();

    let response = app(&harness)
        .oneshot(upload_request(multipart_body("file", "", &png_frame())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["message"], "No selected file");
}

#[tokio::test]
async fn test_upload_frame_rejects_get() {
    let harness = HarnessBuilder::new().build();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/upload-frame")
        .body(Body::empty())
        .unwrap();
    let response = app(&harness).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_health_reports_collaborators() {
    let harness = HarnessBuilder::new().build();

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app(&harness).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], "1.0.0");
    assert_eq!(json["build"]["version"], json["version"]);
    assert!(json["build"]["features"]
        .as_array()
        .unwrap()
        .iter()
        .any(|f| f == "speech-synthesis"));
    assert_eq!(json["collaborators"]["detector"], "fake-detector");
    assert_eq!(json["collaborators"]["speech"], "fake-speech");
}

#[tokio::test]
async fn test_generated_audio_is_served() {
    let harness = HarnessBuilder::new()
        .records(vec![record("door", 0.9, [0.0, 0.0, 30.0, 30.0])])
        .build();
    let router = app(&harness);

    let upload = router
        .clone()
        .oneshot(upload_request(multipart_body("file", "frame.png", &png_frame())))
        .await
        .unwrap();
    let audio_path = json_body(upload).await["audio_path"].as_str().unwrap().to_string();

    let request = Request::builder().uri(&audio_path).body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"a door ahead.");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let harness = HarnessBuilder::new().build();

    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://phone.local")
        .body(Body::empty())
        .unwrap();
    let response = app(&harness).oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
