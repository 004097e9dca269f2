// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Frame upload endpoint handler

use axum::{extract::State, Json};
use axum_extra::extract::Multipart;
use bytes::Bytes;
use tracing::{debug, info};

use crate::api::errors::ApiError;
use crate::api::server::AppState;
use crate::pipeline::FrameReport;

/// Multipart field carrying the frame
pub const UPLOAD_FIELD: &str = "file";

/// POST /upload-frame - Describe one camera frame
///
/// # Request
/// Multipart form with the image in the `file` field.
///
/// # Response
/// - `message`: "Frame processed successfully"
/// - `detections`: Detector output, counts rendered as `{class, count}` rows
/// - `bounding_box_images`: `/detected/<name>` per saved crop
/// - `ocr_results`: Crop file name to signboard text
/// - `step_count_results`: Stair summary, `null` without stairs or on failure
/// - `scene_description`: The spoken sentences
/// - `audio_path`: `/static/audio/<name>`, `null` when synthesis failed
///
/// # Errors
/// - 400 Bad Request: Missing `file` field, empty file name, or undecodable image
/// - 500 Internal Server Error: Anything else
pub async fn upload_frame_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<FrameReport>, ApiError> {
    let mut frame: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        if field.file_name().map(str::is_empty).unwrap_or(false) {
            return Err(ApiError::ValidationError {
                field: UPLOAD_FIELD.to_string(),
                message: "No selected file".to_string(),
            });
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidRequest(format!("Failed to read upload: {}", e)))?;
        frame = Some(data);
        break;
    }

    let bytes = frame.ok_or_else(|| ApiError::ValidationError {
        field: UPLOAD_FIELD.to_string(),
        message: "No file part in the request".to_string(),
    })?;
    debug!("Received frame upload: {} bytes", bytes.len());

    let report = state.pipeline.process_frame(&bytes).await?;

    info!(
        "Frame described: {} crops, audio={}",
        report.bounding_box_images.len(),
        report.audio_path.as_deref().unwrap_or("none")
    );
    Ok(Json(report))
}
