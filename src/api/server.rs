// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use axum::{
    extract::{DefaultBodyLimit, State},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

use super::upload_frame::upload_frame_handler;
use crate::pipeline::{CollaboratorNames, FramePipeline, DETECTED_URL, STATIC_URL};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<FramePipeline>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Build string, date and feature list
    pub build: serde_json::Value,
    pub collaborators: CollaboratorNames,
}

/// Build the router: API routes, artifact mounts, CORS and request tracing
pub fn create_router(pipeline: Arc<FramePipeline>, max_upload_bytes: usize) -> Router {
    let layout = pipeline.layout().clone();
    let state = AppState { pipeline };

    Router::new()
        .route("/upload-frame", post(upload_frame_handler))
        .route("/health", get(health_handler))
        .nest_service(STATIC_URL, ServeDir::new(layout.static_dir()))
        .nest_service(DETECTED_URL, ServeDir::new(layout.detected_dir()))
        .nest_service("/output_frames", ServeDir::new(layout.output_frames_dir()))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: crate::version::VERSION_NUMBER.to_string(),
        build: crate::version::get_version_info(),
        collaborators: state.pipeline.collaborators(),
    })
}

/// Serve `router` on `addr` until Ctrl+C
pub async fn serve(router: Router, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
