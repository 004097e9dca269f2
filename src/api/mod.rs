// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod server;
pub mod upload_frame;

pub use errors::{ApiError, ErrorResponse};
pub use server::{create_router, serve, AppState, HealthResponse};
pub use upload_frame::{upload_frame_handler, UPLOAD_FIELD};
