//! HTTP handlers, one module per resource.
//!
//! Handlers log collaborator failures in full and return a generic message;
//! only validation errors describe the problem to the client.

mod chat;
pub mod doc;
mod files;
mod health;
mod search;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::pipeline::PipelineStep;

// ── Error body ───────────────────────────────────────────────────

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: String,
    /// Upload step that failed, for upload errors only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<PipelineStep>,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(&'static str),
    Upload {
        status: StatusCode,
        message: &'static str,
        step: Option<PipelineStep>,
    },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    /// Log `detail` and hide it behind a generic 500 `message`.
    pub fn internal(message: &'static str, detail: impl std::fmt::Display) -> Self {
        error!("{}: {}", message, detail);
        ApiError::Internal(message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, step) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.to_string(), None),
            ApiError::Upload {
                status,
                message,
                step,
            } => (status, message.to_string(), step),
        };
        (status, Json(ErrorBody { error, step })).into_response()
    }
}

// ── Re-exports ───────────────────────────────────────────────────

pub use chat::chat;
pub use files::{delete_file, list_files, upload};
pub use health::health;
pub use search::search;
