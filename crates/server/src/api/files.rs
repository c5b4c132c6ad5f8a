use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::pipeline::{PipelineError, PipelineStep, UploadSummary};
use crate::state::AppState;
use crate::vector_store::FileRecord;

use super::{ApiError, ErrorBody};

#[derive(Serialize, utoipa::ToSchema)]
pub struct FileListResponse {
    pub files: Vec<FileRecord>,
}

fn upload_error(filename: &str, err: PipelineError) -> ApiError {
    let (status, message) = match &err {
        PipelineError::EmptyDocument => (StatusCode::BAD_REQUEST, "Document contains no extractable text"),
        PipelineError::StepFailed {
            step: PipelineStep::Extract,
            ..
        } => (StatusCode::BAD_REQUEST, "Failed to extract text from file"),
        PipelineError::StepFailed { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to process file content",
        ),
    };
    if status.is_server_error() {
        error!("Upload of '{}' failed: {}", filename, err);
    } else {
        warn!("Rejected upload '{}': {}", filename, err);
    }
    ApiError::Upload {
        status,
        message,
        step: err.step(),
    }
}

// ── POST /file/upload ─────────────────────────────

/// Upload a document
///
/// Accepts multipart/form-data; the first field carrying a file is used.
/// The file is stored, its text chunked and embedded, and every chunk
/// written to the vector store.
#[utoipa::path(
    post,
    path = "/file/upload",
    tag = "Files",
    request_body(content_type = "multipart/form-data", description = "File upload"),
    responses(
        (status = 200, description = "File stored and indexed", body = UploadSummary),
        (status = 400, description = "No file, empty document, or unreadable PDF", body = ErrorBody),
        (status = 500, description = "A pipeline step failed", body = ErrorBody)
    )
)]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadSummary>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("Malformed multipart body: {}", e);
        ApiError::bad_request("No file uploaded")
    })? {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        let bytes = field.bytes().await.map_err(|e| {
            warn!("Failed to read upload '{}': {}", filename, e);
            ApiError::bad_request("Failed to read uploaded file")
        })?;
        info!("Received '{}' ({} bytes)", filename, bytes.len());

        let summary = state
            .pipeline
            .run(&filename, bytes)
            .await
            .map_err(|e| upload_error(&filename, e))?;
        return Ok(Json(summary));
    }

    Err(ApiError::bad_request("No file uploaded"))
}

// ── GET /files ────────────────────────────────────

/// List uploaded files
///
/// Newest first, with the number of stored chunks per file.
#[utoipa::path(
    get,
    path = "/files",
    tag = "Files",
    responses(
        (status = 200, description = "Uploaded files", body = FileListResponse),
        (status = 500, description = "Database query failed", body = ErrorBody)
    )
)]
pub async fn list_files(State(state): State<Arc<AppState>>) -> Result<Json<FileListResponse>, ApiError> {
    let files = state
        .store
        .list_files()
        .await
        .map_err(|e| ApiError::internal("Failed to list files", e))?;
    Ok(Json(FileListResponse { files }))
}

// ── DELETE /files/{id} ────────────────────────────

/// Delete an uploaded file
///
/// Removes the metadata row, every chunk row, and the stored original.
#[utoipa::path(
    delete,
    path = "/files/{id}",
    tag = "Files",
    params(("id" = String, Path, description = "File UUID")),
    responses(
        (status = 204, description = "File deleted"),
        (status = 404, description = "File not found", body = ErrorBody),
        (status = 500, description = "Database query failed", body = ErrorBody)
    )
)]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let key = state
        .store
        .delete_file(id)
        .await
        .map_err(|e| ApiError::internal("Failed to delete file", e))?
        .ok_or_else(|| ApiError::NotFound("File not found".to_string()))?;

    if let Err(e) = state.uploads.delete(&key).await {
        warn!("Deleted rows for {} but not its object {}: {}", id, key, e);
    }
    info!("Deleted file {}", id);
    Ok(StatusCode::NO_CONTENT)
}
