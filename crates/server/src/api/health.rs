use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;
use crate::vector_store::TableInfo;

use super::{ApiError, ErrorBody};

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub tables: Vec<TableInfo>,
}

/// Database health check
///
/// Lists the tables in the `public` schema, proving the database answers.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Database reachable", body = HealthResponse),
        (status = 500, description = "Database query failed", body = ErrorBody)
    )
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, ApiError> {
    let tables = state
        .store
        .list_tables()
        .await
        .map_err(|e| ApiError::internal("Failed to query database", e))?;
    Ok(Json(HealthResponse {
        status: "ok",
        tables,
    }))
}
