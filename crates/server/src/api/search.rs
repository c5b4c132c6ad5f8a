use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::AppState;
use crate::vector_store::SearchHit;

use super::{ApiError, ErrorBody};

/// Upper bound on `limit`, whatever the client asks for.
pub const MAX_SEARCH_LIMIT: i64 = 100;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct SearchRequest {
    #[serde(default)]
    pub text: Option<String>,
    /// Number of results; defaults to 5.
    #[serde(default)]
    pub limit: Option<i64>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
}

/// Non-positive limits fall back to the default; large ones are capped.
fn effective_limit(requested: Option<i64>, default: i64) -> i64 {
    requested
        .filter(|l| *l > 0)
        .unwrap_or(default)
        .clamp(1, MAX_SEARCH_LIMIT)
}

/// Vector search over stored chunks
///
/// Embeds `text` and returns the nearest chunks by L2 distance.
#[utoipa::path(
    post,
    path = "/search",
    tag = "Retrieval",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Nearest chunks, closest first", body = SearchResponse),
        (status = 400, description = "No search text provided", body = ErrorBody),
        (status = 500, description = "Embedding or database failure", body = ErrorBody)
    )
)]
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let text = req
        .text
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::bad_request("No search text provided"))?;
    let limit = effective_limit(req.limit, state.retrieval.search_default_limit);

    let embedding = state
        .embedder
        .embed_one(&text)
        .await
        .map_err(|e| ApiError::internal("Failed to perform vector search", e))?;

    let results = state
        .store
        .search(&embedding, limit)
        .await
        .map_err(|e| ApiError::internal("Failed to perform vector search", e))?;
    debug!("Search returned {} of at most {} hits", results.len(), limit);

    Ok(Json(SearchResponse { results }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_caps() {
        assert_eq!(effective_limit(None, 5), 5);
        assert_eq!(effective_limit(Some(3), 5), 3);
        assert_eq!(effective_limit(Some(0), 5), 5);
        assert_eq!(effective_limit(Some(-2), 5), 5);
        assert_eq!(effective_limit(Some(10_000), 5), MAX_SEARCH_LIMIT);
    }
}
