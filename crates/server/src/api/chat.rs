use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

use super::{ApiError, ErrorBody};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct ChatRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ChatResponse {
    pub response: String,
}

/// Answer a prompt using stored documents as context
///
/// The nearest chunks to the prompt are prepended to it and the result is
/// sent to the LLM as a single user message.
#[utoipa::path(
    post,
    path = "/chat",
    tag = "Retrieval",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Generated answer", body = ChatResponse),
        (status = 400, description = "No prompt provided", body = ErrorBody),
        (status = 500, description = "Retrieval or generation failure", body = ErrorBody)
    )
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let prompt = req
        .prompt
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::bad_request("No prompt provided"))?;

    let embedding = state
        .embedder
        .embed_one(&prompt)
        .await
        .map_err(|e| ApiError::internal("Failed to generate response", e))?;

    let context: Vec<String> = state
        .store
        .search(&embedding, state.retrieval.chat_context_chunks)
        .await
        .map_err(|e| ApiError::internal("Failed to generate response", e))?
        .into_iter()
        .map(|hit| hit.content)
        .collect();

    let response = state
        .generator
        .answer(&context, &prompt)
        .await
        .map_err(|e| ApiError::internal("Failed to generate response", e))?;

    Ok(Json(ChatResponse { response }))
}
