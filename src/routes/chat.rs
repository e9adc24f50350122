use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    services::context::build_prompt,
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(payload) = payload?;

    let result = generate(&state, &payload).await;
    if let Err(err) = &result {
        tracing::error!(error = %err, "Error in chat endpoint");
    }
    result.map(Json)
}

async fn generate(state: &SharedState, payload: &ChatRequest) -> Result<ChatResponse, AppError> {
    let llm = state.llm.as_ref().ok_or(AppError::NotConfigured)?;

    let prompt = build_prompt(&payload.message, payload.history());

    match llm.generate_content(&state.model, &prompt).await? {
        Some(text) if !text.is_empty() => Ok(ChatResponse::success(text)),
        _ => Err(AppError::EmptyResponse),
    }
}
