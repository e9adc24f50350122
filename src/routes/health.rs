use axum::{Json, extract::State};

use crate::{
    message::{HealthResponse, RootResponse},
    state::SharedState,
};

pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Rust backend with Gemini GenAI integration".to_string(),
    })
}

/// Reports whether a Gemini client was created at startup. Does not call out.
pub async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Chat backend is running".to_string(),
        gemini_configured: state.is_configured(),
    })
}
