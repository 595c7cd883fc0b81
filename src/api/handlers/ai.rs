use axum::{extract::State, response::IntoResponse, Json};
use crate::api::extractors::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are an AI assistant for a school management system. \
Help users with questions about student management, attendance, grades, timetables, \
and general educational queries. Be helpful, professional, and concise.";

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}

pub async fn ai_chat(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Json(payload): Json<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.llm_service.chat(&payload.message, SYSTEM_PROMPT).await?;

    Ok(Json(ChatResponse {
        response,
        session_id: payload.session_id,
    }))
}
