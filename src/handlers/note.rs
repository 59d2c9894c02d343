use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, Result},
    handlers::AppState,
    models::NewNote,
};

/// List notes handler
pub async fn list_notes(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let notes = state.notes.list_all().await?;
    Ok((StatusCode::OK, Json(notes)))
}

/// Create note handler
pub async fn create_note(
    State(state): State<AppState>,
    Json(new_note): Json<NewNote>,
) -> Result<impl IntoResponse> {
    let note = state.notes.create(new_note).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub text: String,
}

/// Draft note content from a prompt
pub async fn generate_note(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<impl IntoResponse> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt must not be empty".into()));
    }

    let text = state.generator.generate(&request.prompt).await?;
    Ok((StatusCode::OK, Json(GenerateResponse { text })))
}
