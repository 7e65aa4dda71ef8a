use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::form::FormState;
use crate::models::null_as_default;
use crate::slots::chat::{exchange, initial_transcript, ChatOutcome, ChatTurn};
use crate::slots::merge::{merge_with_policy, ExtractedData, MergePolicy};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MergeRequest {
    #[serde(default)]
    pub current: FormState,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extracted: ExtractedData,
    #[serde(default)]
    pub policy: MergePolicy,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub form: FormState,
    #[serde(default = "initial_transcript")]
    pub transcript: Vec<ChatTurn>,
    #[serde(default)]
    pub policy: MergePolicy,
}

/// POST /api/v1/form/merge
pub async fn handle_merge(Json(request): Json<MergeRequest>) -> Json<FormState> {
    Json(merge_with_policy(
        &request.current,
        &request.extracted,
        request.policy,
    ))
}

/// POST /api/v1/chat
///
/// One conversational turn. The reply's extracted slots are merged into the
/// submitted form; an unavailable assistant yields an apology, not an error.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatOutcome>, AppError> {
    let outcome = exchange(
        state.recommender.as_ref(),
        &request.message,
        &request.form,
        request.transcript,
        request.policy,
    )
    .await?;
    Ok(Json(outcome))
}
