//! Assistant chat and grounded-explanation handlers.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use fieldbox_assist::{explain, prompts, send, SendOutcome};
use fieldbox_core::{ChatTurn, Explanation};

use crate::{require_session, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub outcome: &'static str,
    pub transcript: Vec<ChatTurn>,
}

fn outcome_label(outcome: SendOutcome) -> &'static str {
    match outcome {
        SendOutcome::Sent => "sent",
        SendOutcome::Ignored => "ignored",
        SendOutcome::Failed => "failed",
    }
}

/// Submit one chat message.
///
/// The send is a no-op for empty input or while a reply is outstanding; a
/// boundary failure appends no assistant turn. Whatever happens, the caller
/// gets the current transcript back to render.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    require_session(&state)?;

    let system = prompts::system_instruction(&state.catalog.list_all());
    let outcome = send(
        &state.assistant,
        state.chat_backend.as_ref(),
        &system,
        &request.message,
    )
    .await;

    let transcript = state.assistant.lock().await.transcript().to_vec();
    Ok(Json(ChatResponse {
        outcome: outcome_label(outcome),
        transcript,
    }))
}

/// The current conversation transcript.
pub async fn transcript(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChatTurn>>, ApiError> {
    require_session(&state)?;
    Ok(Json(state.assistant.lock().await.transcript().to_vec()))
}

/// Reset the conversation to the seeded greeting, as when the assistant
/// panel is reopened.
pub async fn reset(State(state): State<AppState>) -> Result<Json<Vec<ChatTurn>>, ApiError> {
    require_session(&state)?;

    let mut session = state.assistant.lock().await;
    session.reset();
    Ok(Json(session.transcript().to_vec()))
}

#[derive(Debug, Deserialize)]
pub struct ExplainRequest {
    pub term: String,
}

/// Resolve a search-grounded explanation for a technical term.
///
/// Validation is the only error branch; once the boundary call is issued
/// the response always renders (failures become the fixed fallback
/// explanation).
pub async fn explain_term(
    State(state): State<AppState>,
    Json(request): Json<ExplainRequest>,
) -> Result<Json<Explanation>, ApiError> {
    require_session(&state)?;

    let term = request.term.trim();
    if term.is_empty() {
        return Err(ApiError::BadRequest("term is required".to_string()));
    }

    let explanation = explain(state.grounded_backend.as_ref(), term).await;
    Ok(Json(explanation))
}
