//! Evaluation endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use recitation_core::{evaluate as evaluate_attempt, item_at, normalize};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// Longest reference or attempt accepted, in characters after normalization.
pub const MAX_EVALUATION_CHARS: usize = 2000;

fn respond(reference: &str, attempt: &str, mode: PracticeMode) -> Result<Json<EvaluationResponse>> {
    let reference_len = normalize(reference).chars().count();
    if reference_len == 0 {
        return Err(ApiError::BadRequest(
            "reference has no text to compare against".to_string(),
        ));
    }
    let attempt_len = normalize(attempt).chars().count();
    if reference_len.max(attempt_len) > MAX_EVALUATION_CHARS {
        return Err(ApiError::BadRequest(format!(
            "text too long to evaluate (limit {} characters)",
            MAX_EVALUATION_CHARS
        )));
    }

    let evaluation = evaluate_attempt(reference, attempt);
    tracing::debug!(
        "Evaluated {:?} attempt: score {}, {} diagnostics",
        mode,
        evaluation.score,
        evaluation.feedback.diagnostics.len()
    );

    Ok(Json(EvaluationResponse::new(reference, evaluation, mode)))
}

/// POST /api/evaluate
/// Scores an attempt against any reference text
pub async fn evaluate(Json(payload): Json<EvaluateRequest>) -> Result<Json<EvaluationResponse>> {
    respond(&payload.reference, &payload.attempt, payload.mode)
}

/// POST /api/documents/:id/items/:index/follow
/// Scores an attempt at one line of an item
pub async fn follow(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(payload): Json<FollowRequest>,
) -> Result<Json<EvaluationResponse>> {
    let document = state.documents.get(id)?;
    let item = item_at(&document.items, index)?;
    let target = item.follow_target(payload.line)?;
    respond(target, &payload.attempt, PracticeMode::Follow)
}

/// POST /api/documents/:id/items/:index/recite
/// Scores an attempt at the whole item
pub async fn recite(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(payload): Json<ReciteRequest>,
) -> Result<Json<EvaluationResponse>> {
    let document = state.documents.get(id)?;
    let item = item_at(&document.items, index)?;
    respond(&item.recitation_text(), &payload.attempt, PracticeMode::Recite)
}
