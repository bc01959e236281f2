//! Document endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use recitation_core::item_at;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// POST /api/documents
/// Parses and stores study material; identical content returns the existing document
pub async fn upload(
    State(state): State<AppState>,
    Json(payload): Json<UploadDocumentRequest>,
) -> Result<(StatusCode, Json<DocumentSummary>)> {
    let name = payload
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| "untitled".to_string());

    let loaded = state.documents.load(&name, &payload.content)?;
    let status = if loaded.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(loaded.document.summary())))
}

/// GET /api/documents
pub async fn list(State(state): State<AppState>) -> Result<Json<DocumentListResponse>> {
    let documents = state.documents.list()?;
    Ok(Json(DocumentListResponse { documents }))
}

/// GET /api/documents/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentResponse>> {
    let document = state.documents.get(id)?;
    Ok(Json(DocumentResponse {
        summary: document.summary(),
        groups: document.groups(),
    }))
}

/// GET /api/documents/:id/items/:index
pub async fn item(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<ItemDetailResponse>> {
    let document = state.documents.get(id)?;
    let item = item_at(&document.items, index)?;
    Ok(Json(ItemDetailResponse::new(index, item)))
}
