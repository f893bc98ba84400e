use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generate::generate_documents;
use crate::models::document::{DocumentSummary, DocumentType, GenerationRequest};
use crate::state::AppState;

#[derive(Serialize)]
pub struct GenerateResponse {
    pub session_id: Uuid,
    pub documents: Vec<DocumentSummary>,
}

/// POST /api/v1/profile/:session_id/generate
///
/// Runs the generation pipeline for the requested document types. Returns
/// 422 with the validation report when the profile is missing required
/// fields; otherwise every requested type yields a document, falling back
/// to the deterministic templates when drafting fails.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<GenerationRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let session = state.sessions.get(session_id).await?;
    let documents = generate_documents(state.drafter.as_ref(), &session.profile, &req).await?;
    info!(
        %session_id,
        count = documents.len(),
        "Generated documents for session"
    );

    let summaries = documents.iter().map(|d| d.summary()).collect();
    state.sessions.store_documents(session_id, documents).await?;

    Ok(Json(GenerateResponse {
        session_id,
        documents: summaries,
    }))
}

/// GET /api/v1/profile/:session_id/documents
///
/// Lists the session's generated documents in the fixed type order,
/// regardless of generation order.
pub async fn handle_list_documents(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<GenerateResponse>, AppError> {
    let session = state.sessions.get(session_id).await?;
    let summaries = DocumentType::ALL
        .iter()
        .filter_map(|t| session.documents.get(t))
        .map(|d| d.summary())
        .collect();

    Ok(Json(GenerateResponse {
        session_id,
        documents: summaries,
    }))
}
