use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::document::{ArtifactFormat, DocumentType};
use crate::render::render_document;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct DownloadQuery {
    pub format: Option<ArtifactFormat>,
}

/// GET /api/v1/profile/:session_id/documents/:doc_type/download
///
/// Renders the stored document into the requested format and serves it as
/// a file attachment. Without an explicit `format`, resumes and cover
/// letters download as PDF and the portfolio as HTML.
pub async fn handle_download(
    State(state): State<AppState>,
    Path((session_id, doc_type)): Path<(Uuid, DocumentType)>,
    Query(query): Query<DownloadQuery>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions.get(session_id).await?;
    let document = session.documents.get(&doc_type).ok_or_else(|| {
        AppError::NotFound(format!(
            "No {} has been generated for this session",
            doc_type.label()
        ))
    })?;

    let format = query.format.unwrap_or(match doc_type {
        DocumentType::PortfolioSite => ArtifactFormat::Html,
        _ => ArtifactFormat::Pdf,
    });

    let artifact = render_document(document, &session.profile, format)?;
    info!(
        %session_id,
        doc_type = doc_type.as_str(),
        format = format.extension(),
        bytes = artifact.bytes.len(),
        "Rendered document for download"
    );

    let disposition = format!("attachment; filename=\"{}\"", artifact.filename);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    ))
}
