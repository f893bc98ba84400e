use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::ingest::analyzer::{parse_text, parse_text_with_model, AnalysisOutcome, ProfileSource};
use crate::ingest::extract::{detect_kind, extract_text, normalize_newlines};
use crate::ingest::{compute_completeness, CompletenessReport};
use crate::models::profile::Profile;
use crate::state::AppState;
use crate::validate::{validate_profile, ValidationReport};

/// Envelope returned by every profile endpoint. Completeness and validation
/// are recomputed on each response so the client always sees the current
/// state of the stored profile.
#[derive(Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub profile: Profile,
    pub completeness: CompletenessReport,
    pub validation: ValidationReport,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ProfileSource>,
}

fn session_response(
    session_id: Uuid,
    profile: Profile,
    warnings: Vec<String>,
    source: Option<ProfileSource>,
) -> SessionResponse {
    let completeness = compute_completeness(&profile);
    let validation = validate_profile(&profile);
    SessionResponse {
        session_id,
        profile,
        completeness,
        validation,
        warnings,
        source,
    }
}

#[derive(Deserialize)]
pub struct ParseRequest {
    pub raw_text: String,
    #[serde(default)]
    pub use_model: bool,
}

/// POST /api/v1/profile/import
///
/// Multipart upload of a resume file (PDF or plain text). The optional
/// `use_model` text field enables model-assisted extraction on top of the
/// local parser.
pub async fn handle_import(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SessionResponse>, AppError> {
    let mut upload: Option<(Option<String>, bytes::Bytes)> = None;
    let mut use_model = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Ingest(format!("Invalid multipart request: {e}")))?
    {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().map(|f| f.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Ingest(format!("Failed to read upload: {e}")))?;
                upload = Some((filename, data));
            }
            Some("use_model") => {
                let value = field.text().await.unwrap_or_default();
                use_model = matches!(value.trim(), "true" | "1");
            }
            _ => {}
        }
    }

    let (filename, data) = upload
        .ok_or_else(|| AppError::Validation("Multipart field 'file' is required".to_string()))?;

    let kind = detect_kind(filename.as_deref(), &data);
    let text = extract_text(kind, &data)?;

    let outcome = analyze(&state, &text, use_model).await;
    info!(
        kind = ?kind,
        chars = text.len(),
        warnings = outcome.warnings.len(),
        source = ?outcome.source,
        "Imported profile upload"
    );

    let session_id = state.sessions.create(outcome.profile.clone()).await;
    Ok(Json(session_response(
        session_id,
        outcome.profile,
        outcome.warnings,
        Some(outcome.source),
    )))
}

/// POST /api/v1/profile/parse
///
/// Pasted resume text, same pipeline as an upload minus file extraction.
pub async fn handle_parse(
    State(state): State<AppState>,
    Json(req): Json<ParseRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    if req.raw_text.trim().is_empty() {
        return Err(AppError::Validation(
            "raw_text must not be empty".to_string(),
        ));
    }

    let text = normalize_newlines(&req.raw_text);
    let outcome = analyze(&state, &text, req.use_model).await;

    let session_id = state.sessions.create(outcome.profile.clone()).await;
    Ok(Json(session_response(
        session_id,
        outcome.profile,
        outcome.warnings,
        Some(outcome.source),
    )))
}

/// GET /api/v1/profile/example
///
/// Seeds a session with the built-in example profile so the pipeline can be
/// exercised without uploading anything.
pub async fn handle_example(
    State(state): State<AppState>,
) -> Result<Json<SessionResponse>, AppError> {
    let profile = Profile::example();
    let session_id = state.sessions.create(profile.clone()).await;
    Ok(Json(session_response(session_id, profile, Vec::new(), None)))
}

/// POST /api/v1/profile
pub async fn handle_create_profile(
    State(state): State<AppState>,
    Json(profile): Json<Profile>,
) -> Result<Json<SessionResponse>, AppError> {
    let session_id = state.sessions.create(profile.clone()).await;
    Ok(Json(session_response(session_id, profile, Vec::new(), None)))
}

/// GET /api/v1/profile/:session_id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.sessions.get(session_id).await?;
    Ok(Json(session_response(
        session_id,
        session.profile,
        Vec::new(),
        None,
    )))
}

/// PUT /api/v1/profile/:session_id
///
/// Replaces the stored profile. Previously generated documents stay attached
/// to the session; the client decides when to regenerate.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(profile): Json<Profile>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.sessions.update_profile(session_id, profile).await?;
    Ok(Json(session_response(
        session_id,
        session.profile,
        Vec::new(),
        None,
    )))
}

async fn analyze(state: &AppState, text: &str, use_model: bool) -> AnalysisOutcome {
    if use_model {
        parse_text_with_model(state.drafter.as_ref(), text).await
    } else {
        parse_text(text)
    }
}
