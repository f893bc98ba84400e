pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generate::handlers as generate_handlers;
use crate::ingest::handlers as ingest_handlers;
use crate::render::handlers as render_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile API: ingestion and session editing
        .route(
            "/api/v1/profile/import",
            post(ingest_handlers::handle_import),
        )
        .route("/api/v1/profile/parse", post(ingest_handlers::handle_parse))
        .route(
            "/api/v1/profile/example",
            get(ingest_handlers::handle_example),
        )
        .route(
            "/api/v1/profile",
            post(ingest_handlers::handle_create_profile),
        )
        .route(
            "/api/v1/profile/:session_id",
            get(ingest_handlers::handle_get_profile).put(ingest_handlers::handle_update_profile),
        )
        // Generation API
        .route(
            "/api/v1/profile/:session_id/generate",
            post(generate_handlers::handle_generate),
        )
        .route(
            "/api/v1/profile/:session_id/documents",
            get(generate_handlers::handle_list_documents),
        )
        // Render API: rendered downloads
        .route(
            "/api/v1/profile/:session_id/documents/:doc_type/download",
            get(render_handlers::handle_download),
        )
        .with_state(state)
}
