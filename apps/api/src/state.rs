use std::sync::Arc;

use crate::generate::Drafter;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable drafting backend. Production wires the OpenRouter chain;
    /// tests swap in stubs.
    pub drafter: Arc<dyn Drafter>,
    pub sessions: SessionStore,
}
