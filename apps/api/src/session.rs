//! In-memory session store.
//!
//! A session holds the profile being worked on plus the latest generated
//! document of each type. Sessions live in a bounded moka cache with a
//! time-to-live, so abandoned sessions age out on their own; there is no
//! durable storage behind them.

use std::collections::HashMap;
use std::time::Duration;

use moka::future::{Cache, CacheBuilder};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::document::{DocumentType, GeneratedDocument};
use crate::models::profile::Profile;

/// Upper bound on live sessions; the cache evicts beyond this.
const MAX_SESSIONS: u64 = 1024;

/// One working session.
#[derive(Debug, Clone)]
pub struct Session {
    pub profile: Profile,
    /// Latest generated document per type. Regeneration replaces slots
    /// in place; it never grows a history.
    pub documents: HashMap<DocumentType, GeneratedDocument>,
}

impl Session {
    fn new(profile: Profile) -> Self {
        Session {
            profile,
            documents: HashMap::new(),
        }
    }
}

/// Handle to the session cache. Cloning shares the same cache.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<Uuid, Session>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        let sessions = CacheBuilder::new(MAX_SESSIONS).time_to_live(ttl).build();
        SessionStore { sessions }
    }

    /// Creates a session around a profile and returns its id.
    pub async fn create(&self, profile: Profile) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.insert(id, Session::new(profile)).await;
        id
    }

    pub async fn get(&self, id: Uuid) -> Result<Session, AppError> {
        self.sessions
            .get(&id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("session {id} not found or expired")))
    }

    /// Replaces the session's profile. Generated documents are kept; they
    /// reflect the profile they were generated from until regenerated.
    pub async fn update_profile(&self, id: Uuid, profile: Profile) -> Result<Session, AppError> {
        let mut session = self.get(id).await?;
        session.profile = profile;
        self.sessions.insert(id, session.clone()).await;
        Ok(session)
    }

    /// Stores generated documents into their per-type slots.
    pub async fn store_documents(
        &self,
        id: Uuid,
        documents: Vec<GeneratedDocument>,
    ) -> Result<Session, AppError> {
        let mut session = self.get(id).await?;
        for document in documents {
            session.documents.insert(document.doc_type, document);
        }
        self.sessions.insert(id, session.clone()).await;
        Ok(session)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
