//! Server-side session persistence.
//!
//! The browser holds only an opaque session id (inside an encrypted cookie);
//! the [`SessionContext`] itself never leaves the server.

use std::collections::HashMap;
use std::future::Future;
use std::sync::RwLock;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;

use crate::types::{SessionContext, SessionId};

/// Session store operation failure (backend specific).
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Session persistence keyed by browser-presented session id.
///
/// A context is stored whole or not at all; no operation may partially
/// apply.
///
/// # Example
///
/// ```rust,ignore
/// impl SessionStore for MyDbStore {
///     async fn create(&self, context: SessionContext) -> Result<SessionId, StoreError> {
///         let id = new_session_id();
///         self.db.insert_session(&id, &context).await?;
///         Ok(id)
///     }
///     // ...
/// }
/// ```
pub trait SessionStore: Send + Sync + 'static {
    /// Persist a fully populated context. Returns the new session id.
    fn create(
        &self,
        context: SessionContext,
    ) -> impl Future<Output = Result<SessionId, StoreError>> + Send;

    /// Look up the context for a session id.
    fn find(
        &self,
        id: &SessionId,
    ) -> impl Future<Output = Result<Option<SessionContext>, StoreError>> + Send;

    /// Drop a session. Unknown ids are not an error; logout is idempotent.
    fn delete(&self, id: &SessionId) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Generates an unguessable session id (32 random bytes, base64url).
#[must_use]
pub fn new_session_id() -> SessionId {
    let random_bytes: [u8; 32] = rand::rng().random();
    SessionId(URL_SAFE_NO_PAD.encode(random_bytes))
}

/// In-memory [`SessionStore`].
///
/// Contexts live for the process lifetime at most; expiry is bounded by the
/// session cookie's max-age. There is no cross-process sharing.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SessionContext>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    async fn create(&self, context: SessionContext) -> Result<SessionId, StoreError> {
        let id = new_session_id();
        self.sessions
            .write()
            .map_err(|_| StoreError::from("session lock poisoned"))?
            .insert(id.clone(), context);
        Ok(id)
    }

    async fn find(&self, id: &SessionId) -> Result<Option<SessionContext>, StoreError> {
        Ok(self
            .sessions
            .read()
            .map_err(|_| StoreError::from("session lock poisoned"))?
            .get(id)
            .cloned())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), StoreError> {
        self.sessions
            .write()
            .map_err(|_| StoreError::from("session lock poisoned"))?
            .remove(id);
        Ok(())
    }
}
