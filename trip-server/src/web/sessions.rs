//! In-memory trip sessions.
//!
//! Each session owns one `WaypointStore`. Sessions live until they are
//! deleted or the process exits.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::domain::{DomainError, WaypointStore};

/// Identifier of a trip session.
pub type SessionId = u64;

/// Errors from session operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// No session with this id
    #[error("trip {0} not found")]
    NotFound(SessionId),

    /// The store rejected the change
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Thread-safe session table.
#[derive(Clone, Default)]
pub struct TripSessions {
    stores: Arc<RwLock<HashMap<SessionId, WaypointStore>>>,
    next_id: Arc<AtomicU64>,
}

impl TripSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with an empty store and return its id.
    pub async fn create(&self) -> SessionId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let mut guard = self.stores.write().await;
        guard.insert(id, WaypointStore::new());
        id
    }

    /// A copy of the session's store.
    pub async fn snapshot(&self, id: SessionId) -> Result<WaypointStore, SessionError> {
        let guard = self.stores.read().await;
        guard.get(&id).cloned().ok_or(SessionError::NotFound(id))
    }

    /// Apply a change to the session's store and return the updated copy.
    ///
    /// The store is left untouched if `change` fails.
    pub async fn modify<F>(&self, id: SessionId, change: F) -> Result<WaypointStore, SessionError>
    where
        F: FnOnce(&mut WaypointStore) -> Result<(), DomainError>,
    {
        let mut guard = self.stores.write().await;
        let store = guard.get_mut(&id).ok_or(SessionError::NotFound(id))?;

        let mut updated = store.clone();
        change(&mut updated)?;
        *store = updated.clone();

        Ok(updated)
    }

    /// Delete a session.
    pub async fn remove(&self, id: SessionId) -> Result<(), SessionError> {
        let mut guard = self.stores.write().await;
        guard.remove(&id).map(|_| ()).ok_or(SessionError::NotFound(id))
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.stores.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.stores.read().await.is_empty()
    }
}
