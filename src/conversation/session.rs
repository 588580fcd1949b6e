//! Per-user session store with per-key locking.
//!
//! The outer map lock is held only long enough to fetch or insert a user's
//! entry. Event handling then runs under that user's own lock, so two events
//! from one user never interleave while unrelated users proceed in parallel.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use super::state::UserSession;

/// Shared handle to one user's session.
pub type SessionHandle = Arc<Mutex<UserSession>>;

/// Volatile map of user id to session. Lives for the process lifetime.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<i64, SessionHandle>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the user's session, creating a fresh one on first contact.
    pub async fn get_or_create(&self, user_id: i64) -> SessionHandle {
        let mut sessions = self.sessions.lock().await;
        let handle = sessions.entry(user_id).or_insert_with(|| {
            debug!(user_id, "new user session");
            Arc::new(Mutex::new(UserSession::new()))
        });
        Arc::clone(handle)
    }

    /// Snapshot a user's session without creating one.
    pub async fn snapshot(&self, user_id: i64) -> Option<UserSession> {
        let handle = {
            let sessions = self.sessions.lock().await;
            sessions.get(&user_id).map(Arc::clone)
        };
        match handle {
            Some(handle) => Some(handle.lock().await.clone()),
            None => None,
        }
    }

    /// Number of known users.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Returns `true` if no user has interacted yet.
    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}
