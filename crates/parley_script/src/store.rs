//! Session lookup keyed by conversation identity.

use crate::Session;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Shared handle to one conversation's session.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Maps conversation ids to independently lockable sessions.
///
/// The outer lock is only held while looking a session up; callers then lock
/// the session itself, so different conversations never wait on each other.
///
/// # Examples
///
/// ```
/// use parley_script::SessionStore;
///
/// let store = SessionStore::new();
/// let first = store.session("abc");
/// let again = store.session("abc");
/// assert!(std::sync::Arc::ptr_eq(&first, &again));
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionHandle>>>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session for `id`, creating an unloaded one if needed.
    pub fn session(&self, id: &str) -> SessionHandle {
        if let Some(existing) = self.sessions.read().get(id) {
            return Arc::clone(existing);
        }
        let mut sessions = self.sessions.write();
        Arc::clone(sessions.entry(id.to_string()).or_insert_with(|| {
            debug!(conversation = %id, "Creating session");
            Arc::new(Mutex::new(Session::new()))
        }))
    }

    /// Returns the session for `id` without creating one.
    pub fn get(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.read().get(id).cloned()
    }

    /// Drops the session for `id`. Returns whether one existed.
    pub fn remove(&self, id: &str) -> bool {
        self.sessions.write().remove(id).is_some()
    }

    /// Number of sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
