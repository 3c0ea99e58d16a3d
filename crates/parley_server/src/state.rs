//! Shared handler state.

use crate::ParleyConfig;
use parley_error::ParleyResult;
use parley_script::{SessionHandle, SessionStore};
use parley_storage::ConversationRepository;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// State shared by every request.
#[derive(Clone)]
pub struct AppState {
    repository: Arc<dyn ConversationRepository>,
    sessions: SessionStore,
    config: Arc<ParleyConfig>,
    save_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// Creates state over a repository with no sessions loaded yet.
    pub fn new(repository: Arc<dyn ConversationRepository>, config: ParleyConfig) -> Self {
        Self {
            repository,
            sessions: SessionStore::new(),
            config: Arc::new(config),
            save_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Conversation persistence.
    pub fn repository(&self) -> &dyn ConversationRepository {
        self.repository.as_ref()
    }

    /// Playback sessions.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Active configuration.
    pub fn config(&self) -> &ParleyConfig {
        &self.config
    }

    /// Serializes saves so storage and the reloaded session change in the same order.
    pub fn save_lock(&self) -> &Mutex<()> {
        &self.save_lock
    }

    /// Returns the session for `id`, loading it from storage on first use.
    ///
    /// Storage is read without holding the session lock. If another request
    /// loaded the session in the meantime, its script is kept.
    pub async fn loaded_session(&self, id: &str) -> ParleyResult<SessionHandle> {
        if let Some(handle) = self.sessions.get(id) {
            let loaded = handle.lock().is_loaded();
            if loaded {
                return Ok(handle);
            }
        }

        // Unknown ids fail here, before a session is created for them
        let records = self.repository.load(id).await?;
        let handle = self.sessions.session(id);

        {
            let mut session = handle.lock();
            if !session.is_loaded() {
                let count = session.load_turns(&records)?;
                info!(conversation = %id, turns = count, "Loaded session from storage");
            }
        }
        Ok(handle)
    }
}
