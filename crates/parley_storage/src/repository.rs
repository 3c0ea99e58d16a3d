//! Repository trait and the summary type it lists.

use chrono::{DateTime, Utc};
use parley_core::TurnRecord;
use parley_error::{ParleyResult, StorageError, StorageErrorKind};
use serde::{Deserialize, Serialize};

/// Index entry describing one stored conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ConversationSummary {
    /// Opaque conversation identity
    id: String,
    /// Human readable name
    name: String,
    /// Creation time, serialized as RFC 3339
    created_at: DateTime<Utc>,
    /// Number of playable turns at the last save
    #[serde(default)]
    turn_count: usize,
}

impl ConversationSummary {
    /// Creates a summary for a brand new, empty conversation.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at: Utc::now(),
            turn_count: 0,
        }
    }

    /// Sets the recorded turn count.
    pub fn set_turn_count(&mut self, turn_count: usize) {
        self.turn_count = turn_count;
    }
}

/// Trait for conversation persistence backends.
///
/// Backends store whole turn lists; there is no partial update. `save` must
/// either replace the stored list completely or leave it untouched.
#[async_trait::async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Lists every conversation, newest first.
    async fn list(&self) -> ParleyResult<Vec<ConversationSummary>>;

    /// Creates an empty conversation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` when `name` is blank.
    async fn create(&self, name: &str) -> ParleyResult<ConversationSummary>;

    /// Loads the stored rows of a conversation.
    ///
    /// Rows without a speaker or message are not returned.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    async fn load(&self, id: &str) -> ParleyResult<Vec<TurnRecord>>;

    /// Replaces the stored rows of a conversation.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    async fn save(&self, id: &str, records: &[TurnRecord]) -> ParleyResult<()>;
}

/// Trims a conversation name, rejecting blank ones.
pub(crate) fn validate_name(name: &str) -> Result<String, StorageError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StorageError::new(StorageErrorKind::InvalidName(
            "conversation name must not be empty".to_string(),
        )));
    }
    Ok(trimmed.to_string())
}

/// Number of rows that would survive a load.
pub(crate) fn playable_count(records: &[TurnRecord]) -> usize {
    records.iter().filter(|r| !r.is_blank()).count()
}

/// Sorts summaries newest first.
pub(crate) fn newest_first(summaries: &mut [ConversationSummary]) {
    summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[track_caller]
pub(crate) fn not_found(id: &str) -> StorageError {
    StorageError::new(StorageErrorKind::NotFound(id.to_string()))
}
