//! In-memory conversation repository for tests and ephemeral servers.

use crate::repository::{newest_first, not_found, playable_count, validate_name};
use crate::{ConversationRepository, ConversationSummary};
use parking_lot::RwLock;
use parley_core::TurnRecord;
use parley_error::ParleyResult;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Entry {
    summary: ConversationSummary,
    records: Vec<TurnRecord>,
}

/// Conversation repository held entirely in memory.
///
/// Applies the same load rules as the CSV backend: rows without a speaker or
/// message are dropped on load.
#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryConversationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored conversations.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether no conversations are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait::async_trait]
impl ConversationRepository for InMemoryConversationStore {
    async fn list(&self) -> ParleyResult<Vec<ConversationSummary>> {
        let mut summaries: Vec<_> = self
            .entries
            .read()
            .values()
            .map(|e| e.summary.clone())
            .collect();
        newest_first(&mut summaries);
        Ok(summaries)
    }

    async fn create(&self, name: &str) -> ParleyResult<ConversationSummary> {
        let name = validate_name(name)?;
        let summary = ConversationSummary::new(Uuid::new_v4().to_string(), name);

        self.entries.write().insert(
            summary.id().clone(),
            Entry {
                summary: summary.clone(),
                records: Vec::new(),
            },
        );
        tracing::debug!(id = %summary.id(), "Created in-memory conversation");
        Ok(summary)
    }

    async fn load(&self, id: &str) -> ParleyResult<Vec<TurnRecord>> {
        let entries = self.entries.read();
        let entry = entries.get(id).ok_or_else(|| not_found(id))?;
        Ok(entry
            .records
            .iter()
            .filter(|r| !r.is_blank())
            .cloned()
            .collect())
    }

    async fn save(&self, id: &str, records: &[TurnRecord]) -> ParleyResult<()> {
        let mut entries = self.entries.write();
        let entry = entries.get_mut(id).ok_or_else(|| not_found(id))?;
        entry.records = records.to_vec();
        entry.summary.set_turn_count(playable_count(records));
        tracing::debug!(id, rows = records.len(), "Saved in-memory conversation");
        Ok(())
    }
}
