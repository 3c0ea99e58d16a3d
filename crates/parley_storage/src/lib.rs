//! Conversation persistence for Parley.
//!
//! Conversations are stored as whole turn lists behind the
//! [`ConversationRepository`] trait:
//!
//! - **CsvConversationStore**: one CSV file per conversation plus a JSON index
//! - **InMemoryConversationStore**: process-local storage for tests
//!
//! # Example
//!
//! ```rust
//! use parley_core::TurnRecord;
//! use parley_storage::{ConversationRepository, InMemoryConversationStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryConversationStore::new();
//! let summary = store.create("Onboarding call").await?;
//!
//! let rows = vec![TurnRecord::new(1, "AI Agent", "Welcome!", "[Creates account]")];
//! store.save(summary.id(), &rows).await?;
//!
//! assert_eq!(store.load(summary.id()).await?, rows);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod csv_store;
mod memory;
mod repository;

pub use csv_store::{CSV_HEADER, CsvConversationStore, INDEX_FILE, decode_csv, encode_csv};
pub use memory::InMemoryConversationStore;
pub use parley_error::{StorageError, StorageErrorKind};
pub use repository::{ConversationRepository, ConversationSummary};
