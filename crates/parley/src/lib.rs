//! Parley - scripted conversation player.
//!
//! Parley replays a pre-written dialogue between an AI agent and a merchant one
//! agent turn at a time, showing the system actions attached to each turn and the
//! merchant reply that is expected to follow.
//!
//! # Architecture
//!
//! - `parley_error` - Error types
//! - `parley_core` - Roles, turns and the bracketed action codec
//! - `parley_script` - Sequencer, sessions and script editing
//! - `parley_storage` - Conversation repositories (CSV, in-memory)
//! - `parley_server` - HTTP API with a password gate
//!
//! This crate (`parley`) re-exports everything for convenience and ships the
//! `parley` binary.
//!
//! # Quick Start
//!
//! ```rust
//! use parley::{Session, TurnRecord};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::new();
//! session.load_turns(&[
//!     TurnRecord::new(1, "AI Agent", "Hi, I'm your assistant.", "[Opens dashboard]"),
//!     TurnRecord::new(2, "Merchant", "Hello!", ""),
//! ])?;
//!
//! let step = session.advance()?;
//! println!("{:?} / {:?}", step.current_text(), step.preview_text());
//! # Ok(())
//! # }
//! ```

pub mod playback;

pub use parley_core::*;
pub use parley_error::*;
pub use parley_script::*;
pub use parley_server::*;
pub use parley_storage::{
    CSV_HEADER, ConversationRepository, ConversationSummary, CsvConversationStore, INDEX_FILE,
    InMemoryConversationStore, decode_csv, encode_csv,
};
