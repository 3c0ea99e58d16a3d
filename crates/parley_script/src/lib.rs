//! Script playback engine for Parley.
//!
//! This crate turns a list of decoded turns into interactive playback:
//!
//! - **Sequencer**: a forward-only cursor that surfaces the next AI agent turn
//!   together with a preview of the merchant reply that follows it
//! - **Session**: one conversation's loaded script plus its cursor
//! - **SessionStore**: sessions keyed by conversation id, each behind its own lock
//! - **Script**: editable turn lists that stay densely numbered
//!
//! # Example
//!
//! ```rust
//! use parley_core::TurnRecord;
//! use parley_script::Session;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let rows = vec![
//!     TurnRecord::new(1, "AI Agent", "Welcome!", "[Fetches profile]"),
//!     TurnRecord::new(2, "Merchant", "Thanks", ""),
//! ];
//!
//! let mut session = Session::new();
//! session.load_turns(&rows)?;
//!
//! let step = session.advance()?;
//! assert_eq!(step.current_text(), Some("Welcome!"));
//! assert_eq!(step.preview_text(), Some("Thanks"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod script;
mod sequencer;
mod session;
mod store;

pub use script::{Script, reconcile_records};
pub use sequencer::{Advance, Sequencer};
pub use session::Session;
pub use store::{SessionHandle, SessionStore};
