//! Error types for Parley.
//!
//! This crate provides the error types shared by every Parley crate.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum names the specific condition
//! - `*Error` struct wraps the kind with source location tracking
//! - constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use parley_error::{ParleyResult, ScriptError, ScriptErrorKind};
//!
//! fn next_turn() -> ParleyResult<String> {
//!     Err(ScriptError::new(ScriptErrorKind::InvalidSessionState(
//!         "turns were never loaded".to_string(),
//!     )))?
//! }
//!
//! match next_turn() {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod json;
mod script;
mod server;
mod storage;
mod terminal;

pub use config::ConfigError;
pub use error::{ParleyError, ParleyErrorKind, ParleyResult};
pub use json::JsonError;
pub use script::{ScriptError, ScriptErrorKind};
pub use server::{ServerError, ServerErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use terminal::TerminalError;
