//! Core data types for Parley.
//!
//! This crate provides the types every other Parley crate speaks: the two
//! conversation [`Role`]s, the [`Turn`] a script is made of, the raw
//! [`TurnRecord`] rows it is persisted as, and the codec for the bracketed
//! "system actions" field.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod actions;
mod escape;
mod role;
mod telemetry;
mod turn;

pub use actions::{BracketBalance, bracket_balance, display_action, format_actions, parse_actions};
pub use escape::{escape_newlines, unescape_newlines};
pub use role::Role;
pub use telemetry::init_tracing;
pub use turn::{Turn, TurnBuilder, TurnBuilderError, TurnRecord, renumber};
