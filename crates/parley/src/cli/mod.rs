//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the parley binary.

mod commands;
mod conversations;
mod play;
mod serve;

pub use commands::{Cli, Commands};
pub use conversations::{create_conversation, list_conversations};
pub use play::play_conversation;
pub use serve::run_server;
