//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parley - replay scripted AI agent / merchant conversations
#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(about = "Replay scripted AI agent / merchant conversations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file layered over the bundled defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Interface to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(long)]
        port: Option<u16>,

        /// Conversation directory (overrides config)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// List stored conversations, newest first
    List,

    /// Create an empty conversation
    Create {
        /// Display name
        name: String,
    },

    /// Play a conversation in the terminal
    Play {
        /// Conversation id as shown by `parley list`
        conversation_id: String,
    },
}
