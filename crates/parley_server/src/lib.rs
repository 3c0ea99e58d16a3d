//! HTTP API for Parley.
//!
//! Exposes conversation management, playback and the script editor over JSON,
//! behind a shared-password cookie gate.
//!
//! # Example
//!
//! ```no_run
//! use parley_server::{AppState, ParleyConfig, serve};
//! use parley_storage::CsvConversationStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ParleyConfig::load()?;
//! let store = CsvConversationStore::new(&config.storage.data_dir)?;
//! let addr = config.server.socket_addr()?;
//!
//! serve(AppState::new(Arc::new(store), config), addr).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod config;
mod error;
mod handlers;
mod server;
mod state;

pub use auth::{AUTH_COOKIE, auth_cookie, is_authenticated, require_auth, verify_password};
pub use config::{
    AuthConfig, LoggingConfig, PASSWORD_ENV, ParleyConfig, ServerConfig, StorageConfig,
};
pub use error::{ApiError, ApiResult};
pub use handlers::{
    AuthRequest, ConversationQuery, ConversationRequest, CreateConversationRequest,
    NextMessageResponse, SaveConversationRequest,
};
pub use server::{router, serve};
pub use state::AppState;
