//! `serve` command handler.

use parley::{AppState, CsvConversationStore, ParleyConfig, ParleyResult, serve};
use std::path::PathBuf;
use std::sync::Arc;

/// Applies command-line overrides and runs the HTTP API until Ctrl+C.
pub async fn run_server(
    mut config: ParleyConfig,
    host: Option<String>,
    port: Option<u16>,
    data_dir: Option<PathBuf>,
) -> ParleyResult<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(data_dir) = data_dir {
        config.storage.data_dir = data_dir;
    }

    let addr = config.server.socket_addr()?;
    let store = CsvConversationStore::new(&config.storage.data_dir)?;
    tracing::info!(data_dir = %config.storage.data_dir.display(), "Starting Parley server");

    serve(AppState::new(Arc::new(store), config), addr).await
}
