//! Router assembly and the listening loop.

use crate::auth::require_auth;
use crate::handlers::{
    create_conversation, get_conversation, health, list_conversations, login, next_message,
    not_found, reset_conversation, save_conversation,
};
use crate::AppState;
use axum::Router;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use parley_error::{ParleyResult, ServerError, ServerErrorKind};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, instrument};

/// Builds the application router.
///
/// Everything under `/api` except `/api/auth` requires the auth cookie,
/// including paths no route matches.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/conversations",
            get(list_conversations).post(create_conversation),
        )
        .route("/api/next-message", post(next_message))
        .route("/api/reset", post(reset_conversation))
        .route(
            "/api/conversation",
            get(get_conversation).post(save_conversation),
        )
        .route_layer(from_fn(require_auth))
        .route("/api/auth", post(login))
        .route("/health", get(health))
        .fallback(not_found)
        .with_state(state)
}

/// Serves the API on `addr` until Ctrl+C.
///
/// # Errors
///
/// Returns `Bind` if the address is unavailable and `Serve` if the server loop fails.
#[instrument(skip(state))]
pub async fn serve(state: AppState, addr: SocketAddr) -> ParleyResult<()> {
    if state.config().auth.password().is_none() {
        tracing::warn!("No access password configured; logins will be refused");
    }

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Bind(format!("{}: {}", addr, e))))?;

    info!(%addr, "Parley server listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;

    info!("Parley server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
