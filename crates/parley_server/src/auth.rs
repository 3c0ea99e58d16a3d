//! Shared-password login and the cookie gate in front of the API.

use crate::{ApiError, AuthConfig};
use axum::extract::Request;
use axum::http::{HeaderMap, header::COOKIE};
use axum::middleware::Next;
use axum::response::Response;
use parley_error::{ServerError, ServerErrorKind};

/// Name of the cookie set after a successful login.
pub const AUTH_COOKIE: &str = "authenticated";

/// Checks a submitted password against the configured one.
///
/// # Errors
///
/// `AuthNotConfigured` when no password is set, `InvalidPassword` on mismatch.
pub fn verify_password(config: &AuthConfig, submitted: &str) -> Result<(), ServerError> {
    let Some(expected) = config.password() else {
        return Err(ServerError::new(ServerErrorKind::AuthNotConfigured));
    };
    if submitted != expected {
        return Err(ServerError::new(ServerErrorKind::InvalidPassword));
    }
    Ok(())
}

/// Builds the `Set-Cookie` value granting access.
pub fn auth_cookie(config: &AuthConfig) -> String {
    let mut cookie = format!(
        "{}=true; Path=/; Max-Age={}; HttpOnly; SameSite=Strict",
        AUTH_COOKIE, config.cookie_max_age_secs
    );
    if config.secure_cookie {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Whether the request carries `authenticated=true`.
pub fn is_authenticated(headers: &HeaderMap) -> bool {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name == AUTH_COOKIE && value == "true")
}

/// Middleware rejecting requests without the auth cookie.
pub async fn require_auth(request: Request, next: Next) -> Result<Response, ApiError> {
    if !is_authenticated(request.headers()) {
        tracing::debug!(path = %request.uri().path(), "Rejecting unauthenticated request");
        return Err(ServerError::new(ServerErrorKind::Unauthorized).into());
    }
    Ok(next.run(request).await)
}
