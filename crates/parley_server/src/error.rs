//! Mapping of Parley errors onto HTTP responses.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use parley_error::{
    JsonError, ParleyError, ParleyErrorKind, ScriptError, ScriptErrorKind, ServerError, ServerErrorKind,
    StorageError, StorageErrorKind,
};
use serde_json::json;

/// Error returned by handlers, rendered as `{"error": "..."}`.
#[derive(Debug, derive_more::Display)]
#[display("{}", _0)]
pub struct ApiError(ParleyError);

impl ApiError {
    /// The wrapped error.
    pub fn inner(&self) -> &ParleyError {
        &self.0
    }

    /// HTTP status for the wrapped error.
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            ParleyErrorKind::Script(e) => match e.kind {
                ScriptErrorKind::InvalidRole(_) | ScriptErrorKind::PositionOutOfRange { .. } => {
                    StatusCode::BAD_REQUEST
                }
                ScriptErrorKind::InvalidSessionState(_) => StatusCode::CONFLICT,
            },
            ParleyErrorKind::Storage(e) => match e.kind {
                StorageErrorKind::NotFound(_) => StatusCode::NOT_FOUND,
                StorageErrorKind::InvalidName(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ParleyErrorKind::Server(e) => match e.kind {
                ServerErrorKind::Unauthorized | ServerErrorKind::InvalidPassword => {
                    StatusCode::UNAUTHORIZED
                }
                ServerErrorKind::BadRequest(_) => StatusCode::BAD_REQUEST,
                ServerErrorKind::RouteNotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ParleyErrorKind::Json(_) => StatusCode::BAD_REQUEST,
            ParleyErrorKind::Config(_) | ParleyErrorKind::Terminal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client-facing message, without source locations.
    pub fn message(&self) -> String {
        match self.0.kind() {
            ParleyErrorKind::Script(e) => e.kind.to_string(),
            ParleyErrorKind::Storage(e) => e.kind.to_string(),
            ParleyErrorKind::Server(e) => e.kind.to_string(),
            ParleyErrorKind::Json(e) => e.message.clone(),
            ParleyErrorKind::Config(e) => e.message.clone(),
            ParleyErrorKind::Terminal(e) => e.message.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, status = %status, "Request rejected");
        }
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

impl From<ParleyError> for ApiError {
    fn from(err: ParleyError) -> Self {
        Self(err)
    }
}

impl From<ScriptError> for ApiError {
    fn from(err: ScriptError) -> Self {
        Self(err.into())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        Self(err.into())
    }
}

impl From<ServerError> for ApiError {
    fn from(err: ServerError) -> Self {
        Self(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(JsonError::new(rejection.body_text()).into())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(ServerError::new(ServerErrorKind::BadRequest(rejection.body_text())).into())
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
