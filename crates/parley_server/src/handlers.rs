//! Request handlers for the conversation API.

use crate::auth::{auth_cookie, is_authenticated, verify_password};
use crate::{ApiError, ApiResult, AppState};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, Uri, header::SET_COOKIE};
use axum::response::IntoResponse;
use parley_core::{Role, TurnRecord};
use parley_error::{ServerError, ServerErrorKind};
use parley_script::{Advance, reconcile_records};
use parley_storage::ConversationSummary;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, instrument};

/// Login body.
#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    /// Shared access password
    #[serde(default)]
    pub password: String,
}

/// New conversation body.
#[derive(Debug, Deserialize)]
pub struct CreateConversationRequest {
    /// Display name
    #[serde(default)]
    pub name: String,
}

/// Body naming a conversation, with an optional free-text user message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationRequest {
    /// Target conversation
    #[serde(default)]
    pub conversation_id: String,
    /// What the user typed; playback does not depend on it
    #[serde(default)]
    pub message: Option<String>,
}

/// Query naming a conversation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationQuery {
    /// Target conversation
    #[serde(default)]
    pub conversation_id: String,
}

/// Edited script submitted by the editor.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveConversationRequest {
    /// Target conversation
    #[serde(default)]
    pub conversation_id: String,
    /// Rows in their final order
    #[serde(default)]
    pub conversation_data: Vec<TurnRecord>,
}

/// One playback step as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextMessageResponse {
    /// Agent message to show
    pub current_text: Option<String>,
    /// Role of the shown message
    pub current_role: Option<Role>,
    /// Actions of the shown message, brackets included
    pub current_actions: Vec<String>,
    /// Suggested reply
    pub preview_text: Option<String>,
    /// Role of the suggested reply
    pub preview_role: Option<Role>,
    /// Whether playback can continue
    pub has_more: bool,
}

impl From<Advance> for NextMessageResponse {
    fn from(step: Advance) -> Self {
        Self {
            current_text: step.current_text().map(str::to_string),
            current_role: step.current_role(),
            current_actions: step.current_actions().to_vec(),
            preview_text: step.preview_text().map(str::to_string),
            preview_role: step.preview_role(),
            has_more: *step.has_more(),
        }
    }
}

fn require_id(id: &str) -> ApiResult<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ServerError::new(ServerErrorKind::BadRequest(
            "conversationId is required".to_string(),
        ))
        .into());
    }
    Ok(id)
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// `POST /api/auth`
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    verify_password(&state.config().auth, &request.password)?;

    info!("Client authenticated");
    Ok((
        StatusCode::OK,
        [(SET_COOKIE, auth_cookie(&state.config().auth))],
        Json(json!({"success": true})),
    ))
}

/// `GET /api/conversations`
#[instrument(skip_all)]
pub async fn list_conversations(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ConversationSummary>>> {
    Ok(Json(state.repository().list().await?))
}

/// `POST /api/conversations`
#[instrument(skip_all)]
pub async fn create_conversation(
    State(state): State<AppState>,
    payload: Result<Json<CreateConversationRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    let summary = state.repository().create(&request.name).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// `POST /api/next-message`
#[instrument(skip_all)]
pub async fn next_message(
    State(state): State<AppState>,
    payload: Result<Json<ConversationRequest>, JsonRejection>,
) -> ApiResult<Json<NextMessageResponse>> {
    let Json(request) = payload?;
    let id = require_id(&request.conversation_id)?;
    if let Some(message) = &request.message {
        debug!(conversation = %id, chars = message.len(), "User message received");
    }

    let handle = state.loaded_session(id).await?;
    let step = handle.lock().advance()?;
    Ok(Json(step.into()))
}

/// `POST /api/reset`
#[instrument(skip_all)]
pub async fn reset_conversation(
    State(state): State<AppState>,
    payload: Result<Json<ConversationRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    let id = require_id(&request.conversation_id)?;

    if let Some(handle) = state.sessions().get(id) {
        handle.lock().reset();
    }
    debug!(conversation = %id, "Playback reset");
    Ok(Json(json!({"message": "Conversation reset"})))
}

/// `GET /api/conversation`
#[instrument(skip_all)]
pub async fn get_conversation(
    State(state): State<AppState>,
    query: Result<Query<ConversationQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<TurnRecord>>> {
    let Query(query) = query?;
    let id = require_id(&query.conversation_id)?;

    let handle = state.loaded_session(id).await?;
    let records = handle.lock().export_turns()?;
    Ok(Json(records))
}

/// `POST /api/conversation`
///
/// Saves the submitted rows in order, then reloads the session from storage
/// so playback restarts against the saved script. Overlapping saves run one at
/// a time, so the session always ends up on the last stored script.
#[instrument(skip_all)]
pub async fn save_conversation(
    State(state): State<AppState>,
    payload: Result<Json<SaveConversationRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    let id = require_id(&request.conversation_id)?;

    let records = reconcile_records(&request.conversation_data)?;
    let _guard = state.save_lock().lock().await;
    state.repository().save(id, &records).await?;
    let stored = state.repository().load(id).await?;

    let handle = state.sessions().session(id);
    handle.lock().load_turns(&stored)?;

    info!(conversation = %id, rows = records.len(), "Conversation saved");
    Ok(Json(json!({
        "message": "Conversation saved successfully",
        "count": records.len(),
    })))
}

/// Fallback for unmatched paths. Unknown `/api` paths still require the cookie.
pub async fn not_found(headers: HeaderMap, uri: Uri) -> ApiError {
    let path = uri.path();
    if (path == "/api" || path.starts_with("/api/")) && !is_authenticated(&headers) {
        return ServerError::new(ServerErrorKind::Unauthorized).into();
    }
    ServerError::new(ServerErrorKind::RouteNotFound(path.to_string())).into()
}
