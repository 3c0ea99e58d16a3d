//! HTTP API integration tests: auth gate, playback, editor round trips.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use parley_server::{AppState, ParleyConfig, router};
use parley_storage::{ConversationRepository, CsvConversationStore, InMemoryConversationStore};
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const COOKIE: &str = "authenticated=true";

fn config_with_password(password: Option<&str>) -> ParleyConfig {
    let mut config = ParleyConfig::default();
    config.auth.password = password.map(str::to_string);
    config
}

fn app_with(repository: Arc<dyn ConversationRepository>) -> Router {
    router(AppState::new(repository, config_with_password(Some("letmein"))))
}

fn app() -> Router {
    app_with(Arc::new(InMemoryConversationStore::new()))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, COOKIE)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_authed(uri: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::COOKIE, COOKIE)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let payload = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, payload)
}

async fn create_with_rows(app: &Router, rows: Value) -> String {
    let (status, created) = send(app, post_json("/api/conversations", json!({"name": "Demo"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, saved) = send(
        app,
        post_json(
            "/api/conversation",
            json!({"conversationId": id, "conversationData": rows}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", saved);
    id
}

fn sample_rows() -> Value {
    json!([
        {"turn": 1, "speaker": "AI Agent", "message": "a1", "system_actions": "Fetches profile"},
        {"turn": 2, "speaker": "Merchant", "message": "m1", "system_actions": ""},
        {"turn": 3, "speaker": "AI Agent", "message": "a2", "system_actions": "[One, two],[Three]"}
    ])
}

#[tokio::test]
async fn health_is_public() {
    let (status, payload) = send(&app(), Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["status"], "ok");
}

#[tokio::test]
async fn api_requires_cookie() {
    let app = app();
    let request = Request::get("/api/conversations").body(Body::empty()).unwrap();
    let (status, payload) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(payload, json!({"error": "Unauthorized"}));

    let request = Request::get("/api/conversations")
        .header(header::COOKIE, "theme=dark; authenticated=false")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&app, request).await.0, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_api_paths_are_gated_before_not_found() {
    let app = app();
    let request = Request::get("/api/nope").body(Body::empty()).unwrap();
    assert_eq!(send(&app, request).await.0, StatusCode::UNAUTHORIZED);

    let (status, payload) = send(&app, get_authed("/api/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(payload["error"].as_str().unwrap().contains("/api/nope"));

    let request = Request::get("/elsewhere").body(Body::empty()).unwrap();
    assert_eq!(send(&app, request).await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_sets_cookie() {
    let app = app();
    let request = Request::post("/api/auth")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"password": "letmein"}).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("authenticated=true"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Max-Age=604800"));
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let request = Request::post("/api/auth")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"password": "nope"}).to_string()))
        .unwrap();
    let (status, payload) = send(&app(), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(payload["error"], "Invalid password");
}

#[tokio::test]
async fn login_without_configured_password_is_server_error() {
    let app = router(AppState::new(
        Arc::new(InMemoryConversationStore::new()),
        config_with_password(None),
    ));
    let request = Request::post("/api/auth")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"password": ""}).to_string()))
        .unwrap();
    let (status, payload) = send(&app, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(payload["error"], "Access password not configured");
}

#[tokio::test]
async fn next_message_plays_agent_turns_with_preview() {
    let app = app();
    let id = create_with_rows(&app, sample_rows()).await;

    let (status, first) = send(&app, post_json("/api/next-message", json!({"conversationId": id, "message": "hi"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["currentText"], "a1");
    assert_eq!(first["currentRole"], "AI Agent");
    assert_eq!(first["currentActions"], json!(["[Fetches profile]"]));
    assert_eq!(first["previewText"], "m1");
    assert_eq!(first["previewRole"], "Merchant");
    assert_eq!(first["hasMore"], true);

    let (_, second) = send(&app, post_json("/api/next-message", json!({"conversationId": id}))).await;
    assert_eq!(second["currentText"], "a2");
    assert_eq!(second["currentActions"], json!(["[One, two]", "[Three]"]));
    assert_eq!(second["previewText"], Value::Null);
    assert_eq!(second["hasMore"], false);

    let (_, third) = send(&app, post_json("/api/next-message", json!({"conversationId": id}))).await;
    assert_eq!(third["currentText"], Value::Null);
    assert_eq!(third["hasMore"], false);

    let (status, reset) = send(&app, post_json("/api/reset", json!({"conversationId": id}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reset["message"], "Conversation reset");

    let (_, again) = send(&app, post_json("/api/next-message", json!({"conversationId": id}))).await;
    assert_eq!(again["currentText"], "a1");
}

#[tokio::test]
async fn saving_resets_playback_and_renumbers() {
    let app = app();
    let id = create_with_rows(&app, sample_rows()).await;
    send(&app, post_json("/api/next-message", json!({"conversationId": id}))).await;

    let edited = json!([
        {"turn": 9, "speaker": "AI Agent", "message": "new first\nsecond line", "system_actions": ""},
        {"turn": 1, "speaker": "Merchant", "message": "reply", "system_actions": "Waves, smiles"}
    ]);
    let (status, saved) = send(
        &app,
        post_json("/api/conversation", json!({"conversationId": id, "conversationData": edited})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved, json!({"message": "Conversation saved successfully", "count": 2}));

    let (status, rows) = send(&app, get_authed(&format!("/api/conversation?conversationId={}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows[0]["turn"], 1);
    assert_eq!(rows[0]["message"], "new first\nsecond line");
    assert_eq!(rows[1]["turn"], 2);
    assert_eq!(rows[1]["system_actions"], "[Waves],[smiles]");

    let (_, step) = send(&app, post_json("/api/next-message", json!({"conversationId": id}))).await;
    assert_eq!(step["currentText"], "new first\nsecond line");
}

#[tokio::test]
async fn save_ignores_odd_turn_values() {
    let app = app();
    let id = create_with_rows(&app, sample_rows()).await;

    let edited = json!([
        {"turn": -1, "speaker": "AI Agent", "message": "first", "system_actions": ""},
        {"turn": 2.5, "speaker": "Merchant", "message": "second", "system_actions": ""},
        {"turn": 2.0, "speaker": "AI Agent", "message": "third", "system_actions": ""}
    ]);
    let (status, saved) = send(
        &app,
        post_json("/api/conversation", json!({"conversationId": id, "conversationData": edited})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", saved);
    assert_eq!(saved["count"], 3);

    let (_, rows) = send(&app, get_authed(&format!("/api/conversation?conversationId={}", id))).await;
    let turns: Vec<u64> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["turn"].as_u64().unwrap())
        .collect();
    assert_eq!(turns, vec![1, 2, 3]);
    assert_eq!(rows[0]["message"], "first");
}

#[tokio::test]
async fn overlapping_saves_leave_session_on_stored_script() {
    let store = Arc::new(InMemoryConversationStore::new());
    let app = app_with(store.clone());
    let id = create_with_rows(&app, sample_rows()).await;

    let mut saves = Vec::new();
    for n in 0..16 {
        let app = app.clone();
        let body = json!({
            "conversationId": id,
            "conversationData": [
                {"turn": 1, "speaker": "AI Agent", "message": format!("version {}", n), "system_actions": ""}
            ],
        });
        saves.push(tokio::spawn(async move {
            send(&app, post_json("/api/conversation", body)).await.0
        }));
    }
    for save in saves {
        assert_eq!(save.await.unwrap(), StatusCode::OK);
    }

    let stored = store.load(&id).await.unwrap();
    let (_, step) = send(&app, post_json("/api/next-message", json!({"conversationId": id}))).await;
    assert_eq!(step["currentText"], stored[0].message.as_str());
}

#[tokio::test]
async fn save_rejects_unknown_speaker() {
    let app = app();
    let id = create_with_rows(&app, sample_rows()).await;

    let bad = json!([{"turn": 1, "speaker": "Narrator", "message": "hmm", "system_actions": ""}]);
    let (status, payload) = send(
        &app,
        post_json("/api/conversation", json!({"conversationId": id, "conversationData": bad})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(payload["error"].as_str().unwrap().contains("Narrator"));

    let (_, rows) = send(&app, get_authed(&format!("/api/conversation?conversationId={}", id))).await;
    assert_eq!(rows.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn unknown_conversation_is_not_found() {
    let app = app();
    let (status, _) = send(&app, post_json("/api/next-message", json!({"conversationId": "missing"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get_authed("/api/conversation?conversationId=missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_conversation_id_is_bad_request() {
    let app = app();
    let (status, _) = send(&app, post_json("/api/next-message", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, post_json("/api/conversations", json!({"name": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn conversations_are_listed_newest_first_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(CsvConversationStore::new(temp_dir.path()).unwrap());
    let app = app_with(store);

    let first = create_with_rows(&app, sample_rows()).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let (_, second) = send(&app, post_json("/api/conversations", json!({"name": "Later"}))).await;

    let (status, listed) = send(&app, get_authed("/api/conversations")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed[0]["id"], second["id"]);
    assert_eq!(listed[1]["id"], first.as_str());
    assert_eq!(listed[1]["turn_count"], 3);
}
