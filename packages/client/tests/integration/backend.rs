use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

pub const GOOD_TOKEN: &str = "good-token";

#[derive(Debug, Clone, Default)]
pub struct UploadRecord {
    pub fields: HashMap<String, String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub file_len: usize,
}

/// What the mock saw and what it serves.
#[derive(Clone, Default)]
pub struct BackendState {
    pub feed: Arc<Mutex<Vec<Value>>>,
    pub feed_queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    pub uploads: Arc<Mutex<Vec<UploadRecord>>>,
    pub comments: Arc<Mutex<Vec<Value>>>,
    pub views: Arc<Mutex<Vec<(Value, Option<String>)>>>,
    pub checkouts: Arc<Mutex<Vec<Value>>>,
}

pub struct TestBackend {
    pub url: String,
    pub state: BackendState,
}

impl TestBackend {
    pub async fn start() -> Self {
        let state = BackendState::default();
        let app = Router::new()
            .route("/content/feed", get(feed))
            .route("/content/upload", post(upload))
            .route("/content/analytics/view", post(view))
            .route("/content/{id}", get(content))
            .route("/creator/dashboard", get(dashboard))
            .route("/chat/comments/{id}", get(comments))
            .route("/chat/comment", post(comment))
            .route("/payments/checkout", post(checkout))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend");
        });

        Self {
            url: format!("http://{addr}"),
            state,
        }
    }
}

pub fn item(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "creator_id": "creator-1",
        "title": title,
        "tags": [],
        "visibility": "public",
        "media_url": format!("https://media.test/video/{id}.mp4"),
        "created_at": "2024-05-01T12:00:00Z",
    })
}

/// A file under the system temp dir, removed on drop.
pub struct TempMedia(pub PathBuf);

impl TempMedia {
    pub fn create(extension: &str, len: usize) -> Self {
        let path = std::env::temp_dir().join(format!("{}.{extension}", uuid::Uuid::new_v4()));
        let bytes: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        std::fs::write(&path, bytes).expect("write temp media");
        Self(path)
    }
}

impl Drop for TempMedia {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn require_auth(headers: &HeaderMap) -> Result<(), Response> {
    match bearer(headers).as_deref() {
        Some(GOOD_TOKEN) => Ok(()),
        _ => Err((StatusCode::UNAUTHORIZED, "missing or invalid token").into_response()),
    }
}

async fn feed(
    State(state): State<BackendState>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Vec<Value>> {
    state.feed_queries.lock().unwrap().push(query);
    Json(state.feed.lock().unwrap().clone())
}

async fn content(Path(id): Path<String>) -> Response {
    if id == "missing" {
        return (StatusCode::NOT_FOUND, "content not found").into_response();
    }
    Json(item(&id, "Found")).into_response()
}

async fn dashboard(headers: HeaderMap) -> Response {
    if let Err(denied) = require_auth(&headers) {
        return denied;
    }
    Json(json!({
        "totalViews": 1200,
        "totalWatchTime": 5400,
        "totalTips": 30.0,
        "totalComments": 60,
        "totalContent": 4,
        "tipCount": 3,
    }))
    .into_response()
}

async fn upload(
    State(state): State<BackendState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if let Err(denied) = require_auth(&headers) {
        return denied;
    }

    let mut record = UploadRecord::default();
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            record.file_name = field.file_name().map(str::to_string);
            record.content_type = field.content_type().map(str::to_string);
            record.file_len = field.bytes().await.expect("file bytes").len();
        } else {
            let value = field.text().await.expect("text field");
            record.fields.insert(name, value);
        }
    }

    if record.file_len == 0 {
        return (StatusCode::BAD_REQUEST, "file is required").into_response();
    }
    let title = record.fields.get("title").cloned().unwrap_or_default();
    state.uploads.lock().unwrap().push(record);
    (StatusCode::CREATED, Json(item("uploaded-1", &title))).into_response()
}

async fn view(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    state.views.lock().unwrap().push((body, bearer(&headers)));
    StatusCode::NO_CONTENT
}

async fn comments(State(state): State<BackendState>, Path(id): Path<String>) -> Json<Vec<Value>> {
    let thread = state
        .comments
        .lock()
        .unwrap()
        .iter()
        .filter(|c| c["content_id"] == id.as_str())
        .cloned()
        .collect();
    Json(thread)
}

async fn comment(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(denied) = require_auth(&headers) {
        return denied;
    }
    let stored = json!({
        "id": uuid::Uuid::new_v4().to_string(),
        "content_id": body["content_id"],
        "user_id": "user-1",
        "text": body["text"],
        "parent_id": body.get("parent_id"),
        "created_at": "2024-05-01T12:00:00Z",
        "user": { "email": "fan@example.com" },
    });
    state.comments.lock().unwrap().push(stored.clone());
    (StatusCode::CREATED, Json(stored)).into_response()
}

async fn checkout(State(state): State<BackendState>, Json(body): Json<Value>) -> Response {
    let amount = body["amount"].as_f64().unwrap_or_default();
    if amount <= 0.0 {
        return (StatusCode::BAD_REQUEST, "amount must be positive").into_response();
    }
    state.checkouts.lock().unwrap().push(body);
    Json(json!({
        "checkout_url": "https://checkout.test/session/cs_test_1",
        "session_id": "cs_test_1",
    }))
    .into_response()
}
