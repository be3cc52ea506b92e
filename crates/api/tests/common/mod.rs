#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use chrono::Duration;
use giapha_api::auth::jwt::{generate_token, JwtConfig};
use giapha_api::config::ServerConfig;
use giapha_api::router::build_app_router;
use giapha_api::state::AppState;
use giapha_cloud::memory::MemoryObjectStore;
use giapha_core::roles::{PROFILE_STATUS_ACTIVE, ROLE_ADMIN, ROLE_EDITOR, ROLE_MEMBER};
use giapha_core::types::DbId;
use giapha_db::memory::MemoryStore;
use giapha_events::RecordingNotifier;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

pub const CRON_SECRET: &str = "cron-test-secret";
pub const UPLOAD_QUOTA: i64 = 2;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-jwt-secret".to_string(),
            audience: "authenticated".to_string(),
        },
        cron_secret: CRON_SECRET.to_string(),
        media_upload_quota: UPLOAD_QUOTA,
    }
}

/// The full router over in-memory ports, plus handles to those ports and
/// one active user per role.
pub struct TestApp {
    pub config: ServerConfig,
    pub store: Arc<MemoryStore>,
    pub objects: Arc<MemoryObjectStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub admin: DbId,
    pub editor: DbId,
    pub member: DbId,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let admin = store
            .add_profile(Uuid::new_v4(), "admin@giapha.vn", ROLE_ADMIN, PROFILE_STATUS_ACTIVE)
            .id;
        let editor = store
            .add_profile(Uuid::new_v4(), "editor@giapha.vn", ROLE_EDITOR, PROFILE_STATUS_ACTIVE)
            .id;
        let member = store
            .add_profile(Uuid::new_v4(), "member@giapha.vn", ROLE_MEMBER, PROFILE_STATUS_ACTIVE)
            .id;
        Self {
            config: test_config(),
            store,
            objects: Arc::new(MemoryObjectStore::new()),
            notifier: Arc::new(RecordingNotifier::new()),
            admin,
            editor,
            member,
        }
    }

    /// A fresh router over the shared ports; `oneshot` consumes it.
    pub fn router(&self) -> Router {
        let state = AppState {
            store: self.store.clone(),
            objects: self.objects.clone(),
            notifier: self.notifier.clone(),
            config: Arc::new(self.config.clone()),
        };
        build_app_router(state, &self.config)
    }

    /// A valid access token for `user`.
    pub fn token(&self, user: DbId) -> String {
        generate_token(user, None, Duration::hours(1), &self.config.jwt)
            .expect("token generation should succeed")
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should be served")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request("POST", uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request("POST", uri, Some(token), body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request("PATCH", uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

const BOUNDARY: &str = "giapha-test-boundary";

/// A single-file multipart upload with optional text fields.
pub fn multipart_request(
    uri: &str,
    token: &str,
    file_name: &str,
    content_type: &str,
    bytes: &[u8],
    fields: &[(&str, &str)],
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// A request with an arbitrary body and content type.
pub async fn send_raw(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    content_type: &str,
    body: &str,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", content_type);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}
