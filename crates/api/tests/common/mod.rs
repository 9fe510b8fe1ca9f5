#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use lander_api::auth::jwt::JwtConfig;
use lander_api::config::{LogFormat, ServerConfig};
use lander_api::media::LocalBlobStore;
use lander_api::router::build_app_router;
use lander_api::state::AppState;
use lander_db::models::content_section::ContentSection;
use lander_db::{ContentStore, MemoryContentStore, MemoryOperatorStore, StoreError};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_EMAIL: &str = "ops@example.com";
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// A router over in-memory stores plus handles to those stores.
pub struct TestApp {
    pub router: Router,
    pub content: MemoryContentStore,
    pub operators: MemoryOperatorStore,
    pub config: ServerConfig,
    /// Keeps the media directory alive for the test's duration.
    pub media_dir: TempDir,
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(media_root: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        media_root,
        public_base_url: "http://localhost:3000".to_string(),
        max_upload_bytes: 1024 * 1024,
        allow_signup: false,
        reveal_after_secs: 60,
        log_format: LogFormat::Text,
    }
}

/// Build the full application router with all middleware layers.
pub fn build_test_app() -> TestApp {
    build_test_app_with(|_| {})
}

/// Same as [`build_test_app`], with a hook to adjust the config first.
pub fn build_test_app_with(adjust: impl FnOnce(&mut ServerConfig)) -> TestApp {
    let content = MemoryContentStore::new();
    build_app(Arc::new(content.clone()), content, adjust)
}

/// An app whose content store fails every call with a backend error.
pub fn build_failing_app() -> TestApp {
    build_app(Arc::new(FailingContentStore), MemoryContentStore::new(), |_| {})
}

fn build_app(
    store: Arc<dyn ContentStore>,
    content: MemoryContentStore,
    adjust: impl FnOnce(&mut ServerConfig),
) -> TestApp {
    let media_dir = tempfile::tempdir().expect("tempdir");
    let mut config = test_config(media_dir.path().to_path_buf());
    adjust(&mut config);

    let operators = MemoryOperatorStore::new();
    let state = AppState {
        content: store,
        operators: Arc::new(operators.clone()),
        media: Arc::new(LocalBlobStore::new(
            media_dir.path(),
            &config.public_base_url,
        )),
        config: Arc::new(config.clone()),
    };
    let router = build_app_router(state, &config).expect("router builds");

    TestApp {
        router,
        content,
        operators,
        config,
        media_dir,
    }
}

/// Content store whose backend is always down.
pub struct FailingContentStore;

#[async_trait]
impl ContentStore for FailingContentStore {
    async fn fetch_section(&self, _section_name: &str) -> Result<ContentSection, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn fetch_all_sections(&self) -> Result<Vec<ContentSection>, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn upsert_section(
        &self,
        _section_name: &str,
        _content: &Value,
    ) -> Result<ContentSection, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: &TestApp, request: Request<Body>) -> Response<Body> {
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &TestApp, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: &TestApp, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &TestApp, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::POST, uri, None, body).await
}

pub async fn post_json_auth(app: &TestApp, uri: &str, token: &str, body: Value) -> Response<Body> {
    send_json(app, Method::POST, uri, Some(token), body).await
}

pub async fn put_json_auth(app: &TestApp, uri: &str, token: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, Some(token), body).await
}

async fn send_json(
    app: &TestApp,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Flow helpers
// ---------------------------------------------------------------------------

/// Sign up the bootstrap operator and log in, returning the login body.
pub async fn bootstrap_operator(app: &TestApp) -> Value {
    let body = json!({ "email": TEST_EMAIL, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/signup", body.clone()).await;
    assert_eq!(response.status(), 201, "bootstrap signup should succeed");

    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), 200, "login should succeed");
    body_json(response).await
}

/// Access token for a freshly bootstrapped operator.
pub async fn operator_token(app: &TestApp) -> String {
    let login = bootstrap_operator(app).await;
    login["access_token"].as_str().unwrap().to_string()
}
