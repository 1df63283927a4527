//! Shared fixtures for HTTP integration tests.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use mcp_coordinator::{
    config::CoordinatorConfig,
    server::{AppState, router},
    storage::open_pool,
};
use rstest::fixture;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// A router over a fresh database.
pub struct HttpContext {
    /// Router under test.
    pub app: Router,
    /// Shared services behind the router.
    pub state: AppState,
    _dir: TempDir,
}

impl HttpContext {
    /// Sends a request and decodes the JSON response body.
    pub async fn send(&self, method: Method, uri: &str, body: Option<&Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");
        self.send_request(request).await
    }

    /// Sends a prepared request and decodes the JSON response body.
    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    /// `GET` shorthand.
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    /// `POST` shorthand with a JSON body.
    pub async fn post(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }
}

/// Provides a router over a database in a temporary directory.
#[fixture]
pub fn http() -> HttpContext {
    let dir = tempfile::tempdir().expect("create temporary directory");
    let config = CoordinatorConfig::default();
    let pool = open_pool(&dir.path().join("coordinator.db"), 2).expect("open database");
    let state = AppState::from_pool(pool, &config);
    HttpContext {
        app: router(state.clone(), config.server.enable_cors),
        state,
        _dir: dir,
    }
}
