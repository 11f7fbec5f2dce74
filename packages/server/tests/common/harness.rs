//! Test harness that builds the full router over in-memory dependencies.
//!
//! Requests are driven through `tower::ServiceExt::oneshot`, so no socket is
//! bound and every test gets its own stores.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use mindbridge_core::domains::auth::{bootstrap_admin, JwtService};
use mindbridge_core::kernel::test_dependencies::RecordingStorage;
use mindbridge_core::kernel::{BaseDirectoryService, InMemoryDirectory, ServerDeps};
use mindbridge_core::server::{build_app, AppOptions};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "editor@mindbridge.test";
pub const ADMIN_PASSWORD: &str = "correct-horse";

/// Response captured from a oneshot call
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "response was not JSON ({}): {}",
                e,
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub struct TestHarness {
    app: Router,
    pub deps: ServerDeps,
    pub storage: RecordingStorage,
    _upload_dir: TempDir,
}

impl TestHarness {
    /// Harness over the seeded mock directory
    pub async fn new() -> Self {
        Self::with_directory(Arc::new(InMemoryDirectory::new())).await
    }

    /// Harness with a specific directory backend behind `/api/search`
    pub async fn with_directory(directory: Arc<dyn BaseDirectoryService>) -> Self {
        let storage = RecordingStorage::new();
        let jwt_service = Arc::new(JwtService::new("test_secret", "test_issuer".to_string()));
        let deps = ServerDeps::in_memory(directory, Arc::new(storage.clone()), jwt_service);

        bootstrap_admin(deps.accounts.as_ref(), ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .expect("bootstrap admin");

        let upload_dir = tempfile::tempdir().expect("temp upload dir");
        let app = build_app(
            deps.clone(),
            AppOptions {
                allowed_origins: Vec::new(),
                upload_dir: upload_dir.path().to_path_buf(),
                secure_cookies: false,
            },
        );

        Self {
            app,
            deps,
            storage,
            _upload_dir: upload_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body")
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(request(Method::GET, uri, None, Body::empty())).await
    }

    pub async fn get_as(&self, uri: &str, token: &str) -> TestResponse {
        self.send(request(Method::GET, uri, Some(token), Body::empty()))
            .await
    }

    pub async fn post_json(&self, uri: &str, body: Value, token: Option<&str>) -> TestResponse {
        self.send(json_request(Method::POST, uri, token, body)).await
    }

    pub async fn put_json(&self, uri: &str, body: Value, token: &str) -> TestResponse {
        self.send(json_request(Method::PUT, uri, Some(token), body))
            .await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> TestResponse {
        self.send(request(Method::DELETE, uri, Some(token), Body::empty()))
            .await
    }

    /// Log in through the API and return the session token
    pub async fn admin_token(&self) -> String {
        let response = self
            .post_json(
                "/api/auth/login",
                serde_json::json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text());
        response.json()["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }
}

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(body).expect("valid request")
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut request = request(method, uri, token, Body::from(body.to_string()));
    request.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    request
}
