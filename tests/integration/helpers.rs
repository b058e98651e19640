//! Shared test helpers for integration tests.
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use archive_core::config::{AppConfig, InitialAdminConfig};
use archive_database::DatabasePool;

const MULTIPART_BOUNDARY: &str = "archive-test-boundary";

/// Email of the administrator created by [`TestApp::with_admin`]
pub const ADMIN_EMAIL: &str = "root@example.com";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db: DatabasePool,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application over a private in-memory database
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a test application that bootstraps an administrator
    pub async fn with_admin() -> Self {
        let mut config = test_config();
        config.auth.initial_admin = Some(InitialAdminConfig {
            name: "Root Admin".into(),
            email: ADMIN_EMAIL.into(),
            password: "secret123".into(),
        });
        Self::with_config(config).await
    }

    /// Create a test application with a custom configuration
    pub async fn with_config(config: AppConfig) -> Self {
        let db = DatabasePool::connect_in_memory()
            .await
            .expect("Failed to open in-memory database");
        archive_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let state = archive_api::build_state(config.clone(), db.clone());
        archive_api::bootstrap(&state)
            .await
            .expect("Failed to bootstrap");
        let router = archive_api::build_app(state);

        Self { router, db, config }
    }

    /// Register a user through the API and return the response body
    pub async fn register(&self, name: &str, email: &str, role: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": "secret123",
                    "role": role,
                })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Register failed: {:?}",
            response.body
        );
        response.body
    }

    /// Register a user and return their bearer token
    pub async fn register_token(&self, name: &str, email: &str, role: &str) -> String {
        token_of(&self.register(name, email, role).await)
    }

    /// Login and return the bearer token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        token_of(&response.body)
    }

    /// Make a JSON HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Upload a document as multipart form data
    pub async fn upload(
        &self,
        token: &str,
        fields: &[(&str, &str)],
        file: Option<(&str, &[u8])>,
    ) -> TestResponse {
        let mut body: Vec<u8> = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((file_name, data)) = file {
            body.extend_from_slice(
                format!(
                    "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: text/plain\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/documents")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Upload a small text document and return its id
    pub async fn upload_document(&self, token: &str, title: &str, access_level: &str) -> i64 {
        let response = self
            .upload(
                token,
                &[("title", title), ("accessLevel", access_level)],
                Some(("notes.txt", b"parish register transcription")),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Upload failed: {:?}",
            response.body
        );
        response.body["id"].as_i64().expect("No id in upload response")
    }

    /// Submit a URL-encoded form, optionally carrying a cookie
    pub async fn form(
        &self,
        method: &str,
        path: &str,
        form: &str,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            req = req.header(COOKIE, cookie);
        }
        let req = req
            .body(Body::from(form.to_string()))
            .expect("Failed to build request");
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            text,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body text
    pub text: String,
    /// Parsed JSON body (`Null` when the body is not JSON)
    pub body: Value,
}

impl TestResponse {
    /// The `Location` header of a redirect
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    /// The `name=value` pair of the first `Set-Cookie` header
    pub fn cookie_pair(&self) -> Option<String> {
        self.headers
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.worker.email_delay_ms = 0;
    config.worker.document_delay_ms = 0;
    config.worker.notification_delay_ms = 0;
    config
}

fn token_of(body: &Value) -> String {
    body.get("token")
        .and_then(|v| v.as_str())
        .expect("No token in auth response")
        .to_string()
}
