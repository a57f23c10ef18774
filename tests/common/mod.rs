use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use farmledger_api::{
    app_router,
    auth::SESSION_COOKIE,
    config::AppConfig,
    db::{self, DbConfig},
    AppState,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_USERNAME: &str = "tester";
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Helper harness for spinning up an application backed by an in-memory
/// SQLite database, with one operator account and an open session.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    cookie: String,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            0,
            "test".to_string(),
        );

        // A single connection keeps every statement on the same
        // in-memory database.
        let db_cfg = DbConfig {
            url: cfg.database_url.clone(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
        };
        let pool = db::establish_connection_with_config(&db_cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);

        state
            .services
            .users
            .create_user(TEST_USERNAME, TEST_PASSWORD)
            .await
            .expect("create test account");
        let session = state
            .services
            .sessions
            .login(TEST_USERNAME, TEST_PASSWORD)
            .await
            .expect("open test session");

        let router = app_router(state.clone());

        Self {
            router,
            state,
            cookie: format!("{}={}", SESSION_COOKIE, session.token),
        }
    }

    /// Send a request with an optional session cookie and optional
    /// form-encoded body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        form: Option<&[(&str, &str)]>,
        cookie: Option<&str>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let body = if let Some(fields) = form {
            builder = builder.header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            );
            Body::from(encode_form(fields))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Convenience helper for requests carrying the default session.
    pub async fn request_authenticated(
        &self,
        method: Method,
        uri: &str,
        form: Option<&[(&str, &str)]>,
    ) -> axum::response::Response {
        let cookie = self.cookie.clone();
        self.request(method, uri, form, Some(&cookie)).await
    }

    #[allow(dead_code)]
    pub fn session_cookie(&self) -> &str {
        &self.cookie
    }
}

fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{}={}", name, urlencode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            other => out.push_str(&format!("%{:02X}", other)),
        }
    }
    out
}

/// Collect a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("response body is not valid JSON")
}

/// Collect a response body as raw bytes.
#[allow(dead_code)]
pub async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("read response body")
        .to_bytes()
        .to_vec()
}
