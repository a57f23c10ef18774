//! FarmLedger API Library
//!
//! This crate provides the core functionality for the FarmLedger API:
//! herd and milk-production records, customer accounts with a running
//! balance, sales, payments, expenses and financial reports.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod services;

use axum::{middleware, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<db::DbPool>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(db: Arc<db::DbPool>, config: config::AppConfig) -> Self {
        let services = handlers::AppServices::new(db.clone(), &config);
        Self {
            db,
            config,
            services,
        }
    }
}

// Common response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            errors: None,
        }
    }

    pub fn validation_errors(errors: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some("Validation failed".to_string()),
            errors: Some(errors),
        }
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "farmledger-api",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Assemble the full application router. Everything except the login
/// form, logout and the liveness probe sits behind the session guard.
pub fn app_router(state: AppState) -> Router {
    let guarded = Router::new()
        .merge(handlers::dashboard::routes())
        .merge(handlers::cows::routes())
        .merge(handlers::milk::routes())
        .merge(handlers::health::routes())
        .merge(handlers::vaccinations::routes())
        .merge(handlers::customers::routes())
        .merge(handlers::sales::routes())
        .merge(handlers::payments::routes())
        .merge(handlers::expenses::routes())
        .merge(handlers::reports::routes())
        .merge(handlers::exports::routes())
        .layer(middleware::from_fn_with_state(
            state.services.sessions.clone(),
            auth::require_session,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(handlers::auth::routes())
        .merge(guarded)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_json<T: Serialize>(value: &T) -> Value {
        serde_json::to_value(value).expect("serializable")
    }

    #[test]
    fn success_envelope_carries_data() {
        let rendered = body_json(&ApiResponse::success(vec![1, 2, 3]));
        assert_eq!(rendered["success"], json!(true));
        assert_eq!(rendered["data"], json!([1, 2, 3]));
        assert_eq!(rendered["message"], json!(null));
    }

    #[test]
    fn error_envelope_has_no_data() {
        let rendered = body_json(&ApiResponse::<()>::error("oops".into()));
        assert_eq!(rendered["success"], json!(false));
        assert_eq!(rendered["message"], json!("oops"));
        assert_eq!(rendered["data"], json!(null));
    }

    #[test]
    fn validation_envelope_lists_failures() {
        let rendered =
            body_json(&ApiResponse::<()>::validation_errors(vec!["missing".into()]));
        assert_eq!(rendered["success"], json!(false));
        assert_eq!(rendered["message"], json!("Validation failed"));
        assert_eq!(rendered["errors"], json!(["missing"]));
    }
}
