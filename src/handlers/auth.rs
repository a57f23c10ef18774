use crate::auth::{clear_session_cookie, session_cookie, session_token};
use crate::errors::ServiceError;
use crate::AppState;
use axum::{
    extract::{Form, Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    pub next: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginPage {
    message: &'static str,
    next: Option<String>,
}

/// External values steer the redirect target, so only same-site paths
/// are honored.
fn safe_next(next: Option<String>) -> String {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => "/".to_string(),
    }
}

async fn login_page(Query(query): Query<LoginQuery>) -> impl IntoResponse {
    Json(LoginPage {
        message: "Sign in with your username and password",
        next: query.next,
    })
}

async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, ServiceError> {
    form.validate()?;
    let session = state
        .services
        .sessions
        .login(form.username.trim(), &form.password)
        .await?;

    let cookie = session_cookie(&session.token, state.config.session_ttl_hours);
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| ServiceError::InternalError("invalid session cookie".into()))?,
    );
    Ok((headers, Redirect::to(&safe_next(form.next))))
}

async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServiceError> {
    if let Some(token) = session_token(&headers) {
        state.services.sessions.logout(&token).await?;
    }
    let mut response_headers = HeaderMap::new();
    response_headers.insert(
        header::SET_COOKIE,
        clear_session_cookie()
            .parse()
            .map_err(|_| ServiceError::InternalError("invalid session cookie".into()))?,
    );
    Ok((response_headers, Redirect::to("/login")))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
}

#[cfg(test)]
mod tests {
    use super::safe_next;

    #[test]
    fn next_must_be_a_local_path() {
        assert_eq!(safe_next(Some("/sales".into())), "/sales");
        assert_eq!(safe_next(Some("https://evil.example".into())), "/");
        assert_eq!(safe_next(Some("//evil.example".into())), "/");
        assert_eq!(safe_next(None), "/");
    }
}
