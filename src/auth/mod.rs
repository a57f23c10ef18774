//! Session authentication.
//!
//! Login verifies an argon2 password hash and issues an opaque random
//! token, persisted in the `sessions` table and carried in an HttpOnly
//! cookie. Every route except the login pair is guarded by the
//! [`require_session`] middleware, which redirects unauthenticated
//! requests to `/login` with the original path in `next`. Handlers
//! receive the authenticated identity as an extractor argument; there
//! is no ambient current-user state.

use crate::db::DbPool;
use crate::entities::{session, user};
use crate::errors::ServiceError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::{Duration, Utc};
use rand::{distributions::Alphanumeric, thread_rng, Rng};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, Set};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Cookie carrying the session token
pub const SESSION_COOKIE: &str = "farmledger_session";

const SESSION_TOKEN_LEN: usize = 48;

/// The identity of the logged-in operator, passed explicitly into
/// handlers via the extractor.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub username: String,
}

/// Hash a plaintext password into a PHC-format argon2id string.
pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::InternalError(format!("password hashing failed: {}", e)))
}

/// Verify a plaintext password against a stored PHC hash.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, ServiceError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| ServiceError::InternalError(format!("malformed password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

fn generate_token() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Manages login sessions against the sessions table.
#[derive(Clone)]
pub struct SessionService {
    db: Arc<DbPool>,
    ttl: Duration,
}

impl SessionService {
    pub fn new(db: Arc<DbPool>, ttl_hours: i64) -> Self {
        Self {
            db,
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Check credentials and open a session. The rejection message never
    /// distinguishes an unknown username from a wrong password.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<session::Model, ServiceError> {
        let invalid = || ServiceError::AuthError("Invalid username or password".to_string());

        let account = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(password, &account.password_hash)? {
            warn!(username, "failed login attempt");
            return Err(invalid());
        }

        let now = Utc::now();
        let session = session::ActiveModel {
            token: Set(generate_token()),
            user_id: Set(account.id),
            created_at: Set(now),
            expires_at: Set(now + self.ttl),
        };
        let session = session.insert(self.db.as_ref()).await?;
        debug!(user_id = account.id, "session opened");
        Ok(session)
    }

    /// Resolve a session token to its user. Expired sessions are removed
    /// and reported as absent.
    pub async fn validate(&self, token: &str) -> Result<AuthenticatedUser, ServiceError> {
        let session = session::Entity::find_by_id(token)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::AuthError("No active session".to_string()))?;

        if session.is_expired(Utc::now()) {
            session.delete(self.db.as_ref()).await?;
            return Err(ServiceError::AuthError("Session expired".to_string()));
        }

        let account = user::Entity::find_by_id(session.user_id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::AuthError("No active session".to_string()))?;

        Ok(AuthenticatedUser {
            user_id: account.id,
            username: account.username,
        })
    }

    /// Drop a session, if it exists. Logout is idempotent.
    pub async fn logout(&self, token: &str) -> Result<(), ServiceError> {
        session::Entity::delete_by_id(token)
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }
}

/// Pull the session cookie value out of a Cookie header, if present.
pub fn session_token(parts_headers: &axum::http::HeaderMap) -> Option<String> {
    let raw = parts_headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Set-Cookie value establishing a session.
pub fn session_cookie(token: &str, ttl_hours: i64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        ttl_hours * 3600
    )
}

/// Set-Cookie value clearing the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Middleware guarding every business route: requests without a valid
/// session are redirected to the login form, remembering the original
/// path so login can send the user back.
pub async fn require_session(
    State(sessions): State<Arc<SessionService>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = session_token(request.headers());

    let user = match token {
        Some(token) => sessions.validate(&token).await.ok(),
        None => None,
    };

    match user {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => {
            let original = request
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or_else(|| request.uri().path());
            let target = format!("/login?next={}", encode_next(original));
            Redirect::to(&target).into_response()
        }
    }
}

/// Escape a path-and-query so it survives as a single `next` query
/// value; `&` in particular must not split the parameter.
fn encode_next(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'%' | b'&' | b'+' | b'#' | b' ' => out.push_str(&format!("%{:02X}", byte)),
            0x21..=0x7E => out.push(byte as char),
            other => out.push_str(&format!("%{:02X}", other)),
        }
    }
    out
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ServiceError::AuthError("No active session".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("correct horse").expect("hash");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("battery staple", &hash).unwrap());
    }

    #[test]
    fn tokens_are_unique_and_opaque() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), SESSION_TOKEN_LEN);
        assert_ne!(a, b);
    }

    #[test]
    fn next_value_escaping() {
        assert_eq!(encode_next("/sales"), "/sales");
        assert_eq!(
            encode_next("/profit_loss?start_date=2026-01-01&end_date=2026-02-01"),
            "/profit_loss?start_date=2026-01-01%26end_date=2026-02-01"
        );
    }

    #[test]
    fn cookie_header_parsing() {
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "theme=dark; farmledger_session=abc123; lang=en".parse().unwrap(),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));

        headers.clear();
        headers.insert(header::COOKIE, "theme=dark".parse().unwrap());
        assert_eq!(session_token(&headers), None);
    }
}
