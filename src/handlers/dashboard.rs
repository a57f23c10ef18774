use crate::auth::AuthenticatedUser;
use crate::errors::ServiceError;
use crate::{ApiResponse, AppState};
use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use chrono::Utc;

async fn dashboard(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let today = Utc::now().date_naive();
    let summary = state.services.reports.dashboard(today).await?;
    Ok(Json(ApiResponse::success(summary)))
}

async fn reminders(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let today = Utc::now().date_naive();
    let upcoming = state.services.reminders.upcoming(today).await?;
    Ok(Json(ApiResponse::success(upcoming)))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/reminders", get(reminders))
}
