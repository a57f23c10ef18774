use super::parse_opt_date;
use crate::auth::AuthenticatedUser;
use crate::errors::ServiceError;
use crate::{ApiResponse, AppState};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ProfitLossQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

async fn profit_loss(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<ProfitLossQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let start = parse_opt_date("start_date", &query.start_date)?;
    let end = parse_opt_date("end_date", &query.end_date)?;
    let report = state.services.reports.profit_loss(start, end).await?;
    Ok(Json(ApiResponse::success(report)))
}

async fn amounts_receivable(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state.services.reports.receivables().await?;
    Ok(Json(ApiResponse::success(rows)))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profit_loss", get(profit_loss))
        .route("/amounts_receivable", get(amounts_receivable))
}
