use super::{parse_date, parse_decimal};
use crate::auth::AuthenticatedUser;
use crate::errors::ServiceError;
use crate::services::milk::MilkLogInput;
use crate::{ApiResponse, AppState};
use axum::{
    extract::{Form, Path, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct MilkLogForm {
    pub cow_id: i32,
    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,
    #[validate(length(min = 1, message = "morning quantity is required"))]
    pub morning_qty: String,
    #[validate(length(min = 1, message = "evening quantity is required"))]
    pub evening_qty: String,
}

impl MilkLogForm {
    fn into_input(self) -> Result<MilkLogInput, ServiceError> {
        self.validate()?;
        Ok(MilkLogInput {
            cow_id: self.cow_id,
            date: parse_date("date", &self.date)?,
            morning_qty: parse_decimal("morning_qty", &self.morning_qty)?,
            evening_qty: parse_decimal("evening_qty", &self.evening_qty)?,
        })
    }
}

/// One production log joined with its cow, as shown in the history view.
#[derive(Debug, Serialize)]
pub struct MilkLogRow {
    pub id: i32,
    pub cow_id: i32,
    pub cow_name: Option<String>,
    pub cow_tag: Option<String>,
    pub date: NaiveDate,
    pub morning_qty: Decimal,
    pub evening_qty: Decimal,
    pub total_qty: Decimal,
    pub recorded_at: DateTime<Utc>,
}

async fn milk_history(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state
        .services
        .milk
        .list_history()
        .await?
        .into_iter()
        .map(|(log, owner)| MilkLogRow {
            id: log.id,
            cow_id: log.cow_id,
            cow_name: owner.as_ref().map(|c| c.name.clone()),
            cow_tag: owner.map(|c| c.tag),
            date: log.date,
            morning_qty: log.morning_qty,
            evening_qty: log.evening_qty,
            total_qty: log.total(),
            recorded_at: log.recorded_at,
        })
        .collect::<Vec<_>>();
    Ok(Json(ApiResponse::success(rows)))
}

async fn log_production(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Form(form): Form<MilkLogForm>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .milk
        .log_production(form.into_input()?)
        .await?;
    Ok(Redirect::to("/milk_production/history"))
}

async fn edit_log(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
    Form(form): Form<MilkLogForm>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .milk
        .update_log(id, form.into_input()?)
        .await?;
    Ok(Redirect::to("/milk_production/history"))
}

async fn delete_log(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.milk.delete_log(id).await?;
    Ok(Redirect::to("/milk_production/history"))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/milk_production/history", get(milk_history))
        .route("/milk_production/log", post(log_production))
        .route("/milk_production/:id/edit", post(edit_log))
        .route("/milk_production/:id/delete", post(delete_log))
}
