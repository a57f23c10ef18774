use super::{optional_text, parse_date};
use crate::auth::AuthenticatedUser;
use crate::errors::ServiceError;
use crate::services::health::HealthRecordInput;
use crate::{ApiResponse, AppState};
use axum::{
    extract::{Form, Path, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct HealthRecordForm {
    pub cow_id: i32,
    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    pub treatment: Option<String>,
    pub veterinarian: Option<String>,
}

impl HealthRecordForm {
    fn into_input(self) -> Result<HealthRecordInput, ServiceError> {
        self.validate()?;
        Ok(HealthRecordInput {
            cow_id: self.cow_id,
            date: parse_date("date", &self.date)?,
            description: self.description.trim().to_string(),
            treatment: optional_text(self.treatment),
            veterinarian: optional_text(self.veterinarian),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct HealthRecordRow {
    pub id: i32,
    pub cow_id: i32,
    pub cow_name: Option<String>,
    pub cow_tag: Option<String>,
    pub date: NaiveDate,
    pub description: String,
    pub treatment: Option<String>,
    pub veterinarian: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

async fn list_records(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state
        .services
        .health
        .list_records()
        .await?
        .into_iter()
        .map(|(record, owner)| HealthRecordRow {
            id: record.id,
            cow_id: record.cow_id,
            cow_name: owner.as_ref().map(|c| c.name.clone()),
            cow_tag: owner.map(|c| c.tag),
            date: record.date,
            description: record.description,
            treatment: record.treatment,
            veterinarian: record.veterinarian,
            recorded_at: record.recorded_at,
        })
        .collect::<Vec<_>>();
    Ok(Json(ApiResponse::success(rows)))
}

async fn add_record(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Form(form): Form<HealthRecordForm>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.health.add_record(form.into_input()?).await?;
    Ok(Redirect::to("/health_records"))
}

async fn edit_record(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
    Form(form): Form<HealthRecordForm>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .health
        .update_record(id, form.into_input()?)
        .await?;
    Ok(Redirect::to("/health_records"))
}

async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.health.delete_record(id).await?;
    Ok(Redirect::to("/health_records"))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health_records", get(list_records))
        .route("/health_records/add", post(add_record))
        .route("/health_records/:id/edit", post(edit_record))
        .route("/health_records/:id/delete", post(delete_record))
}
