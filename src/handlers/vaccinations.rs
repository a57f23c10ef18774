use super::{optional_text, parse_date, parse_opt_date};
use crate::auth::AuthenticatedUser;
use crate::entities::vaccination::VaccinationStatus;
use crate::errors::ServiceError;
use crate::services::vaccinations::VaccinationInput;
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
pub struct VaccinationForm {
    pub cow_id: i32,
    #[validate(length(min = 1, message = "vaccine name is required"))]
    pub vaccine_name: String,
    #[validate(length(min = 1, message = "vaccination date is required"))]
    pub administered_on: String,
    pub next_due_on: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
}

impl VaccinationForm {
    fn into_input(self) -> Result<VaccinationInput, ServiceError> {
        self.validate()?;
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") | Some("pending") | Some("Pending") => VaccinationStatus::Pending,
            Some("completed") | Some("Completed") => VaccinationStatus::Completed,
            Some(other) => {
                return Err(ServiceError::ValidationError(format!(
                    "status: unknown value '{}'",
                    other
                )))
            }
        };
        Ok(VaccinationInput {
            cow_id: self.cow_id,
            vaccine_name: self.vaccine_name.trim().to_string(),
            administered_on: parse_date("administered_on", &self.administered_on)?,
            next_due_on: parse_opt_date("next_due_on", &self.next_due_on)?,
            notes: optional_text(self.notes),
            status,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct VaccinationRow {
    pub id: i32,
    pub cow_id: i32,
    pub cow_name: Option<String>,
    pub cow_tag: Option<String>,
    pub vaccine_name: String,
    pub administered_on: NaiveDate,
    pub next_due_on: Option<NaiveDate>,
    pub notes: Option<String>,
    pub status: VaccinationStatus,
    pub recorded_at: DateTime<Utc>,
}

async fn list_vaccinations(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state
        .services
        .vaccinations
        .list_vaccinations()
        .await?
        .into_iter()
        .map(|(shot, owner)| VaccinationRow {
            id: shot.id,
            cow_id: shot.cow_id,
            cow_name: owner.as_ref().map(|c| c.name.clone()),
            cow_tag: owner.map(|c| c.tag),
            vaccine_name: shot.vaccine_name,
            administered_on: shot.administered_on,
            next_due_on: shot.next_due_on,
            notes: shot.notes,
            status: shot.status,
            recorded_at: shot.recorded_at,
        })
        .collect::<Vec<_>>();
    Ok(Json(ApiResponse::success(rows)))
}

async fn add_vaccination(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Form(form): Form<VaccinationForm>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .vaccinations
        .add_vaccination(form.into_input()?)
        .await?;
    Ok(Redirect::to("/vaccinations"))
}

async fn edit_vaccination(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
    Form(form): Form<VaccinationForm>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .vaccinations
        .update_vaccination(id, form.into_input()?)
        .await?;
    Ok(Redirect::to("/vaccinations"))
}

async fn delete_vaccination(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.vaccinations.delete_vaccination(id).await?;
    Ok(Redirect::to("/vaccinations"))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/vaccinations", get(list_vaccinations))
        .route("/vaccinations/add", post(add_vaccination))
        .route("/vaccinations/:id/edit", post(edit_vaccination))
        .route("/vaccinations/:id/delete", post(delete_vaccination))
}
