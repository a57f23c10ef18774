use super::{checkbox, optional_text, parse_opt_date};
use crate::auth::AuthenticatedUser;
use crate::entities::cow::CowStatus;
use crate::errors::ServiceError;
use crate::services::herd::CowInput;
use crate::{ApiResponse, AppState};
use axum::{
    extract::{Form, Path, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CowForm {
    #[validate(length(min = 1, message = "tag is required"))]
    pub tag: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub breed: Option<String>,
    pub date_of_birth: Option<String>,
    pub is_pregnant: Option<String>,
    pub expected_calving_date: Option<String>,
    pub status: Option<String>,
}

impl CowForm {
    fn into_input(self) -> Result<CowInput, ServiceError> {
        self.validate()?;
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") | Some("active") | Some("Active") => CowStatus::Active,
            Some("sold") | Some("Sold") => CowStatus::Sold,
            Some("deceased") | Some("Deceased") => CowStatus::Deceased,
            Some(other) => {
                return Err(ServiceError::ValidationError(format!(
                    "status: unknown value '{}'",
                    other
                )))
            }
        };
        Ok(CowInput {
            tag: self.tag.trim().to_string(),
            name: self.name.trim().to_string(),
            breed: optional_text(self.breed),
            date_of_birth: parse_opt_date("date_of_birth", &self.date_of_birth)?,
            is_pregnant: checkbox(&self.is_pregnant),
            expected_calving_date: parse_opt_date(
                "expected_calving_date",
                &self.expected_calving_date,
            )?,
            status,
        })
    }
}

async fn list_cows(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let cows = state.services.herd.list_cows().await?;
    Ok(Json(ApiResponse::success(cows)))
}

async fn get_cow(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let cow = state.services.herd.get_cow(id).await?;
    Ok(Json(ApiResponse::success(cow)))
}

async fn add_cow(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Form(form): Form<CowForm>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.herd.create_cow(form.into_input()?).await?;
    Ok(Redirect::to("/cows"))
}

async fn edit_cow(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
    Form(form): Form<CowForm>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .herd
        .update_cow(id, form.into_input()?)
        .await?;
    Ok(Redirect::to("/cows"))
}

async fn delete_cow(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.herd.delete_cow(id).await?;
    Ok(Redirect::to("/cows"))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cows", get(list_cows))
        .route("/cows/add", post(add_cow))
        .route("/cows/:id", get(get_cow))
        .route("/cows/:id/edit", post(edit_cow))
        .route("/cows/:id/delete", post(delete_cow))
}
