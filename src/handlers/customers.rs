use super::optional_text;
use crate::auth::AuthenticatedUser;
use crate::errors::ServiceError;
use crate::services::customers::CustomerInput;
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
pub struct CustomerForm {
    #[validate(length(min = 1, message = "customer name is required"))]
    pub name: String,
    pub contact_info: Option<String>,
}

impl CustomerForm {
    fn into_input(self) -> Result<CustomerInput, ServiceError> {
        self.validate()?;
        Ok(CustomerInput {
            name: self.name.trim().to_string(),
            contact_info: optional_text(self.contact_info),
        })
    }
}

async fn list_customers(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state.services.customers.list_customers().await?;
    Ok(Json(ApiResponse::success(rows)))
}

async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let row = state.services.customers.get_customer(id).await?;
    Ok(Json(ApiResponse::success(row)))
}

async fn add_customer(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Form(form): Form<CustomerForm>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .customers
        .create_customer(form.into_input()?)
        .await?;
    Ok(Redirect::to("/customers"))
}

async fn edit_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
    Form(form): Form<CustomerForm>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .customers
        .update_customer(id, form.into_input()?)
        .await?;
    Ok(Redirect::to("/customers"))
}

async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.customers.delete_customer(id).await?;
    Ok(Redirect::to("/customers"))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers))
        .route("/customers/add", post(add_customer))
        .route("/customers/:id", get(get_customer))
        .route("/customers/:id/edit", post(edit_customer))
        .route("/customers/:id/delete", post(delete_customer))
}
