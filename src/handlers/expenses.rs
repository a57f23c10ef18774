use super::{optional_text, parse_date, parse_decimal};
use crate::auth::AuthenticatedUser;
use crate::errors::ServiceError;
use crate::services::expenses::ExpenseInput;
use crate::{ApiResponse, AppState};
use axum::{
    extract::{Form, Path, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ExpenseForm {
    #[validate(length(min = 1, message = "expense date is required"))]
    pub date: String,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "amount is required"))]
    pub amount: String,
    pub description: Option<String>,
}

impl ExpenseForm {
    fn into_input(self) -> Result<ExpenseInput, ServiceError> {
        self.validate()?;
        let amount = parse_decimal("amount", &self.amount)?;
        if amount <= Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "amount: must be greater than zero".into(),
            ));
        }
        Ok(ExpenseInput {
            date: parse_date("date", &self.date)?,
            category: self.category.trim().to_string(),
            amount,
            description: optional_text(self.description),
        })
    }
}

async fn list_expenses(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state.services.expenses.list_expenses().await?;
    Ok(Json(ApiResponse::success(rows)))
}

async fn add_expense(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Form(form): Form<ExpenseForm>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .expenses
        .record_expense(form.into_input()?)
        .await?;
    Ok(Redirect::to("/expenses"))
}

async fn edit_expense(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
    Form(form): Form<ExpenseForm>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .expenses
        .update_expense(id, form.into_input()?)
        .await?;
    Ok(Redirect::to("/expenses"))
}

async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.expenses.delete_expense(id).await?;
    Ok(Redirect::to("/expenses"))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses))
        .route("/expenses/add", post(add_expense))
        .route("/expenses/:id/edit", post(edit_expense))
        .route("/expenses/:id/delete", post(delete_expense))
}
