use super::{optional_text, parse_date, parse_decimal};
use crate::auth::AuthenticatedUser;
use crate::errors::ServiceError;
use crate::services::payments::PaymentInput;
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
pub struct PaymentForm {
    pub customer_id: i32,
    #[validate(length(min = 1, message = "payment date is required"))]
    pub date: String,
    #[validate(length(min = 1, message = "amount is required"))]
    pub amount_received: String,
    pub description: Option<String>,
}

impl PaymentForm {
    fn into_input(self) -> Result<PaymentInput, ServiceError> {
        self.validate()?;
        let amount = parse_decimal("amount_received", &self.amount_received)?;
        if amount <= Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "amount_received: must be greater than zero".into(),
            ));
        }
        Ok(PaymentInput {
            customer_id: self.customer_id,
            date: parse_date("date", &self.date)?,
            amount_received: amount,
            description: optional_text(self.description),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct PaymentRow {
    pub id: i32,
    pub customer_id: i32,
    pub customer_name: Option<String>,
    pub date: NaiveDate,
    pub amount_received: Decimal,
    pub description: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

async fn list_payments(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state
        .services
        .payments
        .list_payments()
        .await?
        .into_iter()
        .map(|(payment, payer)| PaymentRow {
            id: payment.id,
            customer_id: payment.customer_id,
            customer_name: payer.map(|c| c.name),
            date: payment.date,
            amount_received: payment.amount_received,
            description: payment.description,
            recorded_at: payment.recorded_at,
        })
        .collect::<Vec<_>>();
    Ok(Json(ApiResponse::success(rows)))
}

async fn add_payment(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Form(form): Form<PaymentForm>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .payments
        .create_payment(form.into_input()?)
        .await?;
    Ok(Redirect::to("/payments"))
}

async fn edit_payment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
    Form(form): Form<PaymentForm>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .payments
        .update_payment(id, form.into_input()?)
        .await?;
    Ok(Redirect::to("/payments"))
}

async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.payments.delete_payment(id).await?;
    Ok(Redirect::to("/payments"))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payments", get(list_payments))
        .route("/payments/add", post(add_payment))
        .route("/payments/:id/edit", post(edit_payment))
        .route("/payments/:id/delete", post(delete_payment))
}
