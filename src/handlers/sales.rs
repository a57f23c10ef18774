use super::{checkbox, parse_date, parse_decimal};
use crate::auth::AuthenticatedUser;
use crate::errors::ServiceError;
use crate::services::sales::SaleInput;
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
pub struct SaleForm {
    pub customer_id: i32,
    #[validate(length(min = 1, message = "sale date is required"))]
    pub date: String,
    #[validate(length(min = 1, message = "quantity is required"))]
    pub quantity_liters: String,
    #[validate(length(min = 1, message = "unit price is required"))]
    pub unit_price: String,
    pub is_paid: Option<String>,
}

impl SaleForm {
    fn into_input(self) -> Result<SaleInput, ServiceError> {
        self.validate()?;
        let quantity = parse_decimal("quantity_liters", &self.quantity_liters)?;
        let price = parse_decimal("unit_price", &self.unit_price)?;
        if quantity <= Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "quantity_liters: must be greater than zero".into(),
            ));
        }
        if price < Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "unit_price: must not be negative".into(),
            ));
        }
        Ok(SaleInput {
            customer_id: self.customer_id,
            date: parse_date("date", &self.date)?,
            quantity_liters: quantity,
            unit_price: price,
            is_paid: checkbox(&self.is_paid),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SaleRow {
    pub id: i32,
    pub customer_id: i32,
    pub customer_name: Option<String>,
    pub date: NaiveDate,
    pub quantity_liters: Decimal,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub is_paid: bool,
    pub recorded_at: DateTime<Utc>,
}

async fn list_sales(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state
        .services
        .sales
        .list_sales()
        .await?
        .into_iter()
        .map(|(sale, buyer)| SaleRow {
            id: sale.id,
            customer_id: sale.customer_id,
            customer_name: buyer.map(|c| c.name),
            date: sale.date,
            quantity_liters: sale.quantity_liters,
            unit_price: sale.unit_price,
            total_amount: sale.total_amount,
            is_paid: sale.is_paid,
            recorded_at: sale.recorded_at,
        })
        .collect::<Vec<_>>();
    Ok(Json(ApiResponse::success(rows)))
}

async fn add_sale(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Form(form): Form<SaleForm>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.sales.create_sale(form.into_input()?).await?;
    Ok(Redirect::to("/sales"))
}

async fn edit_sale(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
    Form(form): Form<SaleForm>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .sales
        .update_sale(id, form.into_input()?)
        .await?;
    Ok(Redirect::to("/sales"))
}

async fn delete_sale(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.sales.delete_sale(id).await?;
    Ok(Redirect::to("/sales"))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales", get(list_sales))
        .route("/sales/add", post(add_sale))
        .route("/sales/:id/edit", post(edit_sale))
        .route("/sales/:id/delete", post(delete_sale))
}
