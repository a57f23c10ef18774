//! Customer balance ledger.
//!
//! A customer's `balance` column always equals the sum of their sale
//! totals minus the sum of their payments. Sale and payment mutations
//! restore that equality by applying the exact delta here, inside the
//! same transaction as the row change. Balance arithmetic lives in this
//! one place; no handler or service does its own.

use crate::entities::{customer, payment, sale};
use crate::errors::ServiceError;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use tracing::debug;

pub struct Ledger;

impl Ledger {
    /// Apply a signed delta to a customer's balance. Positive for sales
    /// (the customer owes more), negative for payments. Runs on the
    /// caller's connection so it joins the caller's transaction.
    pub async fn adjust<C: ConnectionTrait>(
        conn: &C,
        customer_id: i32,
        delta: Decimal,
    ) -> Result<customer::Model, ServiceError> {
        let account = customer::Entity::find_by_id(customer_id)
            .one(conn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Customer {} not found", customer_id)))?;

        let updated = customer::ActiveModel {
            id: Set(account.id),
            balance: Set(account.balance + delta),
            ..Default::default()
        }
        .update(conn)
        .await?;

        debug!(
            customer_id,
            %delta,
            balance = %updated.balance,
            "balance adjusted"
        );
        Ok(updated)
    }

    /// Recompute a balance from the customer's surviving sale and
    /// payment rows. Reads elsewhere trust the stored column; this is
    /// for auditing and tests of the ledger equality.
    pub async fn derived_balance<C: ConnectionTrait>(
        conn: &C,
        customer_id: i32,
    ) -> Result<Decimal, ServiceError> {
        let sold: Decimal = sale::Entity::find()
            .filter(sale::Column::CustomerId.eq(customer_id))
            .all(conn)
            .await?
            .iter()
            .map(|s| s.total_amount)
            .sum();

        let received: Decimal = payment::Entity::find()
            .filter(payment::Column::CustomerId.eq(customer_id))
            .all(conn)
            .await?
            .iter()
            .map(|p| p.amount_received)
            .sum();

        Ok(sold - received)
    }
}
