use crate::db::DbPool;
use crate::entities::{customer, payment};
use crate::errors::ServiceError;
use crate::services::ledger::Ledger;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set, TransactionTrait};
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct PaymentInput {
    pub customer_id: i32,
    pub date: NaiveDate,
    pub amount_received: Decimal,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct PaymentService {
    db: Arc<DbPool>,
}

impl PaymentService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Record a payment and credit it against the customer's balance,
    /// atomically.
    #[instrument(skip(self))]
    pub async fn create_payment(
        &self,
        input: PaymentInput,
    ) -> Result<payment::Model, ServiceError> {
        let created = self
            .db
            .transaction::<_, payment::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    Ledger::adjust(txn, input.customer_id, -input.amount_received).await?;
                    let row = payment::ActiveModel {
                        customer_id: Set(input.customer_id),
                        date: Set(input.date),
                        amount_received: Set(input.amount_received),
                        description: Set(input.description),
                        recorded_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    Ok(row)
                })
            })
            .await?;
        Ok(created)
    }

    pub async fn get_payment(&self, id: i32) -> Result<payment::Model, ServiceError> {
        payment::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Payment {} not found", id)))
    }

    /// All payments, newest first, each paired with its customer.
    pub async fn list_payments(
        &self,
    ) -> Result<Vec<(payment::Model, Option<customer::Model>)>, ServiceError> {
        let rows = payment::Entity::find()
            .find_also_related(customer::Entity)
            .order_by_desc(payment::Column::Date)
            .order_by_desc(payment::Column::RecordedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(rows)
    }

    /// Rewrite a payment: the old amount is re-charged to the payment's
    /// original owner and the new amount credited to the customer named
    /// in the input, in one transaction. Reassignment to a different
    /// customer moves the credit between both balances.
    #[instrument(skip(self))]
    pub async fn update_payment(
        &self,
        id: i32,
        input: PaymentInput,
    ) -> Result<payment::Model, ServiceError> {
        let updated = self
            .db
            .transaction::<_, payment::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let existing = payment::Entity::find_by_id(id).one(txn).await?.ok_or_else(
                        || ServiceError::NotFound(format!("Payment {} not found", id)),
                    )?;

                    Ledger::adjust(txn, existing.customer_id, existing.amount_received).await?;
                    Ledger::adjust(txn, input.customer_id, -input.amount_received).await?;

                    let row = payment::ActiveModel {
                        id: Set(existing.id),
                        customer_id: Set(input.customer_id),
                        date: Set(input.date),
                        amount_received: Set(input.amount_received),
                        description: Set(input.description),
                        recorded_at: Set(existing.recorded_at),
                    }
                    .update(txn)
                    .await?;
                    Ok(row)
                })
            })
            .await?;
        Ok(updated)
    }

    /// Remove a payment; the amount is charged back onto the balance.
    #[instrument(skip(self))]
    pub async fn delete_payment(&self, id: i32) -> Result<(), ServiceError> {
        self.db
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    let existing = payment::Entity::find_by_id(id).one(txn).await?.ok_or_else(
                        || ServiceError::NotFound(format!("Payment {} not found", id)),
                    )?;

                    Ledger::adjust(txn, existing.customer_id, existing.amount_received).await?;
                    payment::Entity::delete_by_id(existing.id).exec(txn).await?;
                    Ok(())
                })
            })
            .await?;
        Ok(())
    }
}
