use crate::db::DbPool;
use crate::entities::{customer, sale};
use crate::errors::ServiceError;
use crate::services::ledger::Ledger;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::instrument;

/// Fields for creating or replacing a sale. The stored total is always
/// quantity times unit price, computed here once.
#[derive(Debug, Clone)]
pub struct SaleInput {
    pub customer_id: i32,
    pub date: NaiveDate,
    pub quantity_liters: Decimal,
    pub unit_price: Decimal,
    pub is_paid: bool,
}

impl SaleInput {
    fn total(&self) -> Decimal {
        self.quantity_liters * self.unit_price
    }
}

#[derive(Clone)]
pub struct SaleService {
    db: Arc<DbPool>,
}

impl SaleService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Record a sale and charge the customer's balance, atomically.
    #[instrument(skip(self))]
    pub async fn create_sale(&self, input: SaleInput) -> Result<sale::Model, ServiceError> {
        let total = input.total();
        let created = self
            .db
            .transaction::<_, sale::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    Ledger::adjust(txn, input.customer_id, total).await?;
                    let row = sale::ActiveModel {
                        customer_id: Set(input.customer_id),
                        date: Set(input.date),
                        quantity_liters: Set(input.quantity_liters),
                        unit_price: Set(input.unit_price),
                        total_amount: Set(total),
                        is_paid: Set(input.is_paid),
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

    pub async fn get_sale(&self, id: i32) -> Result<sale::Model, ServiceError> {
        sale::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Sale {} not found", id)))
    }

    /// All sales, newest first, each paired with its customer.
    pub async fn list_sales(
        &self,
    ) -> Result<Vec<(sale::Model, Option<customer::Model>)>, ServiceError> {
        let rows = sale::Entity::find()
            .find_also_related(customer::Entity)
            .order_by_desc(sale::Column::Date)
            .order_by_desc(sale::Column::RecordedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(rows)
    }

    pub async fn list_for_customer(&self, customer_id: i32) -> Result<Vec<sale::Model>, ServiceError> {
        let rows = sale::Entity::find()
            .filter(sale::Column::CustomerId.eq(customer_id))
            .order_by_desc(sale::Column::Date)
            .all(self.db.as_ref())
            .await?;
        Ok(rows)
    }

    /// Rewrite a sale. The old amount is refunded to the sale's original
    /// owner and the new amount charged to the (possibly different)
    /// customer named in the input, all in one transaction.
    #[instrument(skip(self))]
    pub async fn update_sale(
        &self,
        id: i32,
        input: SaleInput,
    ) -> Result<sale::Model, ServiceError> {
        let new_total = input.total();
        let updated = self
            .db
            .transaction::<_, sale::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let existing = sale::Entity::find_by_id(id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| ServiceError::NotFound(format!("Sale {} not found", id)))?;

                    Ledger::adjust(txn, existing.customer_id, -existing.total_amount).await?;
                    Ledger::adjust(txn, input.customer_id, new_total).await?;

                    let row = sale::ActiveModel {
                        id: Set(existing.id),
                        customer_id: Set(input.customer_id),
                        date: Set(input.date),
                        quantity_liters: Set(input.quantity_liters),
                        unit_price: Set(input.unit_price),
                        total_amount: Set(new_total),
                        is_paid: Set(input.is_paid),
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

    /// Remove a sale and refund its amount from the customer's balance.
    #[instrument(skip(self))]
    pub async fn delete_sale(&self, id: i32) -> Result<(), ServiceError> {
        self.db
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    let existing = sale::Entity::find_by_id(id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| ServiceError::NotFound(format!("Sale {} not found", id)))?;

                    Ledger::adjust(txn, existing.customer_id, -existing.total_amount).await?;
                    sale::Entity::delete_by_id(existing.id).exec(txn).await?;
                    Ok(())
                })
            })
            .await?;
        Ok(())
    }
}
