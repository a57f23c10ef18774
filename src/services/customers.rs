use crate::db::DbPool;
use crate::entities::{customer, payment, sale};
use crate::errors::ServiceError;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct CustomerInput {
    pub name: String,
    pub contact_info: Option<String>,
}

#[derive(Clone)]
pub struct CustomerService {
    db: Arc<DbPool>,
}

impl CustomerService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// New customers start with a zero balance.
    #[instrument(skip(self))]
    pub async fn create_customer(
        &self,
        input: CustomerInput,
    ) -> Result<customer::Model, ServiceError> {
        let row = customer::ActiveModel {
            name: Set(input.name),
            contact_info: Set(input.contact_info),
            balance: Set(Decimal::ZERO),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(row)
    }

    pub async fn get_customer(&self, id: i32) -> Result<customer::Model, ServiceError> {
        customer::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Customer {} not found", id)))
    }

    pub async fn list_customers(&self) -> Result<Vec<customer::Model>, ServiceError> {
        let rows = customer::Entity::find()
            .order_by_asc(customer::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(rows)
    }

    /// Update identity fields. The balance column belongs to the ledger
    /// and is never writable here.
    #[instrument(skip(self))]
    pub async fn update_customer(
        &self,
        id: i32,
        input: CustomerInput,
    ) -> Result<customer::Model, ServiceError> {
        let existing = self.get_customer(id).await?;
        let row = customer::ActiveModel {
            id: Set(existing.id),
            name: Set(input.name),
            contact_info: Set(input.contact_info),
            ..Default::default()
        }
        .update(self.db.as_ref())
        .await?;
        Ok(row)
    }

    /// Delete a customer and, first, every sale and payment that refers
    /// to them. One transaction; a failure part-way leaves everything
    /// in place.
    #[instrument(skip(self))]
    pub async fn delete_customer(&self, id: i32) -> Result<(), ServiceError> {
        self.db
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    let existing = customer::Entity::find_by_id(id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("Customer {} not found", id))
                        })?;

                    sale::Entity::delete_many()
                        .filter(sale::Column::CustomerId.eq(existing.id))
                        .exec(txn)
                        .await?;
                    payment::Entity::delete_many()
                        .filter(payment::Column::CustomerId.eq(existing.id))
                        .exec(txn)
                        .await?;
                    customer::Entity::delete_by_id(existing.id).exec(txn).await?;
                    Ok(())
                })
            })
            .await?;
        Ok(())
    }
}
