use crate::db::DbPool;
use crate::entities::expense;
use crate::errors::ServiceError;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct ExpenseInput {
    pub date: NaiveDate,
    pub category: String,
    pub amount: Decimal,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct ExpenseService {
    db: Arc<DbPool>,
}

impl ExpenseService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn record_expense(&self, input: ExpenseInput) -> Result<expense::Model, ServiceError> {
        let row = expense::ActiveModel {
            date: Set(input.date),
            category: Set(input.category),
            amount: Set(input.amount),
            description: Set(input.description),
            recorded_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(row)
    }

    pub async fn get_expense(&self, id: i32) -> Result<expense::Model, ServiceError> {
        expense::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Expense {} not found", id)))
    }

    pub async fn list_expenses(&self) -> Result<Vec<expense::Model>, ServiceError> {
        let rows = expense::Entity::find()
            .order_by_desc(expense::Column::Date)
            .order_by_desc(expense::Column::RecordedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn update_expense(
        &self,
        id: i32,
        input: ExpenseInput,
    ) -> Result<expense::Model, ServiceError> {
        let existing = self.get_expense(id).await?;
        let row = expense::ActiveModel {
            id: Set(existing.id),
            date: Set(input.date),
            category: Set(input.category),
            amount: Set(input.amount),
            description: Set(input.description),
            recorded_at: Set(existing.recorded_at),
        }
        .update(self.db.as_ref())
        .await?;
        Ok(row)
    }

    #[instrument(skip(self))]
    pub async fn delete_expense(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.get_expense(id).await?;
        expense::Entity::delete_by_id(existing.id)
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }
}
