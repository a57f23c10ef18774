use crate::db::DbPool;
use crate::entities::{cow, milk_production};
use crate::errors::ServiceError;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct MilkLogInput {
    pub cow_id: i32,
    pub date: NaiveDate,
    pub morning_qty: Decimal,
    pub evening_qty: Decimal,
}

#[derive(Clone)]
pub struct MilkService {
    db: Arc<DbPool>,
}

impl MilkService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn log_production(
        &self,
        input: MilkLogInput,
    ) -> Result<milk_production::Model, ServiceError> {
        self.ensure_cow(input.cow_id).await?;
        let row = milk_production::ActiveModel {
            cow_id: Set(input.cow_id),
            date: Set(input.date),
            morning_qty: Set(input.morning_qty),
            evening_qty: Set(input.evening_qty),
            recorded_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(row)
    }

    pub async fn get_log(&self, id: i32) -> Result<milk_production::Model, ServiceError> {
        milk_production::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Milk log {} not found", id)))
    }

    /// Full production history, newest first, with the owning cow.
    pub async fn list_history(
        &self,
    ) -> Result<Vec<(milk_production::Model, Option<cow::Model>)>, ServiceError> {
        let rows = milk_production::Entity::find()
            .find_also_related(cow::Entity)
            .order_by_desc(milk_production::Column::Date)
            .order_by_desc(milk_production::Column::RecordedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(rows)
    }

    /// Every log for one calendar date; the dashboard sums these.
    pub async fn logs_on(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<milk_production::Model>, ServiceError> {
        let rows = milk_production::Entity::find()
            .filter(milk_production::Column::Date.eq(date))
            .all(self.db.as_ref())
            .await?;
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn update_log(
        &self,
        id: i32,
        input: MilkLogInput,
    ) -> Result<milk_production::Model, ServiceError> {
        let existing = self.get_log(id).await?;
        self.ensure_cow(input.cow_id).await?;
        let row = milk_production::ActiveModel {
            id: Set(existing.id),
            cow_id: Set(input.cow_id),
            date: Set(input.date),
            morning_qty: Set(input.morning_qty),
            evening_qty: Set(input.evening_qty),
            recorded_at: Set(existing.recorded_at),
        }
        .update(self.db.as_ref())
        .await?;
        Ok(row)
    }

    #[instrument(skip(self))]
    pub async fn delete_log(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.get_log(id).await?;
        milk_production::Entity::delete_by_id(existing.id)
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }

    async fn ensure_cow(&self, cow_id: i32) -> Result<(), ServiceError> {
        cow::Entity::find_by_id(cow_id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Cow {} not found", cow_id)))?;
        Ok(())
    }
}
