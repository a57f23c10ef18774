use crate::db::DbPool;
use crate::entities::{cow, health_record};
use crate::errors::ServiceError;
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct HealthRecordInput {
    pub cow_id: i32,
    pub date: NaiveDate,
    pub description: String,
    pub treatment: Option<String>,
    pub veterinarian: Option<String>,
}

#[derive(Clone)]
pub struct HealthService {
    db: Arc<DbPool>,
}

impl HealthService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn add_record(
        &self,
        input: HealthRecordInput,
    ) -> Result<health_record::Model, ServiceError> {
        self.ensure_cow(input.cow_id).await?;
        let row = health_record::ActiveModel {
            cow_id: Set(input.cow_id),
            date: Set(input.date),
            description: Set(input.description),
            treatment: Set(input.treatment),
            veterinarian: Set(input.veterinarian),
            recorded_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(row)
    }

    pub async fn get_record(&self, id: i32) -> Result<health_record::Model, ServiceError> {
        health_record::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Health record {} not found", id)))
    }

    pub async fn list_records(
        &self,
    ) -> Result<Vec<(health_record::Model, Option<cow::Model>)>, ServiceError> {
        let rows = health_record::Entity::find()
            .find_also_related(cow::Entity)
            .order_by_desc(health_record::Column::Date)
            .order_by_desc(health_record::Column::RecordedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn update_record(
        &self,
        id: i32,
        input: HealthRecordInput,
    ) -> Result<health_record::Model, ServiceError> {
        let existing = self.get_record(id).await?;
        self.ensure_cow(input.cow_id).await?;
        let row = health_record::ActiveModel {
            id: Set(existing.id),
            cow_id: Set(input.cow_id),
            date: Set(input.date),
            description: Set(input.description),
            treatment: Set(input.treatment),
            veterinarian: Set(input.veterinarian),
            recorded_at: Set(existing.recorded_at),
        }
        .update(self.db.as_ref())
        .await?;
        Ok(row)
    }

    #[instrument(skip(self))]
    pub async fn delete_record(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.get_record(id).await?;
        health_record::Entity::delete_by_id(existing.id)
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
