use crate::db::DbPool;
use crate::entities::cow::{self, CowStatus};
use crate::entities::{health_record, milk_production, vaccination};
use crate::errors::ServiceError;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct CowInput {
    pub tag: String,
    pub name: String,
    pub breed: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub is_pregnant: bool,
    pub expected_calving_date: Option<NaiveDate>,
    pub status: CowStatus,
}

/// Herd management: the animals themselves. Their production, health
/// and vaccination records hang off each cow and are cascaded on
/// delete.
#[derive(Clone)]
pub struct HerdService {
    db: Arc<DbPool>,
}

impl HerdService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn create_cow(&self, input: CowInput) -> Result<cow::Model, ServiceError> {
        let duplicate = cow::Entity::find()
            .filter(cow::Column::Tag.eq(input.tag.clone()))
            .one(self.db.as_ref())
            .await?;
        if duplicate.is_some() {
            return Err(ServiceError::ValidationError(format!(
                "Cow tag '{}' already exists",
                input.tag
            )));
        }

        let row = cow::ActiveModel {
            tag: Set(input.tag),
            name: Set(input.name),
            breed: Set(input.breed),
            date_of_birth: Set(input.date_of_birth),
            is_pregnant: Set(input.is_pregnant),
            expected_calving_date: Set(input.expected_calving_date),
            status: Set(input.status),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(row)
    }

    pub async fn get_cow(&self, id: i32) -> Result<cow::Model, ServiceError> {
        cow::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Cow {} not found", id)))
    }

    pub async fn list_cows(&self) -> Result<Vec<cow::Model>, ServiceError> {
        let rows = cow::Entity::find()
            .order_by_asc(cow::Column::Tag)
            .all(self.db.as_ref())
            .await?;
        Ok(rows)
    }

    /// Animals currently in production, for record-entry forms.
    pub async fn list_active_cows(&self) -> Result<Vec<cow::Model>, ServiceError> {
        let rows = cow::Entity::find()
            .filter(cow::Column::Status.eq(CowStatus::Active))
            .order_by_asc(cow::Column::Tag)
            .all(self.db.as_ref())
            .await?;
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn update_cow(&self, id: i32, input: CowInput) -> Result<cow::Model, ServiceError> {
        let existing = self.get_cow(id).await?;

        // Tag stays unique across the rest of the herd.
        let clash = cow::Entity::find()
            .filter(cow::Column::Tag.eq(input.tag.clone()))
            .filter(cow::Column::Id.ne(existing.id))
            .one(self.db.as_ref())
            .await?;
        if clash.is_some() {
            return Err(ServiceError::ValidationError(format!(
                "Cow tag '{}' already exists",
                input.tag
            )));
        }

        let row = cow::ActiveModel {
            id: Set(existing.id),
            tag: Set(input.tag),
            name: Set(input.name),
            breed: Set(input.breed),
            date_of_birth: Set(input.date_of_birth),
            is_pregnant: Set(input.is_pregnant),
            expected_calving_date: Set(input.expected_calving_date),
            status: Set(input.status),
        }
        .update(self.db.as_ref())
        .await?;
        Ok(row)
    }

    /// Delete a cow together with its milk, health and vaccination
    /// records, in one transaction, so no orphaned rows survive.
    #[instrument(skip(self))]
    pub async fn delete_cow(&self, id: i32) -> Result<(), ServiceError> {
        self.db
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    let existing = cow::Entity::find_by_id(id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| ServiceError::NotFound(format!("Cow {} not found", id)))?;

                    milk_production::Entity::delete_many()
                        .filter(milk_production::Column::CowId.eq(existing.id))
                        .exec(txn)
                        .await?;
                    health_record::Entity::delete_many()
                        .filter(health_record::Column::CowId.eq(existing.id))
                        .exec(txn)
                        .await?;
                    vaccination::Entity::delete_many()
                        .filter(vaccination::Column::CowId.eq(existing.id))
                        .exec(txn)
                        .await?;
                    cow::Entity::delete_by_id(existing.id).exec(txn).await?;
                    Ok(())
                })
            })
            .await?;
        Ok(())
    }
}
