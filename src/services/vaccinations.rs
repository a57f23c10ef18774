use crate::db::DbPool;
use crate::entities::vaccination::{self, VaccinationStatus};
use crate::entities::cow;
use crate::errors::ServiceError;
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct VaccinationInput {
    pub cow_id: i32,
    pub vaccine_name: String,
    pub administered_on: NaiveDate,
    pub next_due_on: Option<NaiveDate>,
    pub notes: Option<String>,
    pub status: VaccinationStatus,
}

#[derive(Clone)]
pub struct VaccinationService {
    db: Arc<DbPool>,
}

impl VaccinationService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn add_vaccination(
        &self,
        input: VaccinationInput,
    ) -> Result<vaccination::Model, ServiceError> {
        self.ensure_cow(input.cow_id).await?;
        let row = vaccination::ActiveModel {
            cow_id: Set(input.cow_id),
            vaccine_name: Set(input.vaccine_name),
            administered_on: Set(input.administered_on),
            next_due_on: Set(input.next_due_on),
            notes: Set(input.notes),
            status: Set(input.status),
            recorded_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(row)
    }

    pub async fn get_vaccination(&self, id: i32) -> Result<vaccination::Model, ServiceError> {
        vaccination::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Vaccination {} not found", id)))
    }

    pub async fn list_vaccinations(
        &self,
    ) -> Result<Vec<(vaccination::Model, Option<cow::Model>)>, ServiceError> {
        let rows = vaccination::Entity::find()
            .find_also_related(cow::Entity)
            .order_by_desc(vaccination::Column::AdministeredOn)
            .all(self.db.as_ref())
            .await?;
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn update_vaccination(
        &self,
        id: i32,
        input: VaccinationInput,
    ) -> Result<vaccination::Model, ServiceError> {
        let existing = self.get_vaccination(id).await?;
        self.ensure_cow(input.cow_id).await?;
        let row = vaccination::ActiveModel {
            id: Set(existing.id),
            cow_id: Set(input.cow_id),
            vaccine_name: Set(input.vaccine_name),
            administered_on: Set(input.administered_on),
            next_due_on: Set(input.next_due_on),
            notes: Set(input.notes),
            status: Set(input.status),
            recorded_at: Set(existing.recorded_at),
        }
        .update(self.db.as_ref())
        .await?;
        Ok(row)
    }

    #[instrument(skip(self))]
    pub async fn delete_vaccination(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.get_vaccination(id).await?;
        vaccination::Entity::delete_by_id(existing.id)
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
