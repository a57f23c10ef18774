use crate::auth::hash_password;
use crate::db::DbPool;
use crate::entities::user;
use crate::errors::ServiceError;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use std::sync::Arc;
use tracing::instrument;

/// Operator account management. Only the CLI creates accounts; there is
/// no self-service registration.
#[derive(Clone)]
pub struct UserService {
    db: Arc<DbPool>,
}

impl UserService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, password))]
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<user::Model, ServiceError> {
        let existing = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await?;
        if existing.is_some() {
            return Err(ServiceError::ValidationError(format!(
                "Username '{}' already exists",
                username
            )));
        }

        let row = user::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(hash_password(password)?),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(row)
    }
}
