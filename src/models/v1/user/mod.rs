use std::time::Duration;

use sea_orm::prelude::*;
use sea_orm::{ActiveModelTrait, PaginatorTrait, Set};

use crate::entities::v1::sessions;
use crate::entities::v1::users::{ActiveModel, Column, Entity, Model};
use crate::helpers::now;

impl Model {
    /// A new, not yet stored user. `password` must already be hashed.
    pub fn new<U, E>(username: U, email: E, password: String) -> Self
    where
        U: ToString,
        E: ToString,
    {
        let now = now();

        Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            password,
            created_at: now,
            updated_at: now,
        }
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<Self>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_by_email<T: ToString>(
        db: &DatabaseConnection,
        email: T,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::Email.eq(email.to_string()))
            .one(db)
            .await
    }

    pub async fn email_exists<T: ToString>(db: &DatabaseConnection, email: T) -> Result<bool, DbErr> {
        let count = Entity::find()
            .filter(Column::Email.eq(email.to_string()))
            .count(db)
            .await?;

        Ok(count > 0)
    }

    pub async fn username_exists<T: ToString>(
        db: &DatabaseConnection,
        username: T,
    ) -> Result<bool, DbErr> {
        let count = Entity::find()
            .filter(Column::Username.eq(username.to_string()))
            .count(db)
            .await?;

        Ok(count > 0)
    }

    /// Insert this user as a single row
    pub async fn store(&self, db: &DatabaseConnection) -> Result<Self, DbErr> {
        ActiveModel::from(self.clone()).insert(db).await
    }

    pub async fn update_password(
        &self,
        db: &DatabaseConnection,
        password: String,
    ) -> Result<Self, DbErr> {
        let mut model = ActiveModel::from(self.clone());

        model.password = Set(password);
        model.updated_at = Set(now());
        model.update(db).await
    }

    /// Open a session that expires after `lifetime`
    pub async fn create_session(
        &self,
        db: &DatabaseConnection,
        lifetime: Duration,
    ) -> Result<sessions::Model, DbErr> {
        let created_at = now();
        let expired_at = chrono::Duration::from_std(lifetime)
            .ok()
            .and_then(|lifetime| created_at.checked_add_signed(lifetime))
            .ok_or_else(|| DbErr::Custom(format!("Session lifetime out of range: {lifetime:?}")))?;
        let session = sessions::Model {
            id: Uuid::new_v4(),
            user_id: self.id,
            created_at,
            expired_at,
        };

        session.store(db).await
    }
}
