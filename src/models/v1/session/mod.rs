use sea_orm::ActiveModelTrait;
use sea_orm::prelude::*;

use crate::entities::v1::sessions::{ActiveModel, Column, Entity, Model};
use crate::entities::v1::users;
use crate::helpers::now;

impl Model {
    pub fn is_expired(&self) -> bool {
        self.expired_at <= now()
    }

    pub async fn store(&self, db: &DatabaseConnection) -> Result<Self, DbErr> {
        ActiveModel::from(self.clone()).insert(db).await
    }

    /// Resolve an unexpired session together with its owner
    pub async fn find_active(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<(Self, users::Model)>, DbErr> {
        let found = Entity::find_by_id(id)
            .filter(Column::ExpiredAt.gt(now()))
            .find_also_related(users::Entity)
            .one(db)
            .await?;

        Ok(match found {
            Some((session, Some(user))) => Some((session, user)),
            _ => None,
        })
    }

    /// Delete one session, returns whether a row was removed
    pub async fn destroy(db: &DatabaseConnection, id: Uuid) -> Result<bool, DbErr> {
        let result = Entity::delete_by_id(id).exec(db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Delete every expired session, returns the number of rows removed
    pub async fn purge_expired(db: &DatabaseConnection) -> Result<u64, DbErr> {
        let result = Entity::delete_many()
            .filter(Column::ExpiredAt.lte(now()))
            .exec(db)
            .await?;

        Ok(result.rows_affected)
    }
}
