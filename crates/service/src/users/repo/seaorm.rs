use models::user::{self, NewUser, Role};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::users::repository::UserRepository;

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, ServiceError> {
        let res = user::Entity::find()
            .filter(user::Column::Username.eq(username.to_string()))
            .one(&self.db)
            .await?;
        Ok(res)
    }

    async fn create(&self, new: NewUser) -> Result<user::Model, ServiceError> {
        Ok(user::create(&self.db, new).await?)
    }

    async fn list(&self) -> Result<Vec<user::Model>, ServiceError> {
        Ok(user::Entity::find().order_by_asc(user::Column::CreatedAt).all(&self.db).await?)
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<user::Model>, ServiceError> {
        let res = user::Entity::find()
            .filter(user::Column::Role.eq(role))
            .order_by_asc(user::Column::Name)
            .all(&self.db)
            .await?;
        Ok(res)
    }
}
