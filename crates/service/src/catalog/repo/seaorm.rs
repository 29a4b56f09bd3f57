use chrono::Utc;
use models::service::{self, NewService};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::catalog::repository::ServiceRepository;
use crate::errors::ServiceError;

pub struct SeaOrmServiceRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl ServiceRepository for SeaOrmServiceRepository {
    async fn list(&self) -> Result<Vec<service::Model>, ServiceError> {
        Ok(service::Entity::find().order_by_asc(service::Column::CreatedAt).all(&self.db).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<service::Model>, ServiceError> {
        Ok(service::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<service::Model>, ServiceError> {
        let res = service::Entity::find()
            .filter(service::Column::Name.eq(name.to_string()))
            .one(&self.db)
            .await?;
        Ok(res)
    }

    async fn create(&self, new: NewService) -> Result<service::Model, ServiceError> {
        Ok(service::create(&self.db, new).await?)
    }

    async fn update(&self, id: Uuid, fields: NewService) -> Result<Option<service::Model>, ServiceError> {
        service::validate_fields(&fields.name, fields.duration_min, fields.price)?;
        let Some(found) = service::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut am: service::ActiveModel = found.into();
        am.name = Set(fields.name.trim().to_string());
        am.kind = Set(fields.kind);
        am.description = Set(fields.description);
        am.duration_min = Set(fields.duration_min);
        am.price = Set(fields.price);
        am.updated_at = Set(Utc::now().into());
        Ok(Some(am.update(&self.db).await?))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = service::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn delete_all(&self) -> Result<u64, ServiceError> {
        let res = service::Entity::delete_many().exec(&self.db).await?;
        Ok(res.rows_affected)
    }
}
