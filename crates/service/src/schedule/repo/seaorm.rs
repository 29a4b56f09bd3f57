use models::working_hours::{self, DayHours};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::errors::ServiceError;
use crate::schedule::repository::HoursRepository;

pub struct SeaOrmHoursRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl HoursRepository for SeaOrmHoursRepository {
    async fn list(&self) -> Result<Vec<working_hours::Model>, ServiceError> {
        Ok(working_hours::Entity::find().order_by_asc(working_hours::Column::Weekday).all(&self.db).await?)
    }

    async fn get(&self, weekday: i16) -> Result<Option<working_hours::Model>, ServiceError> {
        let res = working_hours::Entity::find()
            .filter(working_hours::Column::Weekday.eq(weekday))
            .one(&self.db)
            .await?;
        Ok(res)
    }

    async fn upsert(&self, hours: DayHours) -> Result<working_hours::Model, ServiceError> {
        Ok(working_hours::upsert(&self.db, hours).await?)
    }

    async fn delete(&self, weekday: i16) -> Result<bool, ServiceError> {
        let res = working_hours::Entity::delete_many()
            .filter(working_hours::Column::Weekday.eq(weekday))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }
}
