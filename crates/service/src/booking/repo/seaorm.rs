use chrono::Utc;
use models::reservation::{self, NewReservation, ReservationStatus};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::booking::repository::{ReservationFilter, ReservationRepository};
use crate::errors::ServiceError;

pub struct SeaOrmReservationRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn insert(&self, new: NewReservation) -> Result<reservation::Model, ServiceError> {
        Ok(reservation::create(&self.db, new).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<reservation::Model>, ServiceError> {
        Ok(reservation::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn save(&self, model: reservation::Model) -> Result<reservation::Model, ServiceError> {
        let found = reservation::Entity::find_by_id(model.id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("reservation"))?;
        let mut am: reservation::ActiveModel = found.into();
        am.service_id = Set(model.service_id);
        am.barber_id = Set(model.barber_id);
        am.customer_name = Set(model.customer_name);
        am.email = Set(model.email);
        am.phone = Set(model.phone);
        am.date = Set(model.date);
        am.time = Set(model.time);
        am.duration_min = Set(model.duration_min);
        am.status = Set(model.status);
        am.updated_at = Set(Utc::now().into());
        Ok(am.update(&self.db).await?)
    }

    async fn list(&self, filter: ReservationFilter) -> Result<Vec<reservation::Model>, ServiceError> {
        let mut q = reservation::Entity::find();
        if let Some(user_id) = filter.user_id {
            q = q.filter(reservation::Column::UserId.eq(user_id));
        }
        if let Some(date) = filter.date {
            q = q.filter(reservation::Column::Date.eq(date));
        }
        if let Some(service_id) = filter.service_id {
            q = q.filter(reservation::Column::ServiceId.eq(service_id));
        }
        if let Some(status) = filter.status {
            q = q.filter(reservation::Column::Status.eq(status));
        }
        if filter.exclude_cancelled {
            q = q.filter(reservation::Column::Status.ne(ReservationStatus::Cancelled));
        }
        let rows = q
            .order_by_asc(reservation::Column::Date)
            .order_by_asc(reservation::Column::Time)
            .all(&self.db)
            .await?;
        Ok(rows)
    }
}
