use async_trait::async_trait;
use chrono::NaiveDate;
use models::reservation::{self, NewReservation, ReservationStatus};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Optional filters combined with AND; results come back ordered by date then time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    pub user_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub service_id: Option<Uuid>,
    pub status: Option<ReservationStatus>,
    pub exclude_cancelled: bool,
}

impl ReservationFilter {
    pub fn matches(&self, r: &reservation::Model) -> bool {
        self.user_id.map_or(true, |id| r.user_id == id)
            && self.date.map_or(true, |d| r.date == d)
            && self.service_id.map_or(true, |id| r.service_id == id)
            && self.status.map_or(true, |s| r.status == s)
            && !(self.exclude_cancelled && r.status == ReservationStatus::Cancelled)
    }
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn insert(&self, new: NewReservation) -> Result<reservation::Model, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<reservation::Model>, ServiceError>;
    /// Persist every mutable field of `model`; last write wins.
    async fn save(&self, model: reservation::Model) -> Result<reservation::Model, ServiceError>;
    async fn list(&self, filter: ReservationFilter) -> Result<Vec<reservation::Model>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use crate::sync::lock;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockReservationRepository {
        rows: Mutex<Vec<reservation::Model>>,
    }

    #[async_trait]
    impl ReservationRepository for MockReservationRepository {
        async fn insert(&self, new: NewReservation) -> Result<reservation::Model, ServiceError> {
            let now = Utc::now().into();
            let model = reservation::Model {
                id: Uuid::new_v4(),
                user_id: new.user_id,
                service_id: new.service_id,
                barber_id: new.barber_id,
                customer_name: new.customer_name,
                email: new.email,
                phone: new.phone,
                date: new.date,
                time: new.time,
                duration_min: new.duration_min,
                status: ReservationStatus::Pending,
                created_at: now,
                updated_at: now,
            };
            lock(&self.rows).push(model.clone());
            Ok(model)
        }

        async fn get(&self, id: Uuid) -> Result<Option<reservation::Model>, ServiceError> {
            Ok(lock(&self.rows).iter().find(|r| r.id == id).cloned())
        }

        async fn save(&self, mut model: reservation::Model) -> Result<reservation::Model, ServiceError> {
            let mut rows = lock(&self.rows);
            let slot = rows
                .iter_mut()
                .find(|r| r.id == model.id)
                .ok_or_else(|| ServiceError::not_found("reservation"))?;
            model.updated_at = Utc::now().into();
            *slot = model.clone();
            Ok(model)
        }

        async fn list(&self, filter: ReservationFilter) -> Result<Vec<reservation::Model>, ServiceError> {
            let mut found: Vec<_> = lock(&self.rows).iter().filter(|r| filter.matches(r)).cloned().collect();
            found.sort_by_key(|r| (r.date, r.time));
            Ok(found)
        }
    }
}
