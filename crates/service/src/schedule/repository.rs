use async_trait::async_trait;
use models::working_hours::{self, DayHours};

use crate::errors::ServiceError;

#[async_trait]
pub trait HoursRepository: Send + Sync {
    /// Ordered by weekday.
    async fn list(&self) -> Result<Vec<working_hours::Model>, ServiceError>;
    async fn get(&self, weekday: i16) -> Result<Option<working_hours::Model>, ServiceError>;
    async fn upsert(&self, hours: DayHours) -> Result<working_hours::Model, ServiceError>;
    async fn delete(&self, weekday: i16) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use crate::sync::lock;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockHoursRepository {
        days: Mutex<BTreeMap<i16, working_hours::Model>>,
    }

    #[async_trait]
    impl HoursRepository for MockHoursRepository {
        async fn list(&self) -> Result<Vec<working_hours::Model>, ServiceError> {
            Ok(lock(&self.days).values().cloned().collect())
        }

        async fn get(&self, weekday: i16) -> Result<Option<working_hours::Model>, ServiceError> {
            Ok(lock(&self.days).get(&weekday).cloned())
        }

        async fn upsert(&self, hours: DayHours) -> Result<working_hours::Model, ServiceError> {
            hours.validate()?;
            let mut days = lock(&self.days);
            let id = days.get(&hours.weekday).map(|d| d.id).unwrap_or_else(Uuid::new_v4);
            let model = working_hours::Model {
                id,
                weekday: hours.weekday,
                opens_at: hours.opens_at,
                closes_at: hours.closes_at,
                lunch_start: hours.lunch_start,
                lunch_end: hours.lunch_end,
                updated_at: Utc::now().into(),
            };
            days.insert(hours.weekday, model.clone());
            Ok(model)
        }

        async fn delete(&self, weekday: i16) -> Result<bool, ServiceError> {
            Ok(lock(&self.days).remove(&weekday).is_some())
        }
    }
}
