use async_trait::async_trait;
use models::service::{self, NewService};
use uuid::Uuid;

use crate::errors::ServiceError;

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<service::Model>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<service::Model>, ServiceError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<service::Model>, ServiceError>;
    async fn create(&self, new: NewService) -> Result<service::Model, ServiceError>;
    /// Overwrite the editable fields; `None` when `id` is unknown.
    async fn update(&self, id: Uuid, fields: NewService) -> Result<Option<service::Model>, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn delete_all(&self) -> Result<u64, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use crate::sync::lock;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockServiceRepository {
        rows: Mutex<Vec<service::Model>>,
    }

    #[async_trait]
    impl ServiceRepository for MockServiceRepository {
        async fn list(&self) -> Result<Vec<service::Model>, ServiceError> {
            Ok(lock(&self.rows).clone())
        }

        async fn get(&self, id: Uuid) -> Result<Option<service::Model>, ServiceError> {
            Ok(lock(&self.rows).iter().find(|s| s.id == id).cloned())
        }

        async fn find_by_name(&self, name: &str) -> Result<Option<service::Model>, ServiceError> {
            Ok(lock(&self.rows).iter().find(|s| s.name == name).cloned())
        }

        async fn create(&self, new: NewService) -> Result<service::Model, ServiceError> {
            service::validate_fields(&new.name, new.duration_min, new.price)?;
            let now = Utc::now().into();
            let model = service::Model {
                id: Uuid::new_v4(),
                name: new.name.trim().to_string(),
                kind: new.kind,
                description: new.description,
                duration_min: new.duration_min,
                price: new.price,
                created_at: now,
                updated_at: now,
            };
            lock(&self.rows).push(model.clone());
            Ok(model)
        }

        async fn update(&self, id: Uuid, fields: NewService) -> Result<Option<service::Model>, ServiceError> {
            service::validate_fields(&fields.name, fields.duration_min, fields.price)?;
            let mut rows = lock(&self.rows);
            Ok(rows.iter_mut().find(|s| s.id == id).map(|s| {
                s.name = fields.name.trim().to_string();
                s.kind = fields.kind;
                s.description = fields.description;
                s.duration_min = fields.duration_min;
                s.price = fields.price;
                s.updated_at = Utc::now().into();
                s.clone()
            }))
        }

        async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
            let mut rows = lock(&self.rows);
            let before = rows.len();
            rows.retain(|s| s.id != id);
            Ok(rows.len() != before)
        }

        async fn delete_all(&self) -> Result<u64, ServiceError> {
            let mut rows = lock(&self.rows);
            let n = rows.len() as u64;
            rows.clear();
            Ok(n)
        }
    }
}
