use async_trait::async_trait;
use models::user::{self, NewUser, Role};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Repository abstraction for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<user::Model>, ServiceError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, ServiceError>;
    /// Fails with `ServiceError::Duplicate` on a taken username or email.
    async fn create(&self, new: NewUser) -> Result<user::Model, ServiceError>;
    async fn list(&self) -> Result<Vec<user::Model>, ServiceError>;
    async fn list_by_role(&self, role: Role) -> Result<Vec<user::Model>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use crate::sync::lock;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockUserRepository {
        users: Mutex<Vec<user::Model>>,
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<user::Model>, ServiceError> {
            Ok(lock(&self.users).iter().find(|u| u.id == id).cloned())
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, ServiceError> {
            Ok(lock(&self.users).iter().find(|u| u.username == username).cloned())
        }

        async fn create(&self, new: NewUser) -> Result<user::Model, ServiceError> {
            new.validate()?;
            let email = new.email.trim().to_lowercase();
            let username = new.username.trim().to_string();
            let mut users = lock(&self.users);
            if users.iter().any(|u| u.username == username) {
                return Err(ServiceError::Duplicate("username"));
            }
            if users.iter().any(|u| u.email == email) {
                return Err(ServiceError::Duplicate("email"));
            }
            let now = Utc::now().into();
            let model = user::Model {
                id: Uuid::new_v4(),
                username,
                name: new.name.trim().to_string(),
                email,
                password_hash: new.password_hash,
                role: new.role,
                phone: new.phone.filter(|p| !p.trim().is_empty()),
                created_at: now,
                updated_at: now,
            };
            users.push(model.clone());
            Ok(model)
        }

        async fn list(&self) -> Result<Vec<user::Model>, ServiceError> {
            Ok(lock(&self.users).clone())
        }

        async fn list_by_role(&self, role: Role) -> Result<Vec<user::Model>, ServiceError> {
            let mut found: Vec<_> = lock(&self.users).iter().filter(|u| u.role == role).cloned().collect();
            found.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(found)
        }
    }
}
