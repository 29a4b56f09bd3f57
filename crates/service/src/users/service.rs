use std::collections::HashMap;
use std::sync::Arc;

use models::user::Role;
use tracing::instrument;
use uuid::Uuid;

use super::domain::{UserView, UserWithReservations};
use super::repository::UserRepository;
use crate::booking::repository::{ReservationFilter, ReservationRepository};
use crate::errors::ServiceError;

/// Read side of user accounts; creation goes through `AuthService`.
pub struct UserService {
    users: Arc<dyn UserRepository>,
    reservations: Arc<dyn ReservationRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, reservations: Arc<dyn ReservationRepository>) -> Self {
        Self { users, reservations }
    }

    /// Every account with its reservations attached.
    #[instrument(skip(self))]
    pub async fn list_with_reservations(&self) -> Result<Vec<UserWithReservations>, ServiceError> {
        let users = self.users.list().await?;
        let mut by_user: HashMap<Uuid, Vec<_>> = HashMap::new();
        for r in self.reservations.list(ReservationFilter::default()).await? {
            by_user.entry(r.user_id).or_default().push(r);
        }
        Ok(users
            .iter()
            .map(|u| UserWithReservations {
                user: UserView::from(u),
                reservations: by_user.remove(&u.id).unwrap_or_default(),
            })
            .collect())
    }

    pub async fn list_barbers(&self) -> Result<Vec<UserView>, ServiceError> {
        let barbers = self.users.list_by_role(Role::Barbero).await?;
        Ok(barbers.iter().map(UserView::from).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<UserView, ServiceError> {
        self.users
            .find_by_id(id)
            .await?
            .map(UserView::from)
            .ok_or_else(|| ServiceError::not_found("user"))
    }
}
