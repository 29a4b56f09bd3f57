//! Wiring: one bundle of repository handles and one of services built on them.
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::{AuthConfig, AuthService};
use crate::booking::repo::seaorm::SeaOrmReservationRepository;
use crate::booking::repository::{mock::MockReservationRepository, ReservationRepository};
use crate::booking::BookingService;
use crate::catalog::repo::seaorm::SeaOrmServiceRepository;
use crate::catalog::repository::{mock::MockServiceRepository, ServiceRepository};
use crate::catalog::CatalogService;
use crate::schedule::repo::seaorm::SeaOrmHoursRepository;
use crate::schedule::repository::{mock::MockHoursRepository, HoursRepository};
use crate::schedule::ScheduleService;
use crate::users::repo::seaorm::SeaOrmUserRepository;
use crate::users::repository::{mock::MockUserRepository, UserRepository};
use crate::users::UserService;

#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub services: Arc<dyn ServiceRepository>,
    pub hours: Arc<dyn HoursRepository>,
    pub reservations: Arc<dyn ReservationRepository>,
}

impl Repositories {
    pub fn seaorm(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(SeaOrmUserRepository { db: db.clone() }),
            services: Arc::new(SeaOrmServiceRepository { db: db.clone() }),
            hours: Arc::new(SeaOrmHoursRepository { db: db.clone() }),
            reservations: Arc::new(SeaOrmReservationRepository { db }),
        }
    }

    /// Process-local stores, for tests and demos.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MockUserRepository::default()),
            services: Arc::new(MockServiceRepository::default()),
            hours: Arc::new(MockHoursRepository::default()),
            reservations: Arc::new(MockReservationRepository::default()),
        }
    }
}

#[derive(Clone)]
pub struct Services {
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub catalog: Arc<CatalogService>,
    pub schedule: Arc<ScheduleService>,
    pub booking: Arc<BookingService>,
}

impl Services {
    pub fn new(repos: Repositories, auth: AuthConfig, slot_minutes: u32) -> Self {
        Self::with_booking(
            repos.clone(),
            auth,
            BookingService::new(repos.reservations, repos.services, repos.hours, repos.users, slot_minutes),
        )
    }

    /// Same wiring with a pre-built booking service (e.g. one with a fixed clock).
    pub fn with_booking(repos: Repositories, auth: AuthConfig, booking: BookingService) -> Self {
        Self {
            auth: Arc::new(AuthService::new(repos.users.clone(), auth)),
            users: Arc::new(UserService::new(repos.users, repos.reservations)),
            catalog: Arc::new(CatalogService::new(repos.services)),
            schedule: Arc::new(ScheduleService::new(repos.hours)),
            booking: Arc::new(booking),
        }
    }

    /// Default services and working week; safe to run on every start.
    pub async fn seed_defaults(&self) -> Result<(), crate::errors::ServiceError> {
        self.catalog.seed_defaults().await?;
        self.schedule.seed_defaults().await?;
        Ok(())
    }
}
