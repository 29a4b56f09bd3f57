#![cfg(test)]
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::sync::Arc;

use models::user::Role;

use crate::auth::domain::{Actor, RegisterInput};
use crate::auth::AuthConfig;
use crate::booking::BookingService;
use crate::{Repositories, Services};

/// Fixed "now": Wednesday 2030-06-12 10:15.
pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2030, 6, 12)
        .and_then(|d| d.and_hms_opt(10, 15, 0))
        .unwrap_or_default()
}

pub fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn auth_config() -> AuthConfig {
    AuthConfig { jwt_secret: "test-secret".into(), token_ttl_secs: 3600 }
}

/// Services over `repos` with the clock pinned to [`now`], defaults seeded.
pub async fn seeded(repos: Repositories) -> Services {
    let booking = BookingService::new(
        repos.reservations.clone(),
        repos.services.clone(),
        repos.hours.clone(),
        repos.users.clone(),
        30,
    )
    .with_clock(Arc::new(now));
    let services = Services::with_booking(repos, auth_config(), booking);
    services.seed_defaults().await.unwrap();
    services
}

pub async fn actor(services: &Services, username: &str, role: Role) -> Actor {
    let user = services
        .auth
        .register_with_role(RegisterInput {
            username: username.into(),
            name: format!("{username} name"),
            email: format!("{username}@example.com"),
            password: "pw123".into(),
            role: Some(role),
            phone: None,
        })
        .await
        .unwrap();
    Actor { user_id: user.id, username: user.username, role: user.role }
}

pub async fn sqlite_repositories() -> Repositories {
    let db = models::db::connect_sqlite_memory().await.unwrap();
    Repositories::seaorm(db)
}
