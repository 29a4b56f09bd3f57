//! Migrator registering the booking schema in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240501_000001_create_users;
mod m20240501_000002_create_services;
mod m20240501_000003_create_working_hours;
mod m20240501_000004_create_reservations;
mod m20240501_000010_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240501_000001_create_users::Migration),
            Box::new(m20240501_000002_create_services::Migration),
            Box::new(m20240501_000003_create_working_hours::Migration),
            Box::new(m20240501_000004_create_reservations::Migration),
            // Indexes should always be applied last
            Box::new(m20240501_000010_add_indexes::Migration),
        ]
    }
}
