//! Create `working_hours` table: at most one row per weekday, missing rows mean closed.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkingHours::Table)
                    .if_not_exists()
                    .col(uuid(WorkingHours::Id).primary_key())
                    .col(small_integer(WorkingHours::Weekday).unique_key().not_null())
                    .col(time(WorkingHours::OpensAt).not_null())
                    .col(time(WorkingHours::ClosesAt).not_null())
                    .col(time_null(WorkingHours::LunchStart))
                    .col(time_null(WorkingHours::LunchEnd))
                    .col(timestamp_with_time_zone(WorkingHours::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(WorkingHours::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum WorkingHours { Table, Id, Weekday, OpensAt, ClosesAt, LunchStart, LunchEnd, UpdatedAt }
