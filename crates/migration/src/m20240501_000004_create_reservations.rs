//! Create `reservations` table.
//!
//! Rows are removed with their client; a deleted barber only unassigns.
//! `service_id` carries no FK so history survives catalog edits.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(uuid(Reservations::Id).primary_key())
                    .col(uuid(Reservations::UserId).not_null())
                    .col(uuid(Reservations::ServiceId).not_null())
                    .col(uuid_null(Reservations::BarberId))
                    .col(string_len(Reservations::CustomerName, 128).not_null())
                    .col(string_len(Reservations::Email, 255).not_null())
                    .col(string_len_null(Reservations::Phone, 32))
                    .col(date(Reservations::Date).not_null())
                    .col(time(Reservations::Time).not_null())
                    .col(integer(Reservations::DurationMin).not_null())
                    .col(string_len(Reservations::Status, 16).not_null())
                    .col(timestamp_with_time_zone(Reservations::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Reservations::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_user")
                            .from(Reservations::Table, Reservations::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_barber")
                            .from(Reservations::Table, Reservations::BarberId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Reservations::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Reservations {
    Table,
    Id,
    UserId,
    ServiceId,
    BarberId,
    CustomerName,
    Email,
    Phone,
    Date,
    Time,
    DurationMin,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users { Table, Id }
