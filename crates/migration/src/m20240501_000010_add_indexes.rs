use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Reservations: availability scans by day
        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_date")
                    .table(Reservations::Table)
                    .col(Reservations::Date)
                    .to_owned(),
            )
            .await?;

        // Reservations: "my reservations"
        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_user")
                    .table(Reservations::Table)
                    .col(Reservations::UserId)
                    .to_owned(),
            )
            .await?;

        // Users: barber listing
        manager
            .create_index(
                Index::create()
                    .name("idx_user_role")
                    .table(Users::Table)
                    .col(Users::Role)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_reservation_date").table(Reservations::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_reservation_user").table(Reservations::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_user_role").table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Reservations { Table, UserId, Date }

#[derive(DeriveIden)]
enum Users { Table, Role }
