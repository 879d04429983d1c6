//! Create bookings table
//!
//! Stores pre-booking queue entries with slot lock tracking. The
//! sweeper scans `lock_expires_at`, so it gets its own index.

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_vehicles::Vehicles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::UserId).string().not_null())
                    .col(ColumnDef::new(Bookings::VehicleId).string().not_null())
                    .col(ColumnDef::new(Bookings::LocationId).string().not_null())
                    .col(ColumnDef::new(Bookings::Latitude).double().not_null())
                    .col(ColumnDef::new(Bookings::Longitude).double().not_null())
                    .col(
                        ColumnDef::new(Bookings::CurrentCharge)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bookings::EtaMinutes).double().not_null())
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Bookings::LockExpiresAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_vehicle")
                            .from(Bookings::Table, Bookings::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_location")
                    .table(Bookings::Table)
                    .col(Bookings::LocationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_status")
                    .table(Bookings::Table)
                    .col(Bookings::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_lock_expiry")
                    .table(Bookings::Table)
                    .col(Bookings::LockExpiresAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_user")
                    .table(Bookings::Table)
                    .col(Bookings::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    UserId,
    VehicleId,
    LocationId,
    Latitude,
    Longitude,
    CurrentCharge,
    EtaMinutes,
    Status,
    LockExpiresAt,
    CreatedAt,
}
