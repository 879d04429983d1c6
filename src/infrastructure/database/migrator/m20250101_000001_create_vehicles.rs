//! Create vehicles table
//!
//! Stores fleet vehicles with their last reported position. The
//! registration number is unique across the whole fleet.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vehicles::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vehicles::UserId).string().not_null())
                    .col(
                        ColumnDef::new(Vehicles::RegistrationNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Vehicles::Make).string().not_null())
                    .col(
                        ColumnDef::new(Vehicles::FuelType)
                            .string_len(20)
                            .not_null()
                            .default("Petrol"),
                    )
                    .col(ColumnDef::new(Vehicles::Latitude).double().not_null())
                    .col(ColumnDef::new(Vehicles::Longitude).double().not_null())
                    .col(
                        ColumnDef::new(Vehicles::IdealMileage)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Vehicles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vehicles_user")
                    .table(Vehicles::Table)
                    .col(Vehicles::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vehicles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Vehicles {
    Table,
    Id,
    UserId,
    RegistrationNumber,
    Make,
    FuelType,
    Latitude,
    Longitude,
    IdealMileage,
    CreatedAt,
}
