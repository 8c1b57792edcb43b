//! Create parking_lots table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_parking_locations::ParkingLocations;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParkingLots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParkingLots::LotId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ParkingLots::LotName).string().not_null())
                    .col(ColumnDef::new(ParkingLots::LocationId).string().not_null())
                    .col(
                        ColumnDef::new(ParkingLots::LocationType)
                            .string()
                            .not_null()
                            .default("outdoor"),
                    )
                    .col(ColumnDef::new(ParkingLots::CenterLatitude).double())
                    .col(ColumnDef::new(ParkingLots::CenterLongitude).double())
                    .col(
                        ColumnDef::new(ParkingLots::IsReserved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ParkingLots::Spaces)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ParkingLots::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParkingLots::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parking_lots_location")
                            .from(ParkingLots::Table, ParkingLots::LocationId)
                            .to(ParkingLocations::Table, ParkingLocations::LocationId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parking_lots_location")
                    .table(ParkingLots::Table)
                    .col(ParkingLots::LocationId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParkingLots::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ParkingLots {
    Table,
    LotId,
    LotName,
    LocationId,
    LocationType,
    CenterLatitude,
    CenterLongitude,
    IsReserved,
    Spaces,
    CreatedAt,
    UpdatedAt,
}
