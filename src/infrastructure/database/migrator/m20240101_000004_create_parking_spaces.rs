//! Create parking_spaces table

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_parking_lots::ParkingLots;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn flag(column: ParkingSpaces) -> ColumnDef {
    ColumnDef::new(column)
        .boolean()
        .not_null()
        .default(false)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParkingSpaces::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParkingSpaces::ParkingSpaceId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ParkingSpaces::LotId).string().not_null())
                    .col(
                        ColumnDef::new(ParkingSpaces::ParkingType)
                            .string()
                            .not_null()
                            .default("Regular"),
                    )
                    .col(flag(ParkingSpaces::IsNearest))
                    .col(flag(ParkingSpaces::IsCovered))
                    .col(flag(ParkingSpaces::IsWheelchairAccessible))
                    .col(flag(ParkingSpaces::HasLargeSpace))
                    .col(flag(ParkingSpaces::IsWellLitArea))
                    .col(flag(ParkingSpaces::HasEvCharging))
                    .col(flag(ParkingSpaces::IsFamilyParkingArea))
                    .col(flag(ParkingSpaces::IsPremium))
                    .col(
                        ColumnDef::new(ParkingSpaces::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(ParkingSpaces::Coordinates).string())
                    .col(ColumnDef::new(ParkingSpaces::OriginalType).string())
                    .col(
                        ColumnDef::new(ParkingSpaces::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParkingSpaces::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parking_spaces_lot")
                            .from(ParkingSpaces::Table, ParkingSpaces::LotId)
                            .to(ParkingLots::Table, ParkingLots::LotId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parking_spaces_lot")
                    .table(ParkingSpaces::Table)
                    .col(ParkingSpaces::LotId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParkingSpaces::Table).to_owned())
            .await
    }
}

#[derive(Iden, Clone, Copy)]
pub enum ParkingSpaces {
    Table,
    ParkingSpaceId,
    LotId,
    ParkingType,
    IsNearest,
    IsCovered,
    IsWheelchairAccessible,
    HasLargeSpace,
    IsWellLitArea,
    HasEvCharging,
    IsFamilyParkingArea,
    IsPremium,
    IsAvailable,
    Coordinates,
    OriginalType,
    CreatedAt,
    UpdatedAt,
}
