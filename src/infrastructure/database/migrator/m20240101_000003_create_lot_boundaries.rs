//! Create lot_boundaries table
//!
//! One row per polygon vertex; `point_order` is unique within a lot.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_parking_lots::ParkingLots;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LotBoundaries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LotBoundaries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LotBoundaries::LotId).string().not_null())
                    .col(ColumnDef::new(LotBoundaries::PointOrder).integer().not_null())
                    .col(ColumnDef::new(LotBoundaries::Latitude).double().not_null())
                    .col(ColumnDef::new(LotBoundaries::Longitude).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lot_boundaries_lot")
                            .from(LotBoundaries::Table, LotBoundaries::LotId)
                            .to(ParkingLots::Table, ParkingLots::LotId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lot_boundaries_lot_order")
                    .table(LotBoundaries::Table)
                    .col(LotBoundaries::LotId)
                    .col(LotBoundaries::PointOrder)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LotBoundaries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum LotBoundaries {
    Table,
    Id,
    LotId,
    PointOrder,
    Latitude,
    Longitude,
}
