//! Write-first locking for multi-statement transactions
//!
//! SQLite starts a transaction as a reader and upgrades it on the first
//! write. If another connection is writing at that moment, an upgrade from
//! an open read fails with SQLITE_BUSY at once instead of waiting. Every
//! read-modify-write transaction in this module tree therefore opens with
//! a no-op UPDATE of the row that owns the change. That statement waits
//! out the busy timeout like any plain write, so writers to the same lot
//! queue behind each other.

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{parking_location, parking_lot, parking_space};

/// Write-lock the database through the lot row. `false` if there is no such lot.
pub(super) async fn lock_lot<C: ConnectionTrait>(conn: &C, lot_id: &str) -> DomainResult<bool> {
    let result = parking_lot::Entity::update_many()
        .col_expr(
            parking_lot::Column::UpdatedAt,
            Expr::col(parking_lot::Column::UpdatedAt).into(),
        )
        .filter(parking_lot::Column::LotId.eq(lot_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}

pub(super) async fn lock_location<C: ConnectionTrait>(
    conn: &C,
    location_id: &str,
) -> DomainResult<bool> {
    let result = parking_location::Entity::update_many()
        .col_expr(
            parking_location::Column::UpdatedAt,
            Expr::col(parking_location::Column::UpdatedAt).into(),
        )
        .filter(parking_location::Column::LocationId.eq(location_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}

pub(super) async fn lock_space<C: ConnectionTrait>(conn: &C, space_id: &str) -> DomainResult<bool> {
    let result = parking_space::Entity::update_many()
        .col_expr(
            parking_space::Column::UpdatedAt,
            Expr::col(parking_space::Column::UpdatedAt).into(),
        )
        .filter(parking_space::Column::ParkingSpaceId.eq(space_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}
