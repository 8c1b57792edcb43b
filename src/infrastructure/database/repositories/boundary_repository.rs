//! SeaORM implementation of BoundaryRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::lot_repository::lot_not_found;
use super::write_lock::lock_lot;
use crate::domain::boundary::{BoundaryRepository, BoundaryUpdate, WriteMode};
use crate::domain::geo::Coordinate;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{lot_boundary, parking_lot};

pub struct SeaOrmBoundaryRepository {
    db: DatabaseConnection,
}

impl SeaOrmBoundaryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn vertex_rows(lot_id: &str, vertices: &[Coordinate]) -> Vec<lot_boundary::ActiveModel> {
    vertices
        .iter()
        .enumerate()
        .map(|(i, v)| lot_boundary::ActiveModel {
            id: NotSet,
            lot_id: Set(lot_id.to_string()),
            point_order: Set(i as i32 + 1),
            latitude: Set(v.lat),
            longitude: Set(v.lng),
        })
        .collect()
}

#[async_trait]
impl BoundaryRepository for SeaOrmBoundaryRepository {
    async fn find_for_lot(&self, lot_id: &str) -> DomainResult<Vec<Coordinate>> {
        let rows = lot_boundary::Entity::find()
            .filter(lot_boundary::Column::LotId.eq(lot_id))
            .order_by_asc(lot_boundary::Column::PointOrder)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| Coordinate::new(r.latitude, r.longitude))
            .collect())
    }

    async fn exists_for_lot(&self, lot_id: &str) -> DomainResult<bool> {
        let count = lot_boundary::Entity::find()
            .filter(lot_boundary::Column::LotId.eq(lot_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn write(&self, update: BoundaryUpdate) -> DomainResult<Coordinate> {
        let BoundaryUpdate {
            lot_id,
            vertices,
            center,
            lot_name,
            mode,
        } = update;
        debug!(
            "Writing boundary for lot {} ({:?}, {} vertices)",
            lot_id,
            mode,
            vertices.len()
        );

        let txn = self.db.begin().await?;

        if !lock_lot(&txn, &lot_id).await? {
            return Err(lot_not_found(&lot_id));
        }

        let existing = lot_boundary::Entity::find()
            .filter(lot_boundary::Column::LotId.eq(lot_id.as_str()))
            .count(&txn)
            .await?;
        if mode == WriteMode::Create && existing > 0 {
            return Err(DomainError::Conflict(format!(
                "lot {} already has a boundary; edit it instead",
                lot_id
            )));
        }

        lot_boundary::Entity::delete_many()
            .filter(lot_boundary::Column::LotId.eq(lot_id.as_str()))
            .exec(&txn)
            .await?;
        lot_boundary::Entity::insert_many(vertex_rows(&lot_id, &vertices))
            .exec(&txn)
            .await?;

        let mut lot_update = parking_lot::Entity::update_many()
            .col_expr(parking_lot::Column::CenterLatitude, Expr::value(center.lat))
            .col_expr(parking_lot::Column::CenterLongitude, Expr::value(center.lng))
            .col_expr(parking_lot::Column::UpdatedAt, Expr::value(Utc::now()));
        if let Some(name) = lot_name {
            lot_update = lot_update.col_expr(parking_lot::Column::LotName, Expr::value(name));
        }
        lot_update
            .filter(parking_lot::Column::LotId.eq(lot_id.as_str()))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        debug!(
            "Boundary for lot {} stored ({} replaced), center {}",
            lot_id, existing, center
        );
        Ok(center)
    }
}
