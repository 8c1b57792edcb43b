//! SeaORM implementation of SpaceRepository

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QuerySelect, Set, SqlErr, TransactionTrait,
};

use super::lot_repository::lot_not_found;
use super::write_lock::{lock_lot, lock_space};
use crate::domain::space::identifier::sequence_number;
use crate::domain::space::{
    FeatureFlags, ParkingSpace, ParkingType, SpacePatch, SpacePosition, SpaceRepository,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{parking_lot, parking_space};

pub struct SeaOrmSpaceRepository {
    db: DatabaseConnection,
}

impl SeaOrmSpaceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn position_from_column(raw: Option<String>) -> Option<SpacePosition> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }
    Some(raw.parse().unwrap_or_else(|e| {
        warn!("Keeping unparseable space coordinates '{}' as a label: {}", raw, e);
        SpacePosition::Level(raw.clone())
    }))
}

pub(super) fn space_from_model(m: parking_space::Model) -> ParkingSpace {
    ParkingSpace {
        parking_type: ParkingType::from(m.parking_type.as_str()),
        original_type: m.original_type.as_deref().map(ParkingType::from),
        features: FeatureFlags {
            is_nearest: m.is_nearest,
            is_covered: m.is_covered,
            is_wheelchair_accessible: m.is_wheelchair_accessible,
            has_large_space: m.has_large_space,
            is_well_lit_area: m.is_well_lit_area,
            has_ev_charging: m.has_ev_charging,
            is_family_parking_area: m.is_family_parking_area,
            is_premium: m.is_premium,
        },
        is_available: m.is_available,
        position: position_from_column(m.coordinates),
        space_id: m.parking_space_id,
        lot_id: m.lot_id,
    }
}

fn space_to_active(space: &ParkingSpace) -> parking_space::ActiveModel {
    let f = &space.features;
    parking_space::ActiveModel {
        parking_space_id: Set(space.space_id.clone()),
        lot_id: Set(space.lot_id.clone()),
        parking_type: Set(space.parking_type.to_string()),
        is_nearest: Set(f.is_nearest),
        is_covered: Set(f.is_covered),
        is_wheelchair_accessible: Set(f.is_wheelchair_accessible),
        has_large_space: Set(f.has_large_space),
        is_well_lit_area: Set(f.is_well_lit_area),
        has_ev_charging: Set(f.has_ev_charging),
        is_family_parking_area: Set(f.is_family_parking_area),
        is_premium: Set(f.is_premium),
        is_available: Set(space.is_available),
        coordinates: Set(space.position.as_ref().map(|p| p.to_string())),
        original_type: Set(space.original_type.as_ref().map(|t| t.to_string())),
        created_at: NotSet,
        updated_at: Set(Utc::now()),
    }
}

/// Overwrite every mutable column of an existing space row.
pub(super) async fn write_space<C: ConnectionTrait>(conn: &C, space: &ParkingSpace) -> DomainResult<()> {
    space_to_active(space).update(conn).await?;
    Ok(())
}

async fn adjust_space_counter<C: ConnectionTrait>(conn: &C, lot_id: &str, delta: i32) -> DomainResult<()> {
    let mut update = parking_lot::Entity::update_many()
        .col_expr(
            parking_lot::Column::Spaces,
            Expr::col(parking_lot::Column::Spaces).add(delta),
        )
        .filter(parking_lot::Column::LotId.eq(lot_id));
    if delta < 0 {
        // never drive the counter below zero
        update = update.filter(parking_lot::Column::Spaces.gte(-delta));
    }
    update.exec(conn).await?;
    Ok(())
}

/// Sort a lot's space rows by sequence number, so `L1_100` follows `L1_99`.
/// IDs without a number for this lot go first, by text.
pub(super) fn in_allocation_order(lot_id: &str, models: &mut [parking_space::Model]) {
    models.sort_by_cached_key(|m| {
        (
            sequence_number(lot_id, &m.parking_space_id),
            m.parking_space_id.clone(),
        )
    });
}

fn space_not_found(space_id: &str) -> DomainError {
    DomainError::not_found("ParkingSpace", "parkingSpaceID", space_id)
}

// ── SpaceRepository impl ────────────────────────────────────────

#[async_trait]
impl SpaceRepository for SeaOrmSpaceRepository {
    async fn create(&self, space: ParkingSpace) -> DomainResult<()> {
        debug!("Saving parking space: {}", space.space_id);

        let txn = self.db.begin().await?;

        if !lock_lot(&txn, &space.lot_id).await? {
            return Err(lot_not_found(&space.lot_id));
        }
        if parking_space::Entity::find_by_id(&space.space_id)
            .one(&txn)
            .await?
            .is_some()
        {
            return Err(DomainError::duplicate(
                "ParkingSpace",
                "parkingSpaceID",
                space.space_id,
            ));
        }

        let mut model = space_to_active(&space);
        model.created_at = Set(Utc::now());
        if let Err(e) = model.insert(&txn).await {
            return Err(match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    DomainError::duplicate("ParkingSpace", "parkingSpaceID", space.space_id)
                }
                _ => e.into(),
            });
        }
        adjust_space_counter(&txn, &space.lot_id, 1).await?;

        txn.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, space_id: &str) -> DomainResult<Option<ParkingSpace>> {
        let model = parking_space::Entity::find_by_id(space_id)
            .one(&self.db)
            .await?;
        Ok(model.map(space_from_model))
    }

    async fn find_by_lot(&self, lot_id: &str) -> DomainResult<Vec<ParkingSpace>> {
        let mut models = parking_space::Entity::find()
            .filter(parking_space::Column::LotId.eq(lot_id))
            .all(&self.db)
            .await?;
        in_allocation_order(lot_id, &mut models);
        Ok(models.into_iter().map(space_from_model).collect())
    }

    async fn ids_for_lot(&self, lot_id: &str) -> DomainResult<Vec<String>> {
        let ids: Vec<String> = parking_space::Entity::find()
            .select_only()
            .column(parking_space::Column::ParkingSpaceId)
            .filter(parking_space::Column::LotId.eq(lot_id))
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(ids)
    }

    async fn update(&self, space_id: &str, patch: SpacePatch) -> DomainResult<ParkingSpace> {
        debug!("Updating parking space: {}", space_id);

        let txn = self.db.begin().await?;

        if !lock_space(&txn, space_id).await? {
            return Err(space_not_found(space_id));
        }
        let model = parking_space::Entity::find_by_id(space_id)
            .one(&txn)
            .await?
            .ok_or_else(|| space_not_found(space_id))?;

        let mut space = space_from_model(model);
        space.apply(&patch);
        write_space(&txn, &space).await?;

        txn.commit().await?;
        Ok(space)
    }

    async fn delete(&self, space_id: &str) -> DomainResult<()> {
        let txn = self.db.begin().await?;

        if !lock_space(&txn, space_id).await? {
            return Err(space_not_found(space_id));
        }
        let model = parking_space::Entity::find_by_id(space_id)
            .one(&txn)
            .await?
            .ok_or_else(|| space_not_found(space_id))?;

        parking_space::Entity::delete_by_id(space_id)
            .exec(&txn)
            .await?;
        adjust_space_counter(&txn, &model.lot_id, -1).await?;

        txn.commit().await?;
        debug!("Deleted parking space {} from lot {}", space_id, model.lot_id);
        Ok(())
    }
}
