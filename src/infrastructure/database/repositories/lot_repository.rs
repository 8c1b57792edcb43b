//! SeaORM implementation of LotRepository

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};

use super::space_repository::{in_allocation_order, space_from_model, write_space};
use super::write_lock::{lock_location, lock_lot};
use crate::domain::geo::Coordinate;
use crate::domain::lot::{LocationType, LotRepository, ParkingLot};
use crate::domain::space::reservation::transition;
use crate::domain::space::ReservationReport;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{lot_boundary, parking_lot, parking_space};

pub struct SeaOrmLotRepository {
    db: DatabaseConnection,
}

impl SeaOrmLotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn location_type_from_column(s: &str) -> LocationType {
    s.parse().unwrap_or_else(|_| {
        warn!("Unknown location_type '{}' in parking_lots, assuming outdoor", s);
        LocationType::Outdoor
    })
}

pub(super) fn lot_from_model(m: parking_lot::Model) -> ParkingLot {
    let center = match (m.center_latitude, m.center_longitude) {
        (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
        _ => None,
    };
    ParkingLot {
        location_type: location_type_from_column(&m.location_type),
        lot_id: m.lot_id,
        name: m.lot_name,
        location_id: m.location_id,
        center,
        is_reserved: m.is_reserved,
        space_count: m.spaces,
    }
}

pub(super) fn lot_not_found(lot_id: &str) -> DomainError {
    DomainError::not_found("ParkingLot", "lotID", lot_id)
}

/// Delete the given lots with everything they own: spaces first, then
/// boundary vertices, then the lot rows. Runs on the caller's transaction.
pub(super) async fn purge_lots<C: ConnectionTrait>(conn: &C, lot_ids: &[String]) -> DomainResult<()> {
    if lot_ids.is_empty() {
        return Ok(());
    }

    let spaces = parking_space::Entity::delete_many()
        .filter(parking_space::Column::LotId.is_in(lot_ids.iter().cloned()))
        .exec(conn)
        .await?;
    let vertices = lot_boundary::Entity::delete_many()
        .filter(lot_boundary::Column::LotId.is_in(lot_ids.iter().cloned()))
        .exec(conn)
        .await?;
    parking_lot::Entity::delete_many()
        .filter(parking_lot::Column::LotId.is_in(lot_ids.iter().cloned()))
        .exec(conn)
        .await?;

    debug!(
        "Purged lots {:?}: {} space(s), {} boundary vertex row(s)",
        lot_ids, spaces.rows_affected, vertices.rows_affected
    );
    Ok(())
}

// ── LotRepository impl ──────────────────────────────────────────

#[async_trait]
impl LotRepository for SeaOrmLotRepository {
    async fn create(&self, lot: ParkingLot) -> DomainResult<()> {
        debug!("Saving parking lot: {}", lot.lot_id);

        let txn = self.db.begin().await?;

        if !lock_location(&txn, &lot.location_id).await? {
            return Err(DomainError::not_found(
                "ParkingLocation",
                "locationID",
                lot.location_id,
            ));
        }
        if parking_lot::Entity::find_by_id(&lot.lot_id)
            .one(&txn)
            .await?
            .is_some()
        {
            return Err(DomainError::duplicate("ParkingLot", "lotID", lot.lot_id));
        }

        let now = Utc::now();
        let model = parking_lot::ActiveModel {
            lot_id: Set(lot.lot_id.clone()),
            lot_name: Set(lot.name),
            location_id: Set(lot.location_id),
            location_type: Set(lot.location_type.as_str().to_string()),
            center_latitude: Set(lot.center.map(|c| c.lat)),
            center_longitude: Set(lot.center.map(|c| c.lng)),
            is_reserved: Set(lot.is_reserved),
            spaces: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };
        if let Err(e) = model.insert(&txn).await {
            return Err(match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    DomainError::duplicate("ParkingLot", "lotID", lot.lot_id)
                }
                _ => e.into(),
            });
        }

        txn.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, lot_id: &str) -> DomainResult<Option<ParkingLot>> {
        let model = parking_lot::Entity::find_by_id(lot_id).one(&self.db).await?;
        Ok(model.map(lot_from_model))
    }

    async fn find_all(&self) -> DomainResult<Vec<ParkingLot>> {
        let models = parking_lot::Entity::find()
            .order_by_asc(parking_lot::Column::LotId)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(lot_from_model).collect())
    }

    async fn find_by_location(&self, location_id: &str) -> DomainResult<Vec<ParkingLot>> {
        let models = parking_lot::Entity::find()
            .filter(parking_lot::Column::LocationId.eq(location_id))
            .order_by_asc(parking_lot::Column::LotId)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(lot_from_model).collect())
    }

    async fn update_marked_point(
        &self,
        lot_id: &str,
        name: &str,
        center: Coordinate,
    ) -> DomainResult<()> {
        let result = parking_lot::Entity::update_many()
            .col_expr(parking_lot::Column::LotName, Expr::value(name))
            .col_expr(parking_lot::Column::CenterLatitude, Expr::value(center.lat))
            .col_expr(parking_lot::Column::CenterLongitude, Expr::value(center.lng))
            .col_expr(parking_lot::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(parking_lot::Column::LotId.eq(lot_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(lot_not_found(lot_id));
        }
        Ok(())
    }

    async fn delete_cascade(&self, lot_id: &str) -> DomainResult<()> {
        let txn = self.db.begin().await?;

        if !lock_lot(&txn, lot_id).await? {
            return Err(lot_not_found(lot_id));
        }
        purge_lots(&txn, &[lot_id.to_string()]).await?;

        txn.commit().await?;
        info!("Deleted parking lot {} and all associated data", lot_id);
        Ok(())
    }

    async fn set_reservation(
        &self,
        lot_id: &str,
        reserve: bool,
    ) -> DomainResult<ReservationReport> {
        let txn = self.db.begin().await?;

        if !lock_lot(&txn, lot_id).await? {
            return Err(lot_not_found(lot_id));
        }

        let mut spaces = parking_space::Entity::find()
            .filter(parking_space::Column::LotId.eq(lot_id))
            .all(&txn)
            .await?;
        in_allocation_order(lot_id, &mut spaces);

        let mut report = ReservationReport::new(lot_id, reserve);
        for model in spaces {
            let mut space = space_from_model(model);
            if !transition(&mut space, reserve) {
                report.unchanged.push(space.space_id);
                continue;
            }

            // One savepoint per space: a failing row rolls back alone.
            let savepoint = txn.begin().await?;
            let written = match write_space(&savepoint, &space).await {
                Ok(()) => savepoint.commit().await.map_err(DomainError::from),
                Err(e) => Err(e),
            };
            match written {
                Ok(()) => report.updated.push(space.space_id),
                Err(e) => {
                    warn!("Reservation toggle failed for space {}: {}", space.space_id, e);
                    report.record_failure(space.space_id, e);
                }
            }
        }

        if report.is_complete() {
            parking_lot::Entity::update_many()
                .col_expr(parking_lot::Column::IsReserved, Expr::value(reserve))
                .col_expr(parking_lot::Column::UpdatedAt, Expr::value(Utc::now()))
                .filter(parking_lot::Column::LotId.eq(lot_id))
                .exec(&txn)
                .await?;
            report.lot_flag_updated = true;
        }

        txn.commit().await?;
        info!(
            "Lot {} {}: {} updated, {} unchanged, {} failed",
            lot_id,
            if reserve { "reserved" } else { "unreserved" },
            report.updated.len(),
            report.unchanged.len(),
            report.failures.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::location::{Location, LocationRepository};
    use crate::domain::space::{ParkingSpace, ParkingType, SpaceRepository};
    use crate::domain::RepositoryProvider;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
    use crate::infrastructure::database::test_database;

    async fn provider_with_location() -> SeaOrmRepositoryProvider {
        let repos = SeaOrmRepositoryProvider::new(test_database().await);
        repos
            .locations()
            .create(Location::new("LOC1", "Campus", "Gombak", "Selangor"))
            .await
            .unwrap();
        repos
    }

    fn outdoor(lot_id: &str) -> ParkingLot {
        ParkingLot::new(lot_id, "North", "LOC1", LocationType::Outdoor, None)
    }

    #[tokio::test]
    async fn create_and_query_lots() {
        let repos = provider_with_location().await;
        repos.lots().create(outdoor("L1")).await.unwrap();
        repos
            .lots()
            .create(ParkingLot::new(
                "L2",
                "Basement",
                "LOC1",
                LocationType::Indoor,
                Some(Coordinate::new(3.25, 101.73)),
            ))
            .await
            .unwrap();

        let l2 = repos.lots().find_by_id("L2").await.unwrap().unwrap();
        assert_eq!(l2.location_type, LocationType::Indoor);
        assert_eq!(l2.center, Some(Coordinate::new(3.25, 101.73)));

        assert_eq!(repos.lots().find_all().await.unwrap().len(), 2);
        assert_eq!(repos.lots().find_by_location("LOC1").await.unwrap().len(), 2);
        assert!(repos.lots().find_by_location("LOC2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_lot_is_rejected() {
        let repos = provider_with_location().await;
        repos.lots().create(outdoor("L1")).await.unwrap();
        let err = repos.lots().create(outdoor("L1")).await.unwrap_err();
        assert!(matches!(err, DomainError::DuplicateKey { .. }));
    }

    #[tokio::test]
    async fn lot_needs_existing_location() {
        let repos = provider_with_location().await;
        let orphan = ParkingLot::new("L9", "Ghost", "LOC404", LocationType::Outdoor, None);
        let err = repos.lots().create(orphan).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "ParkingLocation", .. }));
    }

    #[tokio::test]
    async fn update_marked_point() {
        let repos = provider_with_location().await;
        repos.lots().create(outdoor("L1")).await.unwrap();
        repos
            .lots()
            .update_marked_point("L1", "Level B2", Coordinate::new(1.5, 2.5))
            .await
            .unwrap();

        let lot = repos.lots().find_by_id("L1").await.unwrap().unwrap();
        assert_eq!(lot.name, "Level B2");
        assert_eq!(lot.center, Some(Coordinate::new(1.5, 2.5)));

        let err = repos
            .lots()
            .update_marked_point("L404", "x", Coordinate::new(0.0, 0.0))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_missing_lot_is_not_found() {
        let repos = provider_with_location().await;
        let err = repos.lots().delete_cascade("L404").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn reserve_and_release_round_trip() {
        let repos = provider_with_location().await;
        repos.lots().create(outdoor("L1")).await.unwrap();
        repos
            .spaces()
            .create(ParkingSpace::new("L1_01", "L1", ParkingType::Regular))
            .await
            .unwrap();
        repos
            .spaces()
            .create(ParkingSpace::new("L1_02", "L1", ParkingType::EV))
            .await
            .unwrap();

        let report = repos.lots().set_reservation("L1", true).await.unwrap();
        assert!(report.is_complete());
        assert!(report.lot_flag_updated);
        assert_eq!(report.updated, vec!["L1_01", "L1_02"]);

        let l1_02 = repos.spaces().find_by_id("L1_02").await.unwrap().unwrap();
        assert_eq!(l1_02.parking_type, ParkingType::Regular);
        assert_eq!(l1_02.original_type, Some(ParkingType::EV));
        assert!(repos.lots().find_by_id("L1").await.unwrap().unwrap().is_reserved);

        // reserving again must not overwrite the captured types
        let again = repos.lots().set_reservation("L1", true).await.unwrap();
        assert_eq!(again.unchanged, vec!["L1_01", "L1_02"]);
        let l1_02 = repos.spaces().find_by_id("L1_02").await.unwrap().unwrap();
        assert_eq!(l1_02.original_type, Some(ParkingType::EV));

        repos.lots().set_reservation("L1", false).await.unwrap();
        let spaces = repos.spaces().find_by_lot("L1").await.unwrap();
        assert_eq!(spaces[0].parking_type, ParkingType::Regular);
        assert_eq!(spaces[1].parking_type, ParkingType::EV);
        assert!(spaces.iter().all(|s| s.original_type.is_none()));
        assert!(!repos.lots().find_by_id("L1").await.unwrap().unwrap().is_reserved);
    }

    #[tokio::test]
    async fn failing_space_is_reported_and_the_rest_still_toggle() {
        let db = test_database().await;
        let repos = SeaOrmRepositoryProvider::new(db.clone());
        repos
            .locations()
            .create(Location::new("LOC1", "Campus", "Gombak", "Selangor"))
            .await
            .unwrap();
        repos.lots().create(outdoor("L1")).await.unwrap();
        for (id, parking_type) in [
            ("L1_01", ParkingType::Regular),
            ("L1_02", ParkingType::Premium),
            ("L1_03", ParkingType::EV),
        ] {
            repos
                .spaces()
                .create(ParkingSpace::new(id, "L1", parking_type))
                .await
                .unwrap();
        }
        db.execute_unprepared(
            "CREATE TRIGGER reject_l1_02 BEFORE UPDATE ON parking_spaces \
             WHEN OLD.parking_space_id = 'L1_02' \
             BEGIN SELECT RAISE(ABORT, 'boom'); END",
        )
        .await
        .unwrap();

        let report = repos.lots().set_reservation("L1", true).await.unwrap();
        assert_eq!(report.updated, vec!["L1_01", "L1_03"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].space_id, "L1_02");
        assert!(report.failures[0].error.contains("boom"));
        assert!(!report.is_complete());
        assert!(!report.lot_flag_updated);

        let l1_02 = repos.spaces().find_by_id("L1_02").await.unwrap().unwrap();
        assert_eq!(l1_02.parking_type, ParkingType::Premium);
        assert_eq!(l1_02.original_type, None);
        let l1_03 = repos.spaces().find_by_id("L1_03").await.unwrap().unwrap();
        assert_eq!(l1_03.parking_type, ParkingType::Regular);
        assert_eq!(l1_03.original_type, Some(ParkingType::EV));
        assert!(!repos.lots().find_by_id("L1").await.unwrap().unwrap().is_reserved);
    }

    #[tokio::test]
    async fn reservation_walks_spaces_in_sequence_order() {
        let repos = provider_with_location().await;
        repos.lots().create(outdoor("L1")).await.unwrap();
        for id in ["L1_100", "L1_99", "L1_02"] {
            repos
                .spaces()
                .create(ParkingSpace::new(id, "L1", ParkingType::EV))
                .await
                .unwrap();
        }
        let report = repos.lots().set_reservation("L1", true).await.unwrap();
        assert_eq!(report.updated, vec!["L1_02", "L1_99", "L1_100"]);
    }

    #[tokio::test]
    async fn reserving_unknown_lot_is_not_found() {
        let repos = provider_with_location().await;
        let err = repos.lots().set_reservation("L404", true).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn reserving_empty_lot_only_sets_flag() {
        let repos = provider_with_location().await;
        repos.lots().create(outdoor("L1")).await.unwrap();
        let report = repos.lots().set_reservation("L1", true).await.unwrap();
        assert!(report.updated.is_empty());
        assert!(report.lot_flag_updated);
    }
}
