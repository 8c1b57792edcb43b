//! SeaORM implementation of LocationRepository

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, SqlErr, TransactionTrait,
};

use super::lot_repository::purge_lots;
use super::write_lock::lock_location;
use crate::domain::location::{Location, LocationRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{parking_location, parking_lot};

pub struct SeaOrmLocationRepository {
    db: DatabaseConnection,
}

impl SeaOrmLocationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: parking_location::Model) -> Location {
    Location {
        location_id: m.location_id,
        name: m.location_name,
        district: m.district,
        state: m.state,
    }
}

fn not_found(location_id: &str) -> DomainError {
    DomainError::not_found("ParkingLocation", "locationID", location_id)
}

// ── LocationRepository impl ─────────────────────────────────────

#[async_trait]
impl LocationRepository for SeaOrmLocationRepository {
    async fn create(&self, location: Location) -> DomainResult<()> {
        debug!("Saving location: {}", location.location_id);

        let existing = parking_location::Entity::find_by_id(&location.location_id)
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(DomainError::duplicate(
                "ParkingLocation",
                "locationID",
                location.location_id,
            ));
        }

        let now = Utc::now();
        let model = parking_location::ActiveModel {
            location_id: Set(location.location_id.clone()),
            location_name: Set(location.name),
            district: Set(location.district),
            state: Set(location.state),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match model.insert(&self.db).await {
            Ok(_) => Ok(()),
            // lost a race with a concurrent insert of the same ID
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Err(
                DomainError::duplicate("ParkingLocation", "locationID", location.location_id),
            ),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, location_id: &str) -> DomainResult<Option<Location>> {
        let model = parking_location::Entity::find_by_id(location_id)
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Location>> {
        let models = parking_location::Entity::find()
            .order_by_asc(parking_location::Column::LocationId)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, location: Location) -> DomainResult<()> {
        debug!("Updating location: {}", location.location_id);

        let existing = parking_location::Entity::find_by_id(&location.location_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| not_found(&location.location_id))?;

        let mut active: parking_location::ActiveModel = existing.into();
        active.location_name = Set(location.name);
        active.district = Set(location.district);
        active.state = Set(location.state);
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await?;
        Ok(())
    }

    async fn delete_cascade(&self, location_id: &str) -> DomainResult<u64> {
        let txn = self.db.begin().await?;

        if !lock_location(&txn, location_id).await? {
            return Err(not_found(location_id));
        }

        let lot_ids: Vec<String> = parking_lot::Entity::find()
            .select_only()
            .column(parking_lot::Column::LotId)
            .filter(parking_lot::Column::LocationId.eq(location_id))
            .into_tuple()
            .all(&txn)
            .await?;

        purge_lots(&txn, &lot_ids).await?;
        parking_location::Entity::delete_by_id(location_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;
        info!(
            "Deleted location {} together with {} lot(s)",
            location_id,
            lot_ids.len()
        );
        Ok(lot_ids.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::boundary::{BoundaryRepository, BoundaryUpdate, WriteMode};
    use crate::domain::lot::{LocationType, LotRepository, ParkingLot};
    use crate::domain::space::{ParkingSpace, ParkingType, SpaceRepository};
    use crate::domain::{Coordinate, RepositoryProvider};
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
    use crate::infrastructure::database::test_database;

    fn mall() -> Location {
        Location::new("LOC1", "Sunway Mall", "Petaling", "Selangor")
    }

    #[tokio::test]
    async fn create_then_read_back() {
        let repo = SeaOrmLocationRepository::new(test_database().await);
        repo.create(mall()).await.unwrap();

        assert_eq!(repo.find_by_id("LOC1").await.unwrap(), Some(mall()));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
        assert_eq!(repo.find_by_id("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let repo = SeaOrmLocationRepository::new(test_database().await);
        repo.create(mall()).await.unwrap();

        let err = repo.create(mall()).await.unwrap_err();
        assert!(matches!(err, DomainError::DuplicateKey { .. }));
    }

    #[tokio::test]
    async fn update_missing_location_is_not_found() {
        let repo = SeaOrmLocationRepository::new(test_database().await);
        let err = repo.update(mall()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_overwrites_fields() {
        let repo = SeaOrmLocationRepository::new(test_database().await);
        repo.create(mall()).await.unwrap();

        let renamed = Location::new("LOC1", "Sunway Pyramid", "Subang", "Selangor");
        repo.update(renamed.clone()).await.unwrap();
        assert_eq!(repo.find_by_id("LOC1").await.unwrap(), Some(renamed));
    }

    #[tokio::test]
    async fn delete_cascades_to_lots_spaces_and_boundaries() {
        let repos = SeaOrmRepositoryProvider::new(test_database().await);
        repos.locations().create(mall()).await.unwrap();
        repos
            .lots()
            .create(ParkingLot::new("L1", "North", "LOC1", LocationType::Outdoor, None))
            .await
            .unwrap();
        repos
            .spaces()
            .create(ParkingSpace::new("L1_01", "L1", ParkingType::EV))
            .await
            .unwrap();
        let ring = vec![
            Coordinate::new(1.0, 1.0),
            Coordinate::new(1.0, 3.0),
            Coordinate::new(3.0, 3.0),
        ];
        repos
            .boundaries()
            .write(BoundaryUpdate::new("L1", ring, WriteMode::Create).unwrap())
            .await
            .unwrap();

        let removed = repos.locations().delete_cascade("LOC1").await.unwrap();
        assert_eq!(removed, 1);

        assert_eq!(repos.locations().find_by_id("LOC1").await.unwrap(), None);
        assert_eq!(repos.lots().find_by_id("L1").await.unwrap(), None);
        assert!(repos.spaces().find_by_lot("L1").await.unwrap().is_empty());
        assert!(repos.boundaries().find_for_lot("L1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_missing_location_is_not_found() {
        let repo = SeaOrmLocationRepository::new(test_database().await);
        let err = repo.delete_cascade("LOC404").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
