//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::boundary::BoundaryRepository;
use crate::domain::location::LocationRepository;
use crate::domain::lot::LotRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::space::SpaceRepository;

use super::boundary_repository::SeaOrmBoundaryRepository;
use super::location_repository::SeaOrmLocationRepository;
use super::lot_repository::SeaOrmLotRepository;
use super::space_repository::SeaOrmSpaceRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let lot = repos.lots().find_by_id("L1").await?;
/// let spaces = repos.spaces().find_by_lot("L1").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    locations: SeaOrmLocationRepository,
    lots: SeaOrmLotRepository,
    boundaries: SeaOrmBoundaryRepository,
    spaces: SeaOrmSpaceRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            locations: SeaOrmLocationRepository::new(db.clone()),
            lots: SeaOrmLotRepository::new(db.clone()),
            boundaries: SeaOrmBoundaryRepository::new(db.clone()),
            spaces: SeaOrmSpaceRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn locations(&self) -> &dyn LocationRepository {
        &self.locations
    }

    fn lots(&self) -> &dyn LotRepository {
        &self.lots
    }

    fn boundaries(&self) -> &dyn BoundaryRepository {
        &self.boundaries
    }

    fn spaces(&self) -> &dyn SpaceRepository {
        &self.spaces
    }
}
