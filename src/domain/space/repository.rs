//! Parking space repository interface

use async_trait::async_trait;

use super::model::{ParkingSpace, SpacePatch};
use crate::domain::DomainResult;

#[async_trait]
pub trait SpaceRepository: Send + Sync {
    /// Insert a space and bump its lot's space counter in one transaction.
    /// `DuplicateKey` if the ID is taken, `NotFound` if the lot is missing.
    async fn create(&self, space: ParkingSpace) -> DomainResult<()>;

    async fn find_by_id(&self, space_id: &str) -> DomainResult<Option<ParkingSpace>>;

    /// Spaces of a lot ordered by ID; empty for unknown lots.
    async fn find_by_lot(&self, lot_id: &str) -> DomainResult<Vec<ParkingSpace>>;

    async fn ids_for_lot(&self, lot_id: &str) -> DomainResult<Vec<String>>;

    /// Read, apply the patch (see [`ParkingSpace::apply`]) and write back in
    /// one transaction. `NotFound` if absent.
    async fn update(&self, space_id: &str, patch: SpacePatch) -> DomainResult<ParkingSpace>;

    /// Delete a space and decrement its lot's counter in one transaction.
    /// `NotFound` if absent.
    async fn delete(&self, space_id: &str) -> DomainResult<()>;
}
