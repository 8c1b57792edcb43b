//! Parking lot repository interface

use async_trait::async_trait;

use super::model::ParkingLot;
use crate::domain::geo::Coordinate;
use crate::domain::space::ReservationReport;
use crate::domain::DomainResult;

#[async_trait]
pub trait LotRepository: Send + Sync {
    /// Insert a new lot. `DuplicateKey` if the ID is taken, `NotFound` if
    /// the owning location does not exist.
    async fn create(&self, lot: ParkingLot) -> DomainResult<()>;

    async fn find_by_id(&self, lot_id: &str) -> DomainResult<Option<ParkingLot>>;

    async fn find_all(&self) -> DomainResult<Vec<ParkingLot>>;

    async fn find_by_location(&self, location_id: &str) -> DomainResult<Vec<ParkingLot>>;

    /// Rename a lot and set its marked center point. `NotFound` if absent.
    async fn update_marked_point(
        &self,
        lot_id: &str,
        name: &str,
        center: Coordinate,
    ) -> DomainResult<()>;

    /// Delete the lot's spaces, its boundary and the lot itself, all or
    /// nothing. `NotFound` if absent.
    async fn delete_cascade(&self, lot_id: &str) -> DomainResult<()>;

    /// Force every space to the reserved type (remembering each original
    /// type once) or restore the originals, then set the lot's flag.
    async fn set_reservation(&self, lot_id: &str, reserve: bool)
        -> DomainResult<ReservationReport>;
}
