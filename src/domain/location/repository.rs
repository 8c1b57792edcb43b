//! Location repository interface

use async_trait::async_trait;

use super::model::Location;
use crate::domain::DomainResult;

#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Insert a new location. `DuplicateKey` if the ID is taken.
    async fn create(&self, location: Location) -> DomainResult<()>;

    async fn find_by_id(&self, location_id: &str) -> DomainResult<Option<Location>>;

    async fn find_all(&self) -> DomainResult<Vec<Location>>;

    /// Overwrite name/district/state. `NotFound` if absent.
    async fn update(&self, location: Location) -> DomainResult<()>;

    /// Delete the location together with every lot it owns (and their
    /// spaces and boundaries) in one transaction. Returns the number of
    /// lots removed. `NotFound` if absent.
    async fn delete_cascade(&self, location_id: &str) -> DomainResult<u64>;
}
