//! Boundary repository interface

use async_trait::async_trait;

use super::model::BoundaryUpdate;
use crate::domain::geo::Coordinate;
use crate::domain::DomainResult;

#[async_trait]
pub trait BoundaryRepository: Send + Sync {
    /// Vertices ordered by `point_order`; empty if the lot has none or
    /// does not exist.
    async fn find_for_lot(&self, lot_id: &str) -> DomainResult<Vec<Coordinate>>;

    async fn exists_for_lot(&self, lot_id: &str) -> DomainResult<bool>;

    /// Write the vertices and the lot center in one transaction.
    /// Returns the stored center.
    async fn write(&self, update: BoundaryUpdate) -> DomainResult<Coordinate>;
}
