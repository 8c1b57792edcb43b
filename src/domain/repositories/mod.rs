//! Repository access for the domain layer

use super::boundary::BoundaryRepository;
use super::location::LocationRepository;
use super::lot::LotRepository;
use super::space::SpaceRepository;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let lot = repos.lots().find_by_id("L1").await?;
///     let ring = repos.boundaries().find_for_lot("L1").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn locations(&self) -> &dyn LocationRepository;
    fn lots(&self) -> &dyn LotRepository;
    fn boundaries(&self) -> &dyn BoundaryRepository;
    fn spaces(&self) -> &dyn SpaceRepository;
}
