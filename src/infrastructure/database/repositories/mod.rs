//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod boundary_repository;
pub mod location_repository;
pub mod lot_repository;
pub mod repository_provider;
pub mod space_repository;
mod write_lock;

pub use repository_provider::SeaOrmRepositoryProvider;
