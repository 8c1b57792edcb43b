//! Domain layer: parking entities, geometry and repository interfaces

pub mod boundary;
pub mod geo;
pub mod location;
pub mod lot;
pub mod repositories;
pub mod space;

pub use geo::{centroid, Coordinate};
pub use location::Location;
pub use lot::{LocationType, ParkingLot};
pub use repositories::RepositoryProvider;
pub use space::{FeatureFlags, ParkingSpace, ParkingType, ReservationReport, SpacePosition};

pub use crate::shared::errors::{DomainError, DomainResult};
