//! Parking space aggregate
//!
//! Space model and feature presets, identifier allocation, whole-lot
//! reservation reporting and the repository interface.

pub mod identifier;
pub mod model;
pub mod repository;
pub mod reservation;

pub use identifier::{check_space_id, format_space_id, next_space_id, next_space_number};
pub use model::{
    FeatureFlags, FeaturePatch, ParkingSpace, ParkingType, SpacePatch, SpacePosition,
};
pub use repository::SpaceRepository;
pub use reservation::{ReservationReport, SpaceFailure};
