//! Database entities module

pub mod lot_boundary;
pub mod parking_location;
pub mod parking_lot;
pub mod parking_space;

pub use lot_boundary::Entity as LotBoundary;
pub use parking_location::Entity as ParkingLocation;
pub use parking_lot::Entity as ParkingLot;
pub use parking_space::Entity as ParkingSpace;
