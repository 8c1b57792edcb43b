//! Parking lot aggregate
//!
//! A lot owns its boundary and its spaces; deleting it removes both.

pub mod model;
pub mod repository;

pub use model::{LocationType, ParkingLot};
pub use repository::LotRepository;
