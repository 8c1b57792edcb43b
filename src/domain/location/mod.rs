//! Location aggregate
//!
//! A named site (district/state) that owns any number of parking lots.

pub mod model;
pub mod repository;

pub use model::Location;
pub use repository::LocationRepository;
