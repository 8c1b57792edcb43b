//! Parking lots: CRUD, indoor marked points, status checks, whole-lot reservation

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
