//! Parking locations: CRUD with cascading delete

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
