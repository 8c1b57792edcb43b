//! Lot boundary aggregate

pub mod model;
pub mod repository;

pub use model::{BoundaryUpdate, WriteMode};
pub use repository::BoundaryRepository;
