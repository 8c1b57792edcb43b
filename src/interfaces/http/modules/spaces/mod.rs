//! Parking spaces: creation with ID allocation, partial and full edits,
//! feature presets

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
