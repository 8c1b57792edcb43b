pub mod services;

// Re-export key types for convenience
pub use services::{
    LocationService, LotService, LotStatus, NewLot, NewSpace, NextSpaceId, SpaceEdit,
    SpaceService, SpaceSummary,
};
