//! Application services

mod location;
mod lot;
mod space;

pub use location::LocationService;
pub use lot::{LotService, LotStatus, NewLot, SpaceSummary};
pub use space::{NewSpace, NextSpaceId, SpaceEdit, SpaceService};
