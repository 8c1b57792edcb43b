//! Location DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Location;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LocationDto {
    #[serde(rename = "locationID")]
    pub location_id: String,
    pub location_name: String,
    pub district: String,
    pub state: String,
}

impl From<Location> for LocationDto {
    fn from(l: Location) -> Self {
        Self {
            location_id: l.location_id,
            location_name: l.name,
            district: l.district,
            state: l.state,
        }
    }
}

/// Body of `POST /add-location` and `PUT /update-location`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LocationRequest {
    #[serde(rename = "locationID")]
    #[validate(length(min = 1, message = "locationID is required"))]
    pub location_id: String,
    #[validate(length(min = 1, message = "location_name is required"))]
    pub location_name: String,
    #[validate(length(min = 1, message = "district is required"))]
    pub district: String,
    #[validate(length(min = 1, message = "state is required"))]
    pub state: String,
}

impl From<LocationRequest> for Location {
    fn from(r: LocationRequest) -> Self {
        Location::new(r.location_id, r.location_name, r.district, r.state)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LocationDeleted {
    #[serde(rename = "locationID")]
    pub location_id: String,
    #[serde(rename = "lotsDeleted")]
    pub lots_deleted: u64,
}
