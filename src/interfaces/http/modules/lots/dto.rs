//! Lot DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{LotStatus, SpaceSummary};
use crate::domain::{ParkingLot, ReservationReport};
use crate::interfaces::http::common::wire::{deserialize_flag, serialize_flag, CoordinateInput};

#[derive(Debug, Serialize, ToSchema)]
pub struct LotDto {
    #[serde(rename = "lotID")]
    pub lot_id: String,
    pub lot_name: String,
    #[serde(rename = "locationID")]
    pub location_id: String,
    /// `indoor` or `outdoor`
    #[serde(rename = "locationType")]
    pub location_type: String,
    /// Center as `"lat,lng"`; `null` until a boundary or point is saved
    pub coordinates: Option<String>,
    #[serde(rename = "isReserved", serialize_with = "serialize_flag")]
    #[schema(value_type = u8)]
    pub is_reserved: bool,
    pub spaces: i32,
}

impl From<ParkingLot> for LotDto {
    fn from(lot: ParkingLot) -> Self {
        Self {
            lot_id: lot.lot_id,
            lot_name: lot.name,
            location_id: lot.location_id,
            location_type: lot.location_type.to_string(),
            coordinates: lot.center.map(|c| c.to_string()),
            is_reserved: lot.is_reserved,
            spaces: lot.space_count,
        }
    }
}

/// Body of `POST /add-lot`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLotRequest {
    #[serde(rename = "lotID")]
    #[validate(length(min = 1, message = "lotID is required"))]
    pub lot_id: String,
    #[validate(length(min = 1, message = "lot_name is required"))]
    pub lot_name: String,
    #[serde(rename = "locationID")]
    #[validate(length(min = 1, message = "locationID is required"))]
    pub location_id: String,
    #[serde(rename = "locationType")]
    #[validate(length(min = 1, message = "locationType is required"))]
    pub location_type: String,
    /// Optional marked point, `"lat,lng"` or `[lat, lng]`
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub coordinates: Option<CoordinateInput>,
}

/// Body of `POST /edit-indoor-lot`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EditIndoorLotRequest {
    #[serde(rename = "lotID")]
    #[validate(length(min = 1, message = "lotID is required"))]
    pub lot_id: String,
    #[validate(length(min = 1, message = "lot_name is required"))]
    pub lot_name: String,
    #[schema(value_type = String)]
    pub coordinates: CoordinateInput,
}

/// Body of `PUT /update-lot-reserved/{lotID}`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReservedRequest {
    #[serde(rename = "isReserved", deserialize_with = "deserialize_flag")]
    #[schema(value_type = u8)]
    pub is_reserved: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LotStatusDto {
    pub exists: bool,
    #[serde(rename = "hasBoundaries")]
    pub has_boundaries: bool,
}

impl From<LotStatus> for LotStatusDto {
    fn from(s: LotStatus) -> Self {
        Self {
            exists: s.exists,
            has_boundaries: s.has_boundaries,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SpaceSummaryDto {
    #[serde(rename = "hasSpaces")]
    pub has_spaces: bool,
    #[serde(rename = "spaceCount")]
    pub space_count: i32,
}

impl From<SpaceSummary> for SpaceSummaryDto {
    fn from(s: SpaceSummary) -> Self {
        Self {
            has_spaces: s.has_spaces,
            space_count: s.space_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SpaceFailureDto {
    #[serde(rename = "parkingSpaceID")]
    pub space_id: String,
    pub error: String,
}

/// Outcome of a whole-lot reservation toggle
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationReportDto {
    #[serde(rename = "lotID")]
    pub lot_id: String,
    #[serde(rename = "isReserved")]
    pub is_reserved: bool,
    /// Spaces that were rewritten
    pub updated: Vec<String>,
    /// Spaces already in the requested state
    pub unchanged: Vec<String>,
    pub failures: Vec<SpaceFailureDto>,
    /// `false` when failures kept the lot flag from being updated
    #[serde(rename = "lotFlagUpdated")]
    pub lot_flag_updated: bool,
}

impl From<ReservationReport> for ReservationReportDto {
    fn from(r: ReservationReport) -> Self {
        Self {
            lot_id: r.lot_id,
            is_reserved: r.reserve,
            updated: r.updated,
            unchanged: r.unchanged,
            failures: r
                .failures
                .into_iter()
                .map(|f| SpaceFailureDto {
                    space_id: f.space_id,
                    error: f.error,
                })
                .collect(),
            lot_flag_updated: r.lot_flag_updated,
        }
    }
}
