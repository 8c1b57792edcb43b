//! Boundary DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Coordinate, DomainResult};
use crate::interfaces::http::common::wire::CoordinateInput;

/// Body of `POST /add-lot-boundary` and `POST /edit-lot-boundary`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BoundaryRequest {
    #[serde(rename = "lotID")]
    #[validate(length(min = 1, message = "lotID is required"))]
    pub lot_id: String,
    /// Optional rename, applied with the boundary
    #[serde(default)]
    pub lot_name: Option<String>,
    /// Vertices in drawing order, each `[lat, lng]` or `"lat,lng"`
    #[schema(value_type = Vec<Vec<f64>>)]
    pub coordinates: Vec<CoordinateInput>,
    /// Accepted for compatibility; the center is always recomputed
    #[serde(default, rename = "centerCoordinates")]
    #[schema(value_type = Option<Vec<f64>>)]
    pub center_coordinates: Option<serde_json::Value>,
}

impl BoundaryRequest {
    pub fn vertices(&self) -> DomainResult<Vec<Coordinate>> {
        self.coordinates.iter().map(|c| c.to_coordinate()).collect()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BoundarySavedDto {
    #[serde(rename = "lotID")]
    pub lot_id: String,
    #[serde(rename = "centerCoordinates")]
    #[schema(value_type = Vec<f64>)]
    pub center: [f64; 2],
    #[serde(rename = "vertexCount")]
    pub vertex_count: usize,
}
