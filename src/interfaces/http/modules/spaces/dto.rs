//! Space DTOs
//!
//! Field names and the `0`/`1` flag encoding follow what the admin UI
//! already sends and reads.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::{NewSpace, NextSpaceId, SpaceEdit};
use crate::domain::space::{FeatureFlags, FeaturePatch, SpacePatch};
use crate::domain::{DomainError, DomainResult, ParkingSpace, ParkingType, SpacePosition};
use crate::interfaces::http::common::wire::{
    deserialize_flag, deserialize_nullable, deserialize_opt_flag, serialize_flag, CoordinateInput,
};

fn parking_type(raw: &str) -> DomainResult<ParkingType> {
    if raw.trim().is_empty() {
        return Err(DomainError::Validation("parkingType must not be empty".to_string()));
    }
    Ok(ParkingType::from(raw))
}

fn position(raw: Option<&CoordinateInput>) -> DomainResult<Option<SpacePosition>> {
    raw.map(CoordinateInput::to_position).transpose()
}

fn available_by_default() -> bool {
    true
}

/// The eight feature flags, `0`/`1` on the wire
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema)]
pub struct FeatureFlagsDto {
    #[serde(rename = "isNearest", default, serialize_with = "serialize_flag", deserialize_with = "deserialize_flag")]
    #[schema(value_type = u8)]
    pub is_nearest: bool,
    #[serde(rename = "isCovered", default, serialize_with = "serialize_flag", deserialize_with = "deserialize_flag")]
    #[schema(value_type = u8)]
    pub is_covered: bool,
    #[serde(rename = "isWheelchairAccessible", default, serialize_with = "serialize_flag", deserialize_with = "deserialize_flag")]
    #[schema(value_type = u8)]
    pub is_wheelchair_accessible: bool,
    #[serde(rename = "hasLargeSpace", default, serialize_with = "serialize_flag", deserialize_with = "deserialize_flag")]
    #[schema(value_type = u8)]
    pub has_large_space: bool,
    #[serde(rename = "isWellLitArea", default, serialize_with = "serialize_flag", deserialize_with = "deserialize_flag")]
    #[schema(value_type = u8)]
    pub is_well_lit_area: bool,
    #[serde(rename = "hasEVCharging", default, serialize_with = "serialize_flag", deserialize_with = "deserialize_flag")]
    #[schema(value_type = u8)]
    pub has_ev_charging: bool,
    #[serde(rename = "isFamilyParkingArea", default, serialize_with = "serialize_flag", deserialize_with = "deserialize_flag")]
    #[schema(value_type = u8)]
    pub is_family_parking_area: bool,
    #[serde(rename = "isPremium", default, serialize_with = "serialize_flag", deserialize_with = "deserialize_flag")]
    #[schema(value_type = u8)]
    pub is_premium: bool,
}

impl From<FeatureFlags> for FeatureFlagsDto {
    fn from(f: FeatureFlags) -> Self {
        Self {
            is_nearest: f.is_nearest,
            is_covered: f.is_covered,
            is_wheelchair_accessible: f.is_wheelchair_accessible,
            has_large_space: f.has_large_space,
            is_well_lit_area: f.is_well_lit_area,
            has_ev_charging: f.has_ev_charging,
            is_family_parking_area: f.is_family_parking_area,
            is_premium: f.is_premium,
        }
    }
}

impl From<FeatureFlagsDto> for FeatureFlags {
    fn from(f: FeatureFlagsDto) -> Self {
        Self {
            is_nearest: f.is_nearest,
            is_covered: f.is_covered,
            is_wheelchair_accessible: f.is_wheelchair_accessible,
            has_large_space: f.has_large_space,
            is_well_lit_area: f.is_well_lit_area,
            has_ev_charging: f.has_ev_charging,
            is_family_parking_area: f.is_family_parking_area,
            is_premium: f.is_premium,
        }
    }
}

/// Flags a request may set; absent ones are left alone
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
pub struct FlagPatchDto {
    #[serde(rename = "isNearest", default, deserialize_with = "deserialize_opt_flag")]
    #[schema(value_type = Option<u8>)]
    pub is_nearest: Option<bool>,
    #[serde(rename = "isCovered", default, deserialize_with = "deserialize_opt_flag")]
    #[schema(value_type = Option<u8>)]
    pub is_covered: Option<bool>,
    #[serde(rename = "isWheelchairAccessible", default, deserialize_with = "deserialize_opt_flag")]
    #[schema(value_type = Option<u8>)]
    pub is_wheelchair_accessible: Option<bool>,
    #[serde(rename = "hasLargeSpace", default, deserialize_with = "deserialize_opt_flag")]
    #[schema(value_type = Option<u8>)]
    pub has_large_space: Option<bool>,
    #[serde(rename = "isWellLitArea", default, deserialize_with = "deserialize_opt_flag")]
    #[schema(value_type = Option<u8>)]
    pub is_well_lit_area: Option<bool>,
    #[serde(rename = "hasEVCharging", default, deserialize_with = "deserialize_opt_flag")]
    #[schema(value_type = Option<u8>)]
    pub has_ev_charging: Option<bool>,
    #[serde(rename = "isFamilyParkingArea", default, deserialize_with = "deserialize_opt_flag")]
    #[schema(value_type = Option<u8>)]
    pub is_family_parking_area: Option<bool>,
    #[serde(rename = "isPremium", default, deserialize_with = "deserialize_opt_flag")]
    #[schema(value_type = Option<u8>)]
    pub is_premium: Option<bool>,
}

impl From<FlagPatchDto> for FeaturePatch {
    fn from(f: FlagPatchDto) -> Self {
        Self {
            is_nearest: f.is_nearest,
            is_covered: f.is_covered,
            is_wheelchair_accessible: f.is_wheelchair_accessible,
            has_large_space: f.has_large_space,
            is_well_lit_area: f.is_well_lit_area,
            has_ev_charging: f.has_ev_charging,
            is_family_parking_area: f.is_family_parking_area,
            is_premium: f.is_premium,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SpaceDto {
    #[serde(rename = "parkingSpaceID")]
    pub space_id: String,
    #[serde(rename = "lotID")]
    pub lot_id: String,
    #[serde(rename = "parkingType")]
    pub parking_type: String,
    #[serde(flatten)]
    pub features: FeatureFlagsDto,
    #[serde(rename = "isAvailable", serialize_with = "serialize_flag")]
    #[schema(value_type = u8)]
    pub is_available: bool,
    /// `"lat,lng"` outdoors, a level label indoors
    pub coordinates: Option<String>,
    /// Type before the lot was reserved
    #[serde(rename = "originalType")]
    pub original_type: Option<String>,
}

impl From<ParkingSpace> for SpaceDto {
    fn from(s: ParkingSpace) -> Self {
        Self {
            space_id: s.space_id,
            lot_id: s.lot_id,
            parking_type: s.parking_type.to_string(),
            features: s.features.into(),
            is_available: s.is_available,
            coordinates: s.position.map(|p| p.to_string()),
            original_type: s.original_type.map(|t| t.to_string()),
        }
    }
}

/// Body of `POST /add-space`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSpaceRequest {
    /// Allocated as `{lotID}_{NN}` when omitted
    #[serde(rename = "parkingSpaceID", default)]
    pub space_id: Option<String>,
    #[serde(rename = "lotID")]
    #[validate(length(min = 1, message = "lotID is required"))]
    pub lot_id: String,
    #[serde(rename = "parkingType")]
    #[validate(length(min = 1, message = "parkingType is required"))]
    pub parking_type: String,
    /// Flags not sent take the parking type's preset
    #[serde(flatten)]
    pub features: FlagPatchDto,
    #[serde(rename = "isAvailable", default, deserialize_with = "deserialize_opt_flag")]
    #[schema(value_type = Option<u8>)]
    pub is_available: Option<bool>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub coordinates: Option<CoordinateInput>,
}

impl CreateSpaceRequest {
    pub fn into_new_space(self) -> DomainResult<NewSpace> {
        Ok(NewSpace {
            parking_type: parking_type(&self.parking_type)?,
            position: position(self.coordinates.as_ref())?,
            space_id: self.space_id,
            lot_id: self.lot_id,
            features: self.features.into(),
            is_available: self.is_available,
        })
    }
}

/// Body of `PUT /update-space/{id}`. Fields outside this list are ignored.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSpaceRequest {
    #[serde(rename = "parkingType", default)]
    pub parking_type: Option<String>,
    #[serde(flatten)]
    pub features: FlagPatchDto,
    #[serde(rename = "isAvailable", default, deserialize_with = "deserialize_opt_flag")]
    #[schema(value_type = Option<u8>)]
    pub is_available: Option<bool>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub coordinates: Option<CoordinateInput>,
    /// `null` clears the remembered type
    #[serde(rename = "originalType", default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<String>)]
    pub original_type: Option<Option<String>>,
}

impl UpdateSpaceRequest {
    pub fn into_patch(self) -> DomainResult<SpacePatch> {
        let original_type = match self.original_type {
            None => None,
            Some(None) => Some(None),
            Some(Some(t)) if t.trim().is_empty() => Some(None),
            Some(Some(t)) => Some(Some(ParkingType::from(t.as_str()))),
        };
        Ok(SpacePatch {
            parking_type: self.parking_type.as_deref().map(parking_type).transpose()?,
            features: self.features.into(),
            is_available: self.is_available,
            position: position(self.coordinates.as_ref())?.map(Some),
            original_type,
        })
    }
}

/// Body of `POST /edit-parking-space`: every editable field at once
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EditSpaceRequest {
    #[serde(rename = "parkingSpaceID")]
    #[validate(length(min = 1, message = "parkingSpaceID is required"))]
    pub space_id: String,
    /// Only used by the UI to navigate back
    #[serde(rename = "lotID", default)]
    pub lot_id: Option<String>,
    #[serde(rename = "parkingType")]
    #[validate(length(min = 1, message = "parkingType is required"))]
    pub parking_type: String,
    #[serde(flatten)]
    pub features: FeatureFlagsDto,
    #[serde(
        rename = "isAvailable",
        default = "available_by_default",
        deserialize_with = "deserialize_flag"
    )]
    #[schema(value_type = u8)]
    pub is_available: bool,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub coordinates: Option<CoordinateInput>,
}

impl EditSpaceRequest {
    pub fn to_edit(&self) -> DomainResult<SpaceEdit> {
        Ok(SpaceEdit {
            parking_type: parking_type(&self.parking_type)?,
            features: self.features.into(),
            is_available: self.is_available,
            position: position(self.coordinates.as_ref())?,
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SpacesQuery {
    #[serde(rename = "lotID")]
    pub lot_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NextSpaceNumberDto {
    #[serde(rename = "nextNumber")]
    pub next_number: u64,
    #[serde(rename = "nextSpaceID")]
    pub next_space_id: String,
}

impl From<NextSpaceId> for NextSpaceNumberDto {
    fn from(n: NextSpaceId) -> Self {
        Self {
            next_number: n.number,
            next_space_id: n.space_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;
    use serde_json::json;

    #[test]
    fn space_serializes_flags_as_integers() {
        let space = ParkingSpace::new("L1_02", "L1", ParkingType::EV)
            .with_position(SpacePosition::Point(Coordinate::new(3.5, 101.25)));
        let json = serde_json::to_value(SpaceDto::from(space)).unwrap();
        assert_eq!(json["parkingSpaceID"], "L1_02");
        assert_eq!(json["hasEVCharging"], 1);
        assert_eq!(json["isPremium"], 0);
        assert_eq!(json["isAvailable"], 1);
        assert_eq!(json["coordinates"], "3.5,101.25");
        assert_eq!(json["originalType"], serde_json::Value::Null);
    }

    #[test]
    fn create_request_keeps_unsent_flags_open() {
        let req: CreateSpaceRequest = serde_json::from_value(json!({
            "lotID": "L1",
            "parkingType": "Special",
            "isCovered": 1,
            "hasEVCharging": "0",
            "coordinates": "Level 2"
        }))
        .unwrap();
        let new = req.into_new_space().unwrap();
        assert_eq!(new.space_id, None);
        assert_eq!(new.features.is_covered, Some(true));
        assert_eq!(new.features.has_ev_charging, Some(false));
        assert_eq!(new.features.is_nearest, None);
        assert_eq!(new.position, Some(SpacePosition::Level("Level 2".into())));
    }

    #[test]
    fn update_request_ignores_unknown_fields() {
        let req: UpdateSpaceRequest = serde_json::from_value(json!({
            "parkingType": "Regular",
            "lotID": "L9",
            "dropTable": true
        }))
        .unwrap();
        let patch = req.into_patch().unwrap();
        assert_eq!(patch.parking_type, Some(ParkingType::Regular));
        assert_eq!(patch.original_type, None);
        assert_eq!(patch.features, FeaturePatch::default());
    }

    #[test]
    fn update_request_null_original_type_clears() {
        let req: UpdateSpaceRequest =
            serde_json::from_value(json!({"originalType": null})).unwrap();
        assert_eq!(req.into_patch().unwrap().original_type, Some(None));
    }

    #[test]
    fn blank_parking_type_is_rejected() {
        let req = UpdateSpaceRequest {
            parking_type: Some("  ".into()),
            ..Default::default()
        };
        assert!(matches!(req.into_patch(), Err(DomainError::Validation(_))));
    }
}
