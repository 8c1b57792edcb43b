//! Parking lot domain entity

use std::fmt;
use std::str::FromStr;

use crate::domain::geo::Coordinate;
use crate::domain::DomainError;

/// Whether the lot is drawn as a polygon or marked as a single point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationType {
    /// Center comes from a marked point (floor plans have no polygon)
    Indoor,
    /// Center is derived from the boundary polygon
    Outdoor,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indoor => "indoor",
            Self::Outdoor => "outdoor",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "indoor" => Ok(Self::Indoor),
            "outdoor" => Ok(Self::Outdoor),
            other => Err(DomainError::Validation(format!(
                "locationType must be 'indoor' or 'outdoor', got '{}'",
                other
            ))),
        }
    }
}

/// A managed parking facility
#[derive(Debug, Clone, PartialEq)]
pub struct ParkingLot {
    /// Externally assigned, unique
    pub lot_id: String,
    pub name: String,
    /// Owning location
    pub location_id: String,
    pub location_type: LocationType,
    /// Boundary centroid for outdoor lots, marked point for indoor ones
    pub center: Option<Coordinate>,
    /// Whole-lot reservation override
    pub is_reserved: bool,
    /// Number of spaces, maintained alongside space inserts/deletes
    pub space_count: i32,
}

impl ParkingLot {
    pub fn new(
        lot_id: impl Into<String>,
        name: impl Into<String>,
        location_id: impl Into<String>,
        location_type: LocationType,
        center: Option<Coordinate>,
    ) -> Self {
        Self {
            lot_id: lot_id.into(),
            name: name.into(),
            location_id: location_id.into(),
            location_type,
            center,
            is_reserved: false,
            space_count: 0,
        }
    }

    pub fn has_spaces(&self) -> bool {
        self.space_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_type_parsing_is_case_insensitive() {
        assert_eq!("Indoor".parse::<LocationType>().unwrap(), LocationType::Indoor);
        assert_eq!(" OUTDOOR ".parse::<LocationType>().unwrap(), LocationType::Outdoor);
        assert!("rooftop".parse::<LocationType>().is_err());
    }

    #[test]
    fn new_lot_is_unreserved_and_empty() {
        let lot = ParkingLot::new("L1", "North", "LOC1", LocationType::Outdoor, None);
        assert!(!lot.is_reserved);
        assert!(!lot.has_spaces());
        assert_eq!(lot.location_type.to_string(), "outdoor");
    }
}
