//! Parking space domain entity

use std::fmt;
use std::str::FromStr;

use crate::domain::geo::Coordinate;
use crate::domain::DomainError;

/// Parking space type.
///
/// Types outside the known set are kept verbatim in `Other` so stored data
/// round-trips; they carry no feature preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParkingType {
    Regular,
    Special,
    Female,
    Premium,
    EV,
    Family,
    Other(String),
}

impl ParkingType {
    /// Type every space is forced to while its lot is reserved
    pub const RESERVED: ParkingType = ParkingType::Regular;

    pub fn as_str(&self) -> &str {
        match self {
            Self::Regular => "Regular",
            Self::Special => "Special",
            Self::Female => "Female",
            Self::Premium => "Premium",
            Self::EV => "EV",
            Self::Family => "Family",
            Self::Other(s) => s,
        }
    }

    pub fn is_reserved_marker(&self) -> bool {
        *self == Self::RESERVED
    }
}

impl Default for ParkingType {
    fn default() -> Self {
        Self::Regular
    }
}

impl fmt::Display for ParkingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ParkingType {
    fn from(s: &str) -> Self {
        match s.trim() {
            "Regular" => Self::Regular,
            "Special" => Self::Special,
            "Female" => Self::Female,
            "Premium" => Self::Premium,
            "EV" => Self::EV,
            "Family" => Self::Family,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Boolean attributes of a space
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    pub is_nearest: bool,
    pub is_covered: bool,
    pub is_wheelchair_accessible: bool,
    pub has_large_space: bool,
    pub is_well_lit_area: bool,
    pub has_ev_charging: bool,
    pub is_family_parking_area: bool,
    pub is_premium: bool,
}

impl FeatureFlags {
    /// Canonical flags for a parking type.
    ///
    /// Only pre-fills the form; callers may still toggle any flag afterwards.
    pub fn for_type(parking_type: &ParkingType) -> Self {
        let none = Self::default();
        match parking_type {
            ParkingType::Special => Self {
                is_nearest: true,
                is_wheelchair_accessible: true,
                is_well_lit_area: true,
                ..none
            },
            ParkingType::Female => Self {
                is_nearest: true,
                is_well_lit_area: true,
                ..none
            },
            ParkingType::Premium => Self {
                is_premium: true,
                ..none
            },
            ParkingType::EV => Self {
                has_ev_charging: true,
                ..none
            },
            ParkingType::Family => Self {
                has_large_space: true,
                is_family_parking_area: true,
                ..none
            },
            ParkingType::Regular | ParkingType::Other(_) => none,
        }
    }

    pub fn apply(&mut self, patch: &FeaturePatch) {
        macro_rules! set {
            ($($field:ident),*) => {
                $(if let Some(v) = patch.$field { self.$field = v; })*
            };
        }
        set!(
            is_nearest,
            is_covered,
            is_wheelchair_accessible,
            has_large_space,
            is_well_lit_area,
            has_ev_charging,
            is_family_parking_area,
            is_premium
        );
    }
}

/// Per-flag partial update; `None` leaves the flag untouched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeaturePatch {
    pub is_nearest: Option<bool>,
    pub is_covered: Option<bool>,
    pub is_wheelchair_accessible: Option<bool>,
    pub has_large_space: Option<bool>,
    pub is_well_lit_area: Option<bool>,
    pub has_ev_charging: Option<bool>,
    pub is_family_parking_area: Option<bool>,
    pub is_premium: Option<bool>,
}

impl From<FeatureFlags> for FeaturePatch {
    fn from(f: FeatureFlags) -> Self {
        Self {
            is_nearest: Some(f.is_nearest),
            is_covered: Some(f.is_covered),
            is_wheelchair_accessible: Some(f.is_wheelchair_accessible),
            has_large_space: Some(f.has_large_space),
            is_well_lit_area: Some(f.is_well_lit_area),
            has_ev_charging: Some(f.has_ev_charging),
            is_family_parking_area: Some(f.is_family_parking_area),
            is_premium: Some(f.is_premium),
        }
    }
}

/// Where a space is: a map point outdoors, a floor/level label indoors
#[derive(Debug, Clone, PartialEq)]
pub enum SpacePosition {
    Point(Coordinate),
    Level(String),
}

impl fmt::Display for SpacePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point(c) => fmt::Display::fmt(c, f),
            Self::Level(level) => f.write_str(level),
        }
    }
}

impl FromStr for SpacePosition {
    type Err = DomainError;

    /// Anything that parses as `"lat,lng"` is a point, the rest a level label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::Validation(
                "coordinates must not be empty".to_string(),
            ));
        }
        match s.parse::<Coordinate>() {
            Ok(c) if c.is_valid() => Ok(Self::Point(c)),
            Ok(c) => Err(DomainError::Validation(format!(
                "coordinates {} are outside the valid range",
                c
            ))),
            Err(_) => Ok(Self::Level(s.to_string())),
        }
    }
}

/// An individual parking stall
#[derive(Debug, Clone, PartialEq)]
pub struct ParkingSpace {
    /// `{lotID}_{NN}`
    pub space_id: String,
    pub lot_id: String,
    pub parking_type: ParkingType,
    pub features: FeatureFlags,
    pub is_available: bool,
    pub position: Option<SpacePosition>,
    /// Type before the lot was reserved; `None` outside a reservation
    pub original_type: Option<ParkingType>,
}

impl ParkingSpace {
    pub fn new(
        space_id: impl Into<String>,
        lot_id: impl Into<String>,
        parking_type: ParkingType,
    ) -> Self {
        let features = FeatureFlags::for_type(&parking_type);
        Self {
            space_id: space_id.into(),
            lot_id: lot_id.into(),
            parking_type,
            features,
            is_available: true,
            position: None,
            original_type: None,
        }
    }

    pub fn with_position(mut self, position: SpacePosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Switch to the reserved type, remembering the current type unless a
    /// previous reservation already did. Returns `true` if anything changed.
    pub fn reserve(&mut self) -> bool {
        let before = (self.parking_type.clone(), self.original_type.clone());
        if self.original_type.is_none() {
            self.original_type = Some(self.parking_type.clone());
        }
        self.parking_type = ParkingType::RESERVED;
        before != (self.parking_type.clone(), self.original_type.clone())
    }

    /// Restore the remembered type (keeping the current one if nothing was
    /// remembered) and forget it. Returns `true` if anything changed.
    pub fn release(&mut self) -> bool {
        match self.original_type.take() {
            Some(original) => {
                self.parking_type = original;
                true
            }
            None => false,
        }
    }

    /// Apply an allow-listed partial update.
    ///
    /// Setting the reserved type captures the current type into
    /// `original_type` exactly like [`ParkingSpace::reserve`], unless the
    /// patch sets `original_type` itself.
    pub fn apply(&mut self, patch: &SpacePatch) {
        if let Some(new_type) = &patch.parking_type {
            if new_type.is_reserved_marker()
                && patch.original_type.is_none()
                && self.original_type.is_none()
            {
                self.original_type = Some(self.parking_type.clone());
            }
            self.parking_type = new_type.clone();
        }
        if let Some(original) = &patch.original_type {
            self.original_type = original.clone();
        }
        self.features.apply(&patch.features);
        if let Some(available) = patch.is_available {
            self.is_available = available;
        }
        if let Some(position) = &patch.position {
            self.position = position.clone();
        }
    }
}

/// The fields a space update may touch. Anything else in a request is
/// ignored rather than persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpacePatch {
    pub parking_type: Option<ParkingType>,
    pub features: FeaturePatch,
    pub is_available: Option<bool>,
    /// `Some(None)` clears the stored position
    pub position: Option<Option<SpacePosition>>,
    /// `Some(None)` clears the remembered type
    pub original_type: Option<Option<ParkingType>>,
}

impl SpacePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_parking_types() {
        let special = FeatureFlags::for_type(&ParkingType::Special);
        assert!(special.is_nearest && special.is_wheelchair_accessible && special.is_well_lit_area);
        assert!(!special.is_covered && !special.is_premium);

        let female = FeatureFlags::for_type(&ParkingType::Female);
        assert!(female.is_nearest && female.is_well_lit_area);
        assert!(!female.is_wheelchair_accessible);

        assert!(FeatureFlags::for_type(&ParkingType::Premium).is_premium);
        assert!(FeatureFlags::for_type(&ParkingType::EV).has_ev_charging);

        let family = FeatureFlags::for_type(&ParkingType::Family);
        assert!(family.has_large_space && family.is_family_parking_area);

        assert_eq!(FeatureFlags::for_type(&ParkingType::Regular), FeatureFlags::default());
        assert_eq!(
            FeatureFlags::for_type(&ParkingType::from("Motorcycle")),
            FeatureFlags::default()
        );
    }

    #[test]
    fn unknown_type_round_trips() {
        let t = ParkingType::from("Motorcycle");
        assert_eq!(t, ParkingType::Other("Motorcycle".into()));
        assert_eq!(t.to_string(), "Motorcycle");
        assert_eq!(ParkingType::from("EV"), ParkingType::EV);
    }

    #[test]
    fn position_parsing() {
        assert_eq!(
            "3.1,101.6".parse::<SpacePosition>().unwrap(),
            SpacePosition::Point(Coordinate::new(3.1, 101.6))
        );
        assert_eq!(
            "Level 2, Bay B".parse::<SpacePosition>().unwrap(),
            SpacePosition::Level("Level 2, Bay B".into())
        );
        assert!("".parse::<SpacePosition>().is_err());
        assert!("200,10".parse::<SpacePosition>().is_err());
    }

    #[test]
    fn manual_flag_override_survives_preset() {
        let mut space = ParkingSpace::new("L1_01", "L1", ParkingType::EV);
        space.apply(&SpacePatch {
            features: FeaturePatch {
                is_covered: Some(true),
                has_ev_charging: Some(false),
                ..Default::default()
            },
            ..Default::default()
        });
        assert!(space.features.is_covered);
        assert!(!space.features.has_ev_charging);
        assert_eq!(space.parking_type, ParkingType::EV);
    }

    #[test]
    fn patching_to_reserved_type_captures_original_once() {
        let mut space = ParkingSpace::new("L1_02", "L1", ParkingType::EV);
        let to_regular = SpacePatch {
            parking_type: Some(ParkingType::Regular),
            ..Default::default()
        };

        space.apply(&to_regular);
        assert_eq!(space.parking_type, ParkingType::Regular);
        assert_eq!(space.original_type, Some(ParkingType::EV));

        space.apply(&to_regular);
        assert_eq!(space.original_type, Some(ParkingType::EV));
    }

    #[test]
    fn explicit_original_type_wins_over_capture() {
        let mut space = ParkingSpace::new("L1_03", "L1", ParkingType::Family);
        space.original_type = Some(ParkingType::Regular);
        space.apply(&SpacePatch {
            parking_type: Some(ParkingType::Regular),
            original_type: Some(None),
            ..Default::default()
        });
        assert_eq!(space.parking_type, ParkingType::Regular);
        assert_eq!(space.original_type, None);
    }

    #[test]
    fn non_reserved_type_change_does_not_capture() {
        let mut space = ParkingSpace::new("L1_04", "L1", ParkingType::Regular);
        space.apply(&SpacePatch {
            parking_type: Some(ParkingType::Premium),
            ..Default::default()
        });
        assert_eq!(space.original_type, None);
    }

    #[test]
    fn empty_patch() {
        assert!(SpacePatch::default().is_empty());
        let patch = SpacePatch {
            is_available: Some(false),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
