//! Whole-lot reservation outcome
//!
//! The per-space transition itself lives on [`ParkingSpace`]
//! (`reserve` / `release`); this module describes what a bulk toggle did.

use super::model::ParkingSpace;

/// A space the bulk toggle could not update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceFailure {
    pub space_id: String,
    pub error: String,
}

/// Result of reserving or releasing every space in a lot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationReport {
    pub lot_id: String,
    /// Requested state
    pub reserve: bool,
    /// Spaces whose row was written
    pub updated: Vec<String>,
    /// Spaces already in the requested state
    pub unchanged: Vec<String>,
    pub failures: Vec<SpaceFailure>,
    /// Whether the lot's own `is_reserved` flag now matches `reserve`
    pub lot_flag_updated: bool,
}

impl ReservationReport {
    pub fn new(lot_id: impl Into<String>, reserve: bool) -> Self {
        Self {
            lot_id: lot_id.into(),
            reserve,
            ..Default::default()
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn record_failure(&mut self, space_id: impl Into<String>, error: impl ToString) {
        self.failures.push(SpaceFailure {
            space_id: space_id.into(),
            error: error.to_string(),
        });
    }
}

/// Apply the requested transition to one space in memory.
/// Returns `true` if the row needs to be written.
pub fn transition(space: &mut ParkingSpace, reserve: bool) -> bool {
    if reserve {
        space.reserve()
    } else {
        space.release()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::space::ParkingType;

    fn lot(types: &[ParkingType]) -> Vec<ParkingSpace> {
        types
            .iter()
            .enumerate()
            .map(|(i, t)| ParkingSpace::new(format!("L1_{:02}", i + 1), "L1", t.clone()))
            .collect()
    }

    fn types(spaces: &[ParkingSpace]) -> Vec<ParkingType> {
        spaces.iter().map(|s| s.parking_type.clone()).collect()
    }

    #[test]
    fn reserve_then_release_restores_every_type() {
        let initial = vec![
            ParkingType::Regular,
            ParkingType::EV,
            ParkingType::Special,
            ParkingType::Family,
            ParkingType::Other("Motorcycle".into()),
        ];
        let mut spaces = lot(&initial);

        for s in &mut spaces {
            transition(s, true);
        }
        assert!(spaces.iter().all(|s| s.parking_type == ParkingType::Regular));

        for s in &mut spaces {
            transition(s, false);
        }
        assert_eq!(types(&spaces), initial);
        assert!(spaces.iter().all(|s| s.original_type.is_none()));
    }

    #[test]
    fn repeated_reserve_keeps_the_first_capture() {
        let mut spaces = lot(&[ParkingType::Premium]);
        let s = &mut spaces[0];

        assert!(transition(s, true));
        assert!(!transition(s, true));
        assert_eq!(s.original_type, Some(ParkingType::Premium));

        assert!(transition(s, false));
        assert_eq!(s.parking_type, ParkingType::Premium);
    }

    #[test]
    fn regular_space_round_trip() {
        // L1_01 (Regular) and L1_02 (EV)
        let mut spaces = lot(&[ParkingType::Regular, ParkingType::EV]);
        for s in &mut spaces {
            transition(s, true);
        }
        assert_eq!(spaces[0].original_type, Some(ParkingType::Regular));
        assert_eq!(spaces[1].original_type, Some(ParkingType::EV));
        assert_eq!(spaces[1].parking_type, ParkingType::Regular);

        for s in &mut spaces {
            transition(s, false);
        }
        assert_eq!(spaces[0].parking_type, ParkingType::Regular);
        assert_eq!(spaces[1].parking_type, ParkingType::EV);
        assert_eq!(spaces[1].original_type, None);
    }

    #[test]
    fn release_without_capture_keeps_current_type() {
        let mut spaces = lot(&[ParkingType::Female]);
        assert!(!transition(&mut spaces[0], false));
        assert_eq!(spaces[0].parking_type, ParkingType::Female);
    }

    #[test]
    fn report_tracks_failures() {
        let mut report = ReservationReport::new("L1", true);
        assert!(report.is_complete());
        report.record_failure("L1_02", "disk I/O error");
        assert!(!report.is_complete());
        assert_eq!(report.failures[0].space_id, "L1_02");
    }
}
