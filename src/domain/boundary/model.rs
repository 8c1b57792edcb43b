//! Boundary write request
//!
//! A boundary is never patched vertex by vertex: every write replaces the
//! whole ordered vertex list and recomputes the lot center.

use crate::domain::geo::{self, Coordinate};
use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// First boundary for the lot; `Conflict` if one already exists
    Create,
    /// Discard whatever is stored and write the new vertices
    Replace,
}

/// A validated boundary ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryUpdate {
    pub lot_id: String,
    /// Stored with a 1-based `point_order` in this order
    pub vertices: Vec<Coordinate>,
    pub center: Coordinate,
    /// Optional rename applied in the same transaction
    pub lot_name: Option<String>,
    pub mode: WriteMode,
}

impl BoundaryUpdate {
    pub fn new(
        lot_id: impl Into<String>,
        vertices: Vec<Coordinate>,
        mode: WriteMode,
    ) -> DomainResult<Self> {
        let lot_id = lot_id.into();
        if lot_id.trim().is_empty() {
            return Err(DomainError::Validation("lotID is required".to_string()));
        }
        geo::validate_polygon(&vertices)?;
        let center = geo::centroid(&vertices)?;

        Ok(Self {
            lot_id,
            vertices,
            center,
            lot_name: None,
            mode,
        })
    }

    pub fn with_lot_name(mut self, name: Option<String>) -> Self {
        self.lot_name = name.filter(|n| !n.trim().is_empty());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Coordinate> {
        [[1.0, 1.0], [1.0, 3.0], [3.0, 3.0], [3.0, 1.0]]
            .into_iter()
            .map(Coordinate::from)
            .collect()
    }

    #[test]
    fn center_is_derived_from_vertices() {
        let update = BoundaryUpdate::new("L1", square(), WriteMode::Replace).unwrap();
        assert_eq!(update.center, Coordinate::new(2.0, 2.0));
        assert_eq!(update.vertices, square());
    }

    #[test]
    fn degenerate_boundary_is_rejected() {
        let err = BoundaryUpdate::new("L1", square()[..2].to_vec(), WriteMode::Create).unwrap_err();
        assert!(matches!(err, DomainError::InvalidGeometry(_)));

        let err = BoundaryUpdate::new("L1", vec![], WriteMode::Create).unwrap_err();
        assert!(matches!(err, DomainError::InvalidGeometry(_)));
    }

    #[test]
    fn missing_lot_id_is_a_validation_error() {
        let err = BoundaryUpdate::new("  ", square(), WriteMode::Create).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn blank_rename_is_dropped() {
        let update = BoundaryUpdate::new("L1", square(), WriteMode::Replace)
            .unwrap()
            .with_lot_name(Some("   ".into()));
        assert_eq!(update.lot_name, None);
    }
}
