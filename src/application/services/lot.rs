//! Lot, boundary and whole-lot reservation service

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::boundary::{BoundaryUpdate, WriteMode};
use crate::domain::{
    Coordinate, DomainError, DomainResult, LocationType, ParkingLot, RepositoryProvider,
    ReservationReport,
};

/// Input for creating a lot
#[derive(Debug, Clone)]
pub struct NewLot {
    pub lot_id: String,
    pub name: String,
    pub location_id: String,
    pub location_type: LocationType,
    pub center: Option<Coordinate>,
}

/// Answer to "does this lot exist and is it drawn yet"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LotStatus {
    pub exists: bool,
    pub has_boundaries: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceSummary {
    pub has_spaces: bool,
    pub space_count: i32,
}

fn require(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

fn check_point(center: &Coordinate) -> DomainResult<()> {
    if !center.is_valid() {
        return Err(DomainError::InvalidGeometry(format!(
            "coordinates {} are outside the valid range",
            center
        )));
    }
    Ok(())
}

pub struct LotService {
    repos: Arc<dyn RepositoryProvider>,
}

impl LotService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Lots ────────────────────────────────────────────────────

    pub async fn list(&self) -> DomainResult<Vec<ParkingLot>> {
        self.repos.lots().find_all().await
    }

    pub async fn list_by_location(&self, location_id: &str) -> DomainResult<Vec<ParkingLot>> {
        self.repos.lots().find_by_location(location_id).await
    }

    pub async fn get(&self, lot_id: &str) -> DomainResult<ParkingLot> {
        self.repos
            .lots()
            .find_by_id(lot_id)
            .await?
            .ok_or_else(|| DomainError::not_found("ParkingLot", "lotID", lot_id))
    }

    pub async fn create(&self, new: NewLot) -> DomainResult<ParkingLot> {
        require("lotID", &new.lot_id)?;
        require("lot_name", &new.name)?;
        require("locationID", &new.location_id)?;
        if let Some(center) = &new.center {
            check_point(center)?;
        }

        let lot = ParkingLot::new(
            new.lot_id,
            new.name,
            new.location_id,
            new.location_type,
            new.center,
        );
        self.repos.lots().create(lot.clone()).await?;
        info!(lot_id = %lot.lot_id, location_type = %lot.location_type, "Parking lot created");
        Ok(lot)
    }

    /// Rename an indoor lot and move its marked point.
    pub async fn edit_indoor(
        &self,
        lot_id: &str,
        name: &str,
        center: Coordinate,
    ) -> DomainResult<()> {
        require("lotID", lot_id)?;
        require("lot_name", name)?;
        check_point(&center)?;

        self.repos
            .lots()
            .update_marked_point(lot_id, name.trim(), center)
            .await?;
        info!(lot_id, %center, "Indoor lot updated");
        Ok(())
    }

    pub async fn check(&self, lot_id: &str) -> DomainResult<LotStatus> {
        let exists = self.repos.lots().find_by_id(lot_id).await?.is_some();
        let has_boundaries = exists && self.repos.boundaries().exists_for_lot(lot_id).await?;
        Ok(LotStatus {
            exists,
            has_boundaries,
        })
    }

    pub async fn space_summary(&self, lot_id: &str) -> DomainResult<SpaceSummary> {
        let lot = self.get(lot_id).await?;
        Ok(SpaceSummary {
            has_spaces: lot.has_spaces(),
            space_count: lot.space_count,
        })
    }

    pub async fn delete(&self, lot_id: &str) -> DomainResult<()> {
        self.repos.lots().delete_cascade(lot_id).await?;
        info!(lot_id, "Parking lot deleted");
        Ok(())
    }

    // ── Boundaries ──────────────────────────────────────────────

    /// Ordered vertices; empty when the lot has no boundary or is unknown.
    pub async fn boundary(&self, lot_id: &str) -> DomainResult<Vec<Coordinate>> {
        self.repos.boundaries().find_for_lot(lot_id).await
    }

    /// Validate and store a boundary, recomputing the lot center.
    /// Returns the new center.
    pub async fn save_boundary(
        &self,
        lot_id: &str,
        vertices: Vec<Coordinate>,
        mode: WriteMode,
        lot_name: Option<String>,
    ) -> DomainResult<Coordinate> {
        let update = BoundaryUpdate::new(lot_id, vertices, mode)?.with_lot_name(lot_name);
        let vertex_count = update.vertices.len();

        let center = self.repos.boundaries().write(update).await?;

        let mode_label = match mode {
            WriteMode::Create => "create",
            WriteMode::Replace => "replace",
        };
        metrics::counter!("parking_boundary_replacements_total", "mode" => mode_label)
            .increment(1);
        info!(lot_id, vertex_count, %center, mode = mode_label, "Lot boundary saved");
        Ok(center)
    }

    // ── Reservation ─────────────────────────────────────────────

    pub async fn set_reservation(
        &self,
        lot_id: &str,
        reserve: bool,
    ) -> DomainResult<ReservationReport> {
        require("lotID", lot_id)?;

        let report = self.repos.lots().set_reservation(lot_id, reserve).await?;

        let action = if reserve { "reserve" } else { "release" };
        metrics::counter!("parking_reservation_toggles_total", "action" => action).increment(1);
        if !report.is_complete() {
            metrics::counter!("parking_reservation_space_failures_total")
                .increment(report.failures.len() as u64);
            warn!(
                lot_id,
                failed = report.failures.len(),
                "Reservation toggle left some spaces unchanged; lot flag not updated"
            );
        }
        Ok(report)
    }
}
