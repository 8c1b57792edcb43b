//! Parking space service: creation with ID allocation, edits, deletes

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::space::{
    check_space_id, format_space_id, next_space_number, FeatureFlags, FeaturePatch, ParkingSpace,
    ParkingType, SpacePatch, SpacePosition,
};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// Input for creating a space. Flags left as `None` take the type's preset.
#[derive(Debug, Clone, Default)]
pub struct NewSpace {
    /// Allocated from the lot's existing IDs when absent
    pub space_id: Option<String>,
    pub lot_id: String,
    pub parking_type: ParkingType,
    pub features: FeaturePatch,
    pub is_available: Option<bool>,
    pub position: Option<SpacePosition>,
}

/// Full set of editable fields, as submitted by the edit form.
/// A missing `position` clears the stored one.
#[derive(Debug, Clone)]
pub struct SpaceEdit {
    pub parking_type: ParkingType,
    pub features: FeatureFlags,
    pub is_available: bool,
    pub position: Option<SpacePosition>,
}

impl From<SpaceEdit> for SpacePatch {
    fn from(edit: SpaceEdit) -> Self {
        SpacePatch {
            parking_type: Some(edit.parking_type),
            features: edit.features.into(),
            is_available: Some(edit.is_available),
            position: Some(edit.position),
            original_type: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextSpaceId {
    pub number: u64,
    pub space_id: String,
}

pub struct SpaceService {
    repos: Arc<dyn RepositoryProvider>,
}

impl SpaceService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Canonical flags that pre-fill the form for a type.
    pub fn feature_preset(parking_type: &ParkingType) -> FeatureFlags {
        FeatureFlags::for_type(parking_type)
    }

    pub async fn next_id(&self, lot_id: &str) -> DomainResult<NextSpaceId> {
        let existing = self.repos.spaces().ids_for_lot(lot_id).await?;
        let number = next_space_number(lot_id, &existing)?;
        Ok(NextSpaceId {
            number,
            space_id: format_space_id(lot_id, number),
        })
    }

    pub async fn create(&self, new: NewSpace) -> DomainResult<ParkingSpace> {
        let space_id = match new.space_id.filter(|id| !id.trim().is_empty()) {
            Some(id) => id,
            None => self.next_id(&new.lot_id).await?.space_id,
        };
        check_space_id(&space_id, &new.lot_id)?;

        let mut space = ParkingSpace::new(space_id, new.lot_id, new.parking_type);
        space.features.apply(&new.features);
        if let Some(available) = new.is_available {
            space.is_available = available;
        }
        space.position = new.position;

        self.repos.spaces().create(space.clone()).await?;
        info!(
            space_id = %space.space_id,
            lot_id = %space.lot_id,
            parking_type = %space.parking_type,
            "Parking space created"
        );
        Ok(space)
    }

    pub async fn list_for_lot(&self, lot_id: &str) -> DomainResult<Vec<ParkingSpace>> {
        if lot_id.trim().is_empty() {
            return Err(DomainError::Validation("lotID is required".to_string()));
        }
        self.repos.spaces().find_by_lot(lot_id).await
    }

    pub async fn get(&self, space_id: &str) -> DomainResult<ParkingSpace> {
        self.repos
            .spaces()
            .find_by_id(space_id)
            .await?
            .ok_or_else(|| DomainError::not_found("ParkingSpace", "parkingSpaceID", space_id))
    }

    /// Partial update limited to the patchable fields.
    pub async fn update(&self, space_id: &str, patch: SpacePatch) -> DomainResult<ParkingSpace> {
        if patch.is_empty() {
            return Err(DomainError::Validation(
                "no updatable fields in request".to_string(),
            ));
        }
        debug!(space_id, ?patch, "Applying space patch");
        let space = self.repos.spaces().update(space_id, patch).await?;
        info!(space_id, parking_type = %space.parking_type, "Parking space updated");
        Ok(space)
    }

    /// Overwrite every editable field of a space.
    pub async fn edit(&self, space_id: &str, edit: SpaceEdit) -> DomainResult<ParkingSpace> {
        self.update(space_id, edit.into()).await
    }

    pub async fn delete(&self, space_id: &str) -> DomainResult<()> {
        self.repos.spaces().delete(space_id).await?;
        info!(space_id, "Parking space deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, Location, LocationType, ParkingLot};
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
    use crate::infrastructure::database::test_database;

    async fn service() -> (Arc<dyn RepositoryProvider>, SpaceService) {
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(test_database().await));
        repos
            .locations()
            .create(Location::new("LOC1", "Campus", "Gombak", "Selangor"))
            .await
            .unwrap();
        repos
            .lots()
            .create(ParkingLot::new("L1", "North", "LOC1", LocationType::Outdoor, None))
            .await
            .unwrap();
        (repos.clone(), SpaceService::new(repos))
    }

    fn in_l1(parking_type: ParkingType) -> NewSpace {
        NewSpace {
            lot_id: "L1".into(),
            parking_type,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn ids_are_allocated_sequentially() {
        let (_, svc) = service().await;
        assert_eq!(
            svc.next_id("L1").await.unwrap(),
            NextSpaceId {
                number: 1,
                space_id: "L1_01".into()
            }
        );

        let first = svc.create(in_l1(ParkingType::Regular)).await.unwrap();
        let second = svc.create(in_l1(ParkingType::EV)).await.unwrap();
        assert_eq!(first.space_id, "L1_01");
        assert_eq!(second.space_id, "L1_02");
        assert_eq!(svc.next_id("L1").await.unwrap().space_id, "L1_03");
    }

    #[tokio::test]
    async fn supplied_id_is_kept_and_duplicates_rejected() {
        let (_, svc) = service().await;
        let mut new = in_l1(ParkingType::Regular);
        new.space_id = Some("L1_07".into());
        svc.create(new.clone()).await.unwrap();

        assert!(matches!(
            svc.create(new).await.unwrap_err(),
            DomainError::DuplicateKey { .. }
        ));
        assert_eq!(svc.next_id("L1").await.unwrap().space_id, "L1_08");
    }

    #[tokio::test]
    async fn supplied_id_must_carry_its_own_lot_prefix() {
        let (repos, svc) = service().await;
        repos
            .lots()
            .create(ParkingLot::new("L2", "South", "LOC1", LocationType::Outdoor, None))
            .await
            .unwrap();

        let mut foreign = in_l1(ParkingType::Regular).with_lot("L2");
        foreign.space_id = Some("L1_01".into());
        assert!(matches!(
            svc.create(foreign).await.unwrap_err(),
            DomainError::Validation(_)
        ));

        let mut too_long = in_l1(ParkingType::Regular);
        too_long.space_id = Some(format!("L1_{}", u64::MAX));
        assert!(matches!(
            svc.create(too_long).await.unwrap_err(),
            DomainError::Validation(_)
        ));

        // nothing was stored, so L1 still allocates from the start
        assert_eq!(repos.lots().find_by_id("L2").await.unwrap().unwrap().space_count, 0);
        assert_eq!(svc.next_id("L1").await.unwrap().space_id, "L1_01");
        let auto = svc.create(in_l1(ParkingType::Regular)).await.unwrap();
        assert_eq!(auto.space_id, "L1_01");
    }

    #[tokio::test]
    async fn largest_accepted_id_still_has_a_successor() {
        let (_, svc) = service().await;
        let mut last = in_l1(ParkingType::Regular);
        last.space_id = Some("L1_999999999".into());
        svc.create(last).await.unwrap();

        let next = svc.next_id("L1").await.unwrap();
        assert_eq!(next.number, 1_000_000_000);
        assert_eq!(next.space_id, "L1_1000000000");
        // past the digit limit, so the allocator refuses rather than wraps
        assert!(matches!(
            svc.create(in_l1(ParkingType::Regular)).await.unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn explicit_flags_override_preset() {
        let (_, svc) = service().await;
        let mut new = in_l1(ParkingType::EV);
        new.features.has_ev_charging = Some(false);
        new.features.is_covered = Some(true);
        new.position = Some(SpacePosition::Point(Coordinate::new(3.0, 101.0)));

        let space = svc.create(new).await.unwrap();
        assert!(!space.features.has_ev_charging);
        assert!(space.features.is_covered);
        assert_eq!(svc.get(&space.space_id).await.unwrap(), space);
    }

    #[tokio::test]
    async fn space_in_unknown_lot_is_rejected() {
        let (_, svc) = service().await;
        let err = svc.create(in_l1(ParkingType::Regular).with_lot("L404")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_to_reserved_type_preserves_original() {
        let (_, svc) = service().await;
        let space = svc.create(in_l1(ParkingType::Family)).await.unwrap();

        let patch = SpacePatch {
            parking_type: Some(ParkingType::Regular),
            ..Default::default()
        };
        let updated = svc.update(&space.space_id, patch.clone()).await.unwrap();
        assert_eq!(updated.original_type, Some(ParkingType::Family));

        // a second switch to Regular keeps the first capture
        let again = svc.update(&space.space_id, patch).await.unwrap();
        assert_eq!(again.original_type, Some(ParkingType::Family));
    }

    #[tokio::test]
    async fn empty_patch_is_rejected() {
        let (_, svc) = service().await;
        let space = svc.create(in_l1(ParkingType::Regular)).await.unwrap();
        assert!(matches!(
            svc.update(&space.space_id, SpacePatch::default()).await.unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn full_edit_overwrites_flags() {
        let (_, svc) = service().await;
        let space = svc.create(in_l1(ParkingType::Special)).await.unwrap();

        let edited = svc
            .edit(
                &space.space_id,
                SpaceEdit {
                    parking_type: ParkingType::Premium,
                    features: FeatureFlags::for_type(&ParkingType::Premium),
                    is_available: false,
                    position: Some(SpacePosition::Level("Level 3".into())),
                },
            )
            .await
            .unwrap();
        assert_eq!(edited.parking_type, ParkingType::Premium);
        assert_eq!(edited.features, FeatureFlags::for_type(&ParkingType::Premium));
        assert!(!edited.is_available);
        assert_eq!(edited.original_type, None);

        let cleared = svc
            .edit(
                &space.space_id,
                SpaceEdit {
                    parking_type: ParkingType::Premium,
                    features: edited.features,
                    is_available: true,
                    position: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.position, None);
        assert_eq!(svc.get(&space.space_id).await.unwrap().position, None);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let (repos, svc) = service().await;
        let space = svc.create(in_l1(ParkingType::Regular)).await.unwrap();
        svc.delete(&space.space_id).await.unwrap();

        assert!(matches!(
            svc.get(&space.space_id).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
        let lot = repos.lots().find_by_id("L1").await.unwrap().unwrap();
        assert_eq!(lot.space_count, 0);
    }

    #[tokio::test]
    async fn listing_needs_a_lot_id() {
        let (_, svc) = service().await;
        assert!(matches!(
            svc.list_for_lot("").await.unwrap_err(),
            DomainError::Validation(_)
        ));
        assert!(svc.list_for_lot("L404").await.unwrap().is_empty());
    }

    impl NewSpace {
        fn with_lot(mut self, lot_id: &str) -> Self {
            self.lot_id = lot_id.into();
            self
        }
    }
}
