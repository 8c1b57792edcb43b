//! Location management service

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, DomainResult, Location, RepositoryProvider};

fn require(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

fn validate(location: &Location) -> DomainResult<()> {
    require("locationID", &location.location_id)?;
    require("location_name", &location.name)?;
    require("district", &location.district)?;
    require("state", &location.state)
}

pub struct LocationService {
    repos: Arc<dyn RepositoryProvider>,
}

impl LocationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self) -> DomainResult<Vec<Location>> {
        self.repos.locations().find_all().await
    }

    pub async fn get(&self, location_id: &str) -> DomainResult<Location> {
        self.repos
            .locations()
            .find_by_id(location_id)
            .await?
            .ok_or_else(|| DomainError::not_found("ParkingLocation", "locationID", location_id))
    }

    pub async fn create(&self, location: Location) -> DomainResult<Location> {
        validate(&location)?;
        self.repos.locations().create(location.clone()).await?;
        info!(location_id = %location.location_id, "Location created");
        Ok(location)
    }

    pub async fn update(&self, location: Location) -> DomainResult<Location> {
        validate(&location)?;
        self.repos.locations().update(location.clone()).await?;
        info!(location_id = %location.location_id, "Location updated");
        Ok(location)
    }

    /// Delete a location and every lot it owns. Returns the number of lots removed.
    pub async fn delete(&self, location_id: &str) -> DomainResult<u64> {
        self.repos.locations().delete_cascade(location_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
    use crate::infrastructure::database::test_database;

    async fn service() -> LocationService {
        let repos = SeaOrmRepositoryProvider::new(test_database().await);
        LocationService::new(Arc::new(repos))
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let svc = service().await;
        let err = svc
            .create(Location::new("LOC1", "Mall", "", "Selangor"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("district")));
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let svc = service().await;
        assert!(matches!(
            svc.get("LOC404").await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn create_update_delete() {
        let svc = service().await;
        svc.create(Location::new("LOC1", "Mall", "Petaling", "Selangor"))
            .await
            .unwrap();
        svc.update(Location::new("LOC1", "Mall East", "Petaling", "Selangor"))
            .await
            .unwrap();
        assert_eq!(svc.get("LOC1").await.unwrap().name, "Mall East");

        assert_eq!(svc.delete("LOC1").await.unwrap(), 0);
        assert!(svc.list().await.unwrap().is_empty());
    }
}
