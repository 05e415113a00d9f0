//! POI Service - Application service for point-of-interest management

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::application::error::{invalid, ValidationError};
use crate::domain::entities::{Poi, PoiKind};
use crate::domain::value_objects::{GameId, GeoPoint, OwnerId, PoiId};
use crate::infrastructure::persistence::PostgresRepository;

/// Request to create or update a POI
#[derive(Debug, Clone)]
pub struct PoiRequest {
    pub name: String,
    pub description: String,
    pub contextual_data: String,
    pub image_url: Option<String>,
    pub kind: PoiKind,
    pub tags: Vec<String>,
    pub location: GeoPoint,
}

/// POI service trait defining the application use cases
#[async_trait]
pub trait PoiService: Send + Sync {
    /// List the POIs of one of the owner's games
    async fn list_pois(&self, game_id: GameId, owner: OwnerId) -> Result<Option<Vec<Poi>>>;

    /// Create a POI in one of the owner's games
    async fn create_poi(
        &self,
        game_id: GameId,
        owner: OwnerId,
        request: PoiRequest,
    ) -> Result<Option<Poi>>;

    /// Update a POI
    async fn update_poi(
        &self,
        game_id: GameId,
        owner: OwnerId,
        id: PoiId,
        request: PoiRequest,
    ) -> Result<Option<Poi>>;

    /// Delete a POI
    async fn delete_poi(&self, game_id: GameId, owner: OwnerId, id: PoiId) -> Result<bool>;
}

/// Default implementation of PoiService using the Postgres repository
pub struct PoiServiceImpl {
    repository: PostgresRepository,
}

impl PoiServiceImpl {
    pub fn new(repository: PostgresRepository) -> Self {
        Self { repository }
    }

    fn validate_request(request: &PoiRequest) -> Result<(), ValidationError> {
        let name = request.name.trim();
        if name.len() < 3 {
            invalid!("Name is required");
        }
        if name.len() > 200 {
            invalid!("Name cannot exceed 200 characters");
        }
        let description = request.description.trim();
        if description.len() < 3 {
            invalid!("Description is required");
        }
        if description.len() > 1000 {
            invalid!("Description cannot exceed 1000 characters");
        }
        let contextual_data = request.contextual_data.trim();
        if contextual_data.len() < 3 {
            invalid!("Contextual data is required");
        }
        if contextual_data.len() > 2000 {
            invalid!("Contextual data cannot exceed 2000 characters");
        }
        if !request.location.is_valid() {
            invalid!("Location coordinates are out of range");
        }
        Ok(())
    }

    async fn owned_game(&self, game_id: GameId, owner: OwnerId) -> Result<bool> {
        Ok(self.repository.games().get(game_id, owner).await?.is_some())
    }

    fn build_poi(game_id: GameId, id: PoiId, request: PoiRequest) -> Poi {
        Poi {
            id,
            game_id,
            name: request.name,
            description: request.description,
            contextual_data: request.contextual_data,
            image_url: request.image_url,
            kind: request.kind,
            tags: request.tags,
            location: request.location,
        }
    }
}

#[async_trait]
impl PoiService for PoiServiceImpl {
    #[instrument(skip(self))]
    async fn list_pois(&self, game_id: GameId, owner: OwnerId) -> Result<Option<Vec<Poi>>> {
        if !self.owned_game(game_id, owner).await? {
            return Ok(None);
        }

        debug!(game_id = %game_id, "Listing POIs");
        let pois = self
            .repository
            .pois()
            .list_by_game(game_id)
            .await
            .context("Failed to list POIs from repository")?;

        Ok(Some(pois))
    }

    #[instrument(skip(self, request), fields(game_id = %game_id, name = %request.name))]
    async fn create_poi(
        &self,
        game_id: GameId,
        owner: OwnerId,
        request: PoiRequest,
    ) -> Result<Option<Poi>> {
        Self::validate_request(&request)?;

        if !self.owned_game(game_id, owner).await? {
            return Ok(None);
        }

        let poi = Self::build_poi(game_id, PoiId::new(), request);

        self.repository
            .pois()
            .create(&poi)
            .await
            .context("Failed to create POI in repository")?;

        info!(poi_id = %poi.id, "Created POI: {}", poi.name);
        Ok(Some(poi))
    }

    #[instrument(skip(self, request), fields(game_id = %game_id, poi_id = %id))]
    async fn update_poi(
        &self,
        game_id: GameId,
        owner: OwnerId,
        id: PoiId,
        request: PoiRequest,
    ) -> Result<Option<Poi>> {
        Self::validate_request(&request)?;

        if !self.owned_game(game_id, owner).await? {
            return Ok(None);
        }

        let poi = Self::build_poi(game_id, id, request);

        let updated = self
            .repository
            .pois()
            .update(&poi)
            .await
            .context("Failed to update POI in repository")?;

        if !updated {
            return Ok(None);
        }

        info!(poi_id = %id, "Updated POI: {}", poi.name);
        Ok(Some(poi))
    }

    #[instrument(skip(self))]
    async fn delete_poi(&self, game_id: GameId, owner: OwnerId, id: PoiId) -> Result<bool> {
        if !self.owned_game(game_id, owner).await? {
            return Ok(false);
        }

        let deleted = self
            .repository
            .pois()
            .delete(id, game_id)
            .await
            .context("Failed to delete POI from repository")?;

        if deleted {
            info!(poi_id = %id, "Deleted POI");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> PoiRequest {
        PoiRequest {
            name: "Harbor Clock".to_string(),
            description: "The oldest clock in the port district".to_string(),
            contextual_data: "Built in 1882, stopped during the great storm".to_string(),
            image_url: None,
            kind: PoiKind::Landmark,
            tags: vec!["clock".to_string()],
            location: GeoPoint::new(53.54, 9.99),
        }
    }

    #[test]
    fn test_poi_request_validation() {
        assert!(PoiServiceImpl::validate_request(&valid_request()).is_ok());

        let mut request = valid_request();
        request.name = "ab".to_string();
        assert!(PoiServiceImpl::validate_request(&request).is_err());

        let mut request = valid_request();
        request.contextual_data = String::new();
        assert!(PoiServiceImpl::validate_request(&request).is_err());

        let mut request = valid_request();
        request.location = GeoPoint::new(0.0, 200.0);
        assert!(PoiServiceImpl::validate_request(&request).is_err());
    }
}
