//! Game Service - Application service for game lifecycle management
//!
//! This service provides use case implementations for creating, updating,
//! publishing and unpublishing games. Publish eligibility is computed by the
//! domain-level readiness evaluation so every entry point applies the same
//! rule set.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::application::error::{invalid, ValidationError};
use crate::domain::entities::{Card, Character, CompanionConfig, Game, Poi};
use crate::domain::services::publish_readiness::{self, ReadinessReport};
use crate::domain::value_objects::{GameId, GeoPoint, OwnerId};
use crate::infrastructure::persistence::PostgresRepository;

/// Request to update a game's general information
#[derive(Debug, Clone)]
pub struct UpdateGeneralInfoRequest {
    pub title: String,
    pub description: String,
    pub location: Option<GeoPoint>,
    pub cover_image_url: Option<String>,
    pub categories: Vec<String>,
}

/// Result of a publish attempt on an existing game
#[derive(Debug, Clone)]
pub enum PublishOutcome {
    Published(Game),
    NotReady(ReadinessReport),
}

/// Game service trait defining the application use cases
#[async_trait]
pub trait GameService: Send + Sync {
    /// Create an empty draft game for the given owner
    async fn create_game(&self, owner: OwnerId) -> Result<Game>;

    /// Get one of the owner's games
    async fn get_game(&self, id: GameId, owner: OwnerId) -> Result<Option<Game>>;

    /// List the owner's games
    async fn list_games(&self, owner: OwnerId) -> Result<Vec<Game>>;

    /// Update title, description, location, cover image and categories
    async fn update_general_info(
        &self,
        id: GameId,
        owner: OwnerId,
        request: UpdateGeneralInfoRequest,
    ) -> Result<Option<Game>>;

    /// Delete a game and everything in it
    async fn delete_game(&self, id: GameId, owner: OwnerId) -> Result<bool>;

    /// Evaluate readiness without changing anything
    async fn check_readiness(&self, id: GameId, owner: OwnerId)
        -> Result<Option<ReadinessReport>>;

    /// Publish the game if it passes the readiness evaluation
    async fn publish_game(&self, id: GameId, owner: OwnerId) -> Result<Option<PublishOutcome>>;

    /// Return a published game to draft/private. Always permitted.
    async fn unpublish_game(&self, id: GameId, owner: OwnerId) -> Result<Option<Game>>;
}

/// Default implementation of GameService using the Postgres repository
pub struct GameServiceImpl {
    repository: PostgresRepository,
}

impl GameServiceImpl {
    pub fn new(repository: PostgresRepository) -> Self {
        Self { repository }
    }

    /// Validate a general-info update request
    fn validate_general_info(request: &UpdateGeneralInfoRequest) -> Result<(), ValidationError> {
        let title = request.title.trim();
        if title.len() < 3 {
            invalid!("Title is required");
        }
        if title.len() > 100 {
            invalid!("Title cannot exceed 100 characters");
        }
        let description = request.description.trim();
        if description.len() < 3 {
            invalid!("Description is required");
        }
        if description.len() > 1000 {
            invalid!("Description cannot exceed 1000 characters");
        }
        if let Some(location) = request.location {
            if !location.is_valid() {
                invalid!("Location coordinates are out of range");
            }
        }
        Ok(())
    }

    /// Collect the game's related collections for the readiness evaluation.
    ///
    /// A failed fetch is downgraded to an empty collection: the readiness
    /// report then shows the corresponding count violation instead of an
    /// internal error. The failure itself is still visible in the logs.
    async fn load_snapshot(
        &self,
        game: &Game,
    ) -> (Vec<Character>, Vec<Poi>, Vec<Card>, Option<CompanionConfig>) {
        let characters = match self.repository.characters().list_by_game(game.id).await {
            Ok(list) => list,
            Err(e) => {
                warn!(game_id = %game.id, "Character fetch failed during readiness check: {e:#}");
                Vec::new()
            }
        };

        let pois = match self.repository.pois().list_by_game(game.id).await {
            Ok(list) => list,
            Err(e) => {
                warn!(game_id = %game.id, "POI fetch failed during readiness check: {e:#}");
                Vec::new()
            }
        };

        let cards = match self.repository.cards().list_by_game(game.id).await {
            Ok(list) => list,
            Err(e) => {
                warn!(game_id = %game.id, "Card fetch failed during readiness check: {e:#}");
                Vec::new()
            }
        };

        let companion = match self.repository.companions().get_by_game(game.id).await {
            Ok(config) => config,
            Err(e) => {
                warn!(game_id = %game.id, "Companion config fetch failed during readiness check: {e:#}");
                None
            }
        };

        (characters, pois, cards, companion)
    }

    async fn evaluate_game(&self, game: &Game) -> ReadinessReport {
        let (characters, pois, cards, companion) = self.load_snapshot(game).await;
        publish_readiness::evaluate(game, &characters, &pois, &cards, companion.as_ref())
    }
}

#[async_trait]
impl GameService for GameServiceImpl {
    #[instrument(skip(self))]
    async fn create_game(&self, owner: OwnerId) -> Result<Game> {
        let game = Game::new(owner);

        self.repository
            .games()
            .create(&game)
            .await
            .context("Failed to create game in repository")?;

        info!(game_id = %game.id, "Created new draft game");
        Ok(game)
    }

    #[instrument(skip(self))]
    async fn get_game(&self, id: GameId, owner: OwnerId) -> Result<Option<Game>> {
        debug!(game_id = %id, "Fetching game");
        self.repository
            .games()
            .get(id, owner)
            .await
            .context("Failed to get game from repository")
    }

    #[instrument(skip(self))]
    async fn list_games(&self, owner: OwnerId) -> Result<Vec<Game>> {
        debug!("Listing games for owner");
        self.repository
            .games()
            .list_by_owner(owner)
            .await
            .context("Failed to list games from repository")
    }

    #[instrument(skip(self, request), fields(game_id = %id))]
    async fn update_general_info(
        &self,
        id: GameId,
        owner: OwnerId,
        request: UpdateGeneralInfoRequest,
    ) -> Result<Option<Game>> {
        Self::validate_general_info(&request)?;

        let mut game = match self.repository.games().get(id, owner).await? {
            Some(game) => game,
            None => return Ok(None),
        };

        game.update_general_info(
            request.title,
            request.description,
            request.location,
            request.cover_image_url,
            request.categories,
        );

        // The update statement re-checks ownership, so a game that changed
        // hands between the read and the write is treated as not found.
        let updated = self
            .repository
            .games()
            .update_general_info(&game)
            .await
            .context("Failed to update game in repository")?;

        if !updated {
            return Ok(None);
        }

        info!(game_id = %id, "Updated general info: {}", game.title);
        Ok(Some(game))
    }

    #[instrument(skip(self))]
    async fn delete_game(&self, id: GameId, owner: OwnerId) -> Result<bool> {
        let deleted = self
            .repository
            .games()
            .delete(id, owner)
            .await
            .context("Failed to delete game from repository")?;

        if deleted {
            info!(game_id = %id, "Deleted game");
        }
        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn check_readiness(
        &self,
        id: GameId,
        owner: OwnerId,
    ) -> Result<Option<ReadinessReport>> {
        let game = match self.repository.games().get(id, owner).await? {
            Some(game) => game,
            None => return Ok(None),
        };

        Ok(Some(self.evaluate_game(&game).await))
    }

    #[instrument(skip(self))]
    async fn publish_game(&self, id: GameId, owner: OwnerId) -> Result<Option<PublishOutcome>> {
        let mut game = match self.repository.games().get(id, owner).await? {
            Some(game) => game,
            None => return Ok(None),
        };

        let report = self.evaluate_game(&game).await;
        if !report.is_ready() {
            debug!(
                game_id = %id,
                violations = report.violations.len(),
                "Publish rejected by readiness evaluation"
            );
            return Ok(Some(PublishOutcome::NotReady(report)));
        }

        game.publish();

        let updated = self
            .repository
            .games()
            .set_status(id, owner, game.status, game.visibility)
            .await
            .context("Failed to publish game in repository")?;

        if !updated {
            return Ok(None);
        }

        info!(game_id = %id, "Published game: {}", game.title);
        Ok(Some(PublishOutcome::Published(game)))
    }

    #[instrument(skip(self))]
    async fn unpublish_game(&self, id: GameId, owner: OwnerId) -> Result<Option<Game>> {
        let mut game = match self.repository.games().get(id, owner).await? {
            Some(game) => game,
            None => return Ok(None),
        };

        game.unpublish();

        let updated = self
            .repository
            .games()
            .set_status(id, owner, game.status, game.visibility)
            .await
            .context("Failed to unpublish game in repository")?;

        if !updated {
            return Ok(None);
        }

        info!(game_id = %id, "Unpublished game: {}", game.title);
        Ok(Some(game))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_info_validation() {
        // Too-short title should fail
        let request = UpdateGeneralInfoRequest {
            title: "Hi".to_string(),
            description: "A walk through the old town".to_string(),
            location: None,
            cover_image_url: None,
            categories: vec![],
        };
        assert!(GameServiceImpl::validate_general_info(&request).is_err());

        // Valid request should pass
        let request = UpdateGeneralInfoRequest {
            title: "Old Town Mystery".to_string(),
            description: "A walk through the old town".to_string(),
            location: Some(GeoPoint::new(52.52, 13.405)),
            cover_image_url: None,
            categories: vec!["history".to_string()],
        };
        assert!(GameServiceImpl::validate_general_info(&request).is_ok());

        // Out-of-range coordinates should fail
        let request = UpdateGeneralInfoRequest {
            title: "Old Town Mystery".to_string(),
            description: "A walk through the old town".to_string(),
            location: Some(GeoPoint::new(95.0, 13.405)),
            cover_image_url: None,
            categories: vec![],
        };
        assert!(GameServiceImpl::validate_general_info(&request).is_err());
    }

    #[test]
    fn test_general_info_length_caps() {
        let request = UpdateGeneralInfoRequest {
            title: "x".repeat(101),
            description: "A walk through the old town".to_string(),
            location: None,
            cover_image_url: None,
            categories: vec![],
        };
        assert!(GameServiceImpl::validate_general_info(&request).is_err());

        let request = UpdateGeneralInfoRequest {
            title: "Old Town Mystery".to_string(),
            description: "x".repeat(1001),
            location: None,
            cover_image_url: None,
            categories: vec![],
        };
        assert!(GameServiceImpl::validate_general_info(&request).is_err());
    }
}
