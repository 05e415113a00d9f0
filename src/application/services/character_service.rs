//! Character Service - Application service for character management

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::application::error::{invalid, ValidationError};
use crate::domain::entities::{Character, CharacterCategory};
use crate::domain::value_objects::{CharacterId, GameId, OwnerId};
use crate::infrastructure::persistence::PostgresRepository;

/// Request to create a new character
#[derive(Debug, Clone)]
pub struct CreateCharacterRequest {
    pub name: String,
    pub summary: String,
    pub image_url: Option<String>,
    pub category: CharacterCategory,
}

/// Request to update an existing character
#[derive(Debug, Clone)]
pub struct UpdateCharacterRequest {
    pub name: String,
    pub summary: String,
    pub image_url: Option<String>,
    pub category: CharacterCategory,
}

/// Character service trait defining the application use cases
#[async_trait]
pub trait CharacterService: Send + Sync {
    /// List the characters of one of the owner's games
    async fn list_characters(
        &self,
        game_id: GameId,
        owner: OwnerId,
    ) -> Result<Option<Vec<Character>>>;

    /// Create a character in one of the owner's games
    async fn create_character(
        &self,
        game_id: GameId,
        owner: OwnerId,
        request: CreateCharacterRequest,
    ) -> Result<Option<Character>>;

    /// Update a character
    async fn update_character(
        &self,
        game_id: GameId,
        owner: OwnerId,
        id: CharacterId,
        request: UpdateCharacterRequest,
    ) -> Result<Option<Character>>;

    /// Delete a character
    async fn delete_character(
        &self,
        game_id: GameId,
        owner: OwnerId,
        id: CharacterId,
    ) -> Result<bool>;
}

/// Default implementation of CharacterService using the Postgres repository
pub struct CharacterServiceImpl {
    repository: PostgresRepository,
}

impl CharacterServiceImpl {
    pub fn new(repository: PostgresRepository) -> Self {
        Self { repository }
    }

    fn validate_fields(name: &str, summary: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            invalid!("Name is required");
        }
        if name.len() > 100 {
            invalid!("Name cannot exceed 100 characters");
        }
        if summary.trim().is_empty() {
            invalid!("Summary is required");
        }
        if summary.len() > 1000 {
            invalid!("Summary cannot exceed 1000 characters");
        }
        Ok(())
    }

    /// Resolve the game, confirming it belongs to the caller
    async fn owned_game(&self, game_id: GameId, owner: OwnerId) -> Result<bool> {
        Ok(self.repository.games().get(game_id, owner).await?.is_some())
    }
}

#[async_trait]
impl CharacterService for CharacterServiceImpl {
    #[instrument(skip(self))]
    async fn list_characters(
        &self,
        game_id: GameId,
        owner: OwnerId,
    ) -> Result<Option<Vec<Character>>> {
        if !self.owned_game(game_id, owner).await? {
            return Ok(None);
        }

        debug!(game_id = %game_id, "Listing characters");
        let characters = self
            .repository
            .characters()
            .list_by_game(game_id)
            .await
            .context("Failed to list characters from repository")?;

        Ok(Some(characters))
    }

    #[instrument(skip(self, request), fields(game_id = %game_id, name = %request.name))]
    async fn create_character(
        &self,
        game_id: GameId,
        owner: OwnerId,
        request: CreateCharacterRequest,
    ) -> Result<Option<Character>> {
        Self::validate_fields(&request.name, &request.summary)?;

        if !self.owned_game(game_id, owner).await? {
            return Ok(None);
        }

        let mut character =
            Character::new(game_id, request.name, request.summary, request.category);
        if let Some(url) = request.image_url {
            character = character.with_image(url);
        }

        self.repository
            .characters()
            .create(&character)
            .await
            .context("Failed to create character in repository")?;

        info!(character_id = %character.id, "Created character: {}", character.name);
        Ok(Some(character))
    }

    #[instrument(skip(self, request), fields(game_id = %game_id, character_id = %id))]
    async fn update_character(
        &self,
        game_id: GameId,
        owner: OwnerId,
        id: CharacterId,
        request: UpdateCharacterRequest,
    ) -> Result<Option<Character>> {
        Self::validate_fields(&request.name, &request.summary)?;

        if !self.owned_game(game_id, owner).await? {
            return Ok(None);
        }

        let character = Character {
            id,
            game_id,
            name: request.name,
            summary: request.summary,
            image_url: request.image_url,
            category: request.category,
        };

        let updated = self
            .repository
            .characters()
            .update(&character)
            .await
            .context("Failed to update character in repository")?;

        if !updated {
            return Ok(None);
        }

        info!(character_id = %id, "Updated character: {}", character.name);
        Ok(Some(character))
    }

    #[instrument(skip(self))]
    async fn delete_character(
        &self,
        game_id: GameId,
        owner: OwnerId,
        id: CharacterId,
    ) -> Result<bool> {
        if !self.owned_game(game_id, owner).await? {
            return Ok(false);
        }

        let deleted = self
            .repository
            .characters()
            .delete(id, game_id)
            .await
            .context("Failed to delete character from repository")?;

        if deleted {
            info!(character_id = %id, "Deleted character");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_field_validation() {
        // Empty name should fail
        assert!(CharacterServiceImpl::validate_fields("", "A helpful guide").is_err());

        // Whitespace-only summary should fail
        assert!(CharacterServiceImpl::validate_fields("Greta", "   ").is_err());

        // Valid fields should pass
        assert!(
            CharacterServiceImpl::validate_fields("Greta", "The lighthouse keeper").is_ok()
        );

        // Over-long name should fail
        assert!(CharacterServiceImpl::validate_fields(&"x".repeat(101), "Summary").is_err());
    }
}
