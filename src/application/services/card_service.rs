//! Card Service - Application service for narrative card management

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::application::error::{invalid, ValidationError};
use crate::domain::entities::{Card, CardAudience, CardScope, PoiKind};
use crate::domain::value_objects::{CardId, GameId, HeroJourneyStage, OwnerId, PoiId};
use crate::infrastructure::persistence::PostgresRepository;

/// Request to create or update a card
#[derive(Debug, Clone)]
pub struct CardRequest {
    pub title: String,
    pub prompt: String,
    pub kind: PoiKind,
    pub hero_steps: Vec<HeroJourneyStage>,
    pub audience: CardAudience,
    pub scope: CardScope,
    pub keywords: Option<String>,
    pub poi_id: Option<PoiId>,
}

/// Card service trait defining the application use cases
#[async_trait]
pub trait CardService: Send + Sync {
    /// List the cards of one of the owner's games
    async fn list_cards(&self, game_id: GameId, owner: OwnerId) -> Result<Option<Vec<Card>>>;

    /// Create a card in one of the owner's games
    async fn create_card(
        &self,
        game_id: GameId,
        owner: OwnerId,
        request: CardRequest,
    ) -> Result<Option<Card>>;

    /// Update a card
    async fn update_card(
        &self,
        game_id: GameId,
        owner: OwnerId,
        id: CardId,
        request: CardRequest,
    ) -> Result<Option<Card>>;

    /// Delete a card
    async fn delete_card(&self, game_id: GameId, owner: OwnerId, id: CardId) -> Result<bool>;
}

/// Default implementation of CardService using the Postgres repository
pub struct CardServiceImpl {
    repository: PostgresRepository,
}

impl CardServiceImpl {
    pub fn new(repository: PostgresRepository) -> Self {
        Self { repository }
    }

    fn validate_request(request: &CardRequest) -> Result<(), ValidationError> {
        let title = request.title.trim();
        if title.len() < 3 {
            invalid!("Title is required");
        }
        if title.len() > 200 {
            invalid!("Title cannot exceed 200 characters");
        }
        let prompt = request.prompt.trim();
        if prompt.len() < 10 {
            invalid!("Prompt must be at least 10 characters");
        }
        if prompt.len() > 2000 {
            invalid!("Prompt cannot exceed 2000 characters");
        }
        if request.hero_steps.is_empty() {
            invalid!("Select at least one journey step");
        }
        if request.scope == CardScope::PoiSpecific && request.poi_id.is_none() {
            invalid!("POI-specific cards must reference a POI");
        }
        Ok(())
    }

    async fn owned_game(&self, game_id: GameId, owner: OwnerId) -> Result<bool> {
        Ok(self.repository.games().get(game_id, owner).await?.is_some())
    }

    fn build_card(game_id: GameId, id: CardId, request: CardRequest) -> Card {
        Card {
            id,
            game_id,
            title: request.title,
            prompt: request.prompt,
            kind: request.kind,
            hero_steps: request.hero_steps,
            audience: request.audience,
            scope: request.scope,
            keywords: request.keywords,
            poi_id: request.poi_id,
        }
    }
}

#[async_trait]
impl CardService for CardServiceImpl {
    #[instrument(skip(self))]
    async fn list_cards(&self, game_id: GameId, owner: OwnerId) -> Result<Option<Vec<Card>>> {
        if !self.owned_game(game_id, owner).await? {
            return Ok(None);
        }

        debug!(game_id = %game_id, "Listing cards");
        let cards = self
            .repository
            .cards()
            .list_by_game(game_id)
            .await
            .context("Failed to list cards from repository")?;

        Ok(Some(cards))
    }

    #[instrument(skip(self, request), fields(game_id = %game_id, title = %request.title))]
    async fn create_card(
        &self,
        game_id: GameId,
        owner: OwnerId,
        request: CardRequest,
    ) -> Result<Option<Card>> {
        Self::validate_request(&request)?;

        if !self.owned_game(game_id, owner).await? {
            return Ok(None);
        }

        let card = Self::build_card(game_id, CardId::new(), request);

        self.repository
            .cards()
            .create(&card)
            .await
            .context("Failed to create card in repository")?;

        info!(card_id = %card.id, "Created card: {}", card.title);
        Ok(Some(card))
    }

    #[instrument(skip(self, request), fields(game_id = %game_id, card_id = %id))]
    async fn update_card(
        &self,
        game_id: GameId,
        owner: OwnerId,
        id: CardId,
        request: CardRequest,
    ) -> Result<Option<Card>> {
        Self::validate_request(&request)?;

        if !self.owned_game(game_id, owner).await? {
            return Ok(None);
        }

        let card = Self::build_card(game_id, id, request);

        let updated = self
            .repository
            .cards()
            .update(&card)
            .await
            .context("Failed to update card in repository")?;

        if !updated {
            return Ok(None);
        }

        info!(card_id = %id, "Updated card: {}", card.title);
        Ok(Some(card))
    }

    #[instrument(skip(self))]
    async fn delete_card(&self, game_id: GameId, owner: OwnerId, id: CardId) -> Result<bool> {
        if !self.owned_game(game_id, owner).await? {
            return Ok(false);
        }

        let deleted = self
            .repository
            .cards()
            .delete(id, game_id)
            .await
            .context("Failed to delete card from repository")?;

        if deleted {
            info!(card_id = %id, "Deleted card");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CardRequest {
        CardRequest {
            title: "Listen at the gate".to_string(),
            prompt: "Stand at the gate and describe what you hear".to_string(),
            kind: PoiKind::Sense,
            hero_steps: vec![HeroJourneyStage::CallToAdventure],
            audience: CardAudience::Both,
            scope: CardScope::General,
            keywords: Some("gate, sounds".to_string()),
            poi_id: None,
        }
    }

    #[test]
    fn test_card_request_validation() {
        assert!(CardServiceImpl::validate_request(&valid_request()).is_ok());

        let mut request = valid_request();
        request.prompt = "Too short".to_string();
        assert!(CardServiceImpl::validate_request(&request).is_err());

        let mut request = valid_request();
        request.hero_steps.clear();
        assert!(CardServiceImpl::validate_request(&request).is_err());
    }

    #[test]
    fn test_poi_specific_card_requires_poi() {
        let mut request = valid_request();
        request.scope = CardScope::PoiSpecific;
        request.poi_id = None;
        assert!(CardServiceImpl::validate_request(&request).is_err());

        request.poi_id = Some(PoiId::new());
        assert!(CardServiceImpl::validate_request(&request).is_ok());
    }
}
