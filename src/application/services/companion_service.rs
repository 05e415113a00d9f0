//! Companion Service - Application service for the AI companion persona
//!
//! Saving a persona regenerates the derived system prompt that the runtime
//! companion uses, so the stored prompt always reflects the stored fields.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::application::error::{invalid, ValidationError};
use crate::domain::entities::{CompanionConfig, CompanionRole, Personality, Tone};
use crate::domain::value_objects::{GameId, OwnerId};
use crate::infrastructure::persistence::PostgresRepository;

/// Request to save the companion persona for a game
#[derive(Debug, Clone)]
pub struct SaveCompanionRequest {
    pub name: String,
    pub avatar_url: Option<String>,
    pub tone: Tone,
    pub personality: Personality,
    pub relationship: CompanionRole,
    pub humor_level: i16,
    pub formality: i16,
    pub additional_context: Option<String>,
}

/// Companion service trait defining the application use cases
#[async_trait]
pub trait CompanionService: Send + Sync {
    /// Fetch the stored persona, or the default one if none has been saved yet
    async fn get_or_default(
        &self,
        game_id: GameId,
        owner: OwnerId,
    ) -> Result<Option<CompanionConfig>>;

    /// Create or replace the persona, regenerating the system prompt
    async fn save_companion(
        &self,
        game_id: GameId,
        owner: OwnerId,
        request: SaveCompanionRequest,
    ) -> Result<Option<CompanionConfig>>;
}

/// Default implementation of CompanionService using the Postgres repository
pub struct CompanionServiceImpl {
    repository: PostgresRepository,
}

impl CompanionServiceImpl {
    pub fn new(repository: PostgresRepository) -> Self {
        Self { repository }
    }

    fn validate_request(request: &SaveCompanionRequest) -> Result<(), ValidationError> {
        if request.name.trim().is_empty() {
            invalid!("Name is required");
        }
        if request.name.len() > 100 {
            invalid!("Name cannot exceed 100 characters");
        }
        if !(0..=2).contains(&request.humor_level) {
            invalid!("Humor level must be between 0 and 2");
        }
        if !(0..=2).contains(&request.formality) {
            invalid!("Formality must be between 0 and 2");
        }
        if let Some(ref context) = request.additional_context {
            if context.len() > 2000 {
                invalid!("Additional context cannot exceed 2000 characters");
            }
        }
        Ok(())
    }

    /// The persona offered before the creator saves anything
    fn default_persona(game_id: GameId) -> CompanionConfig {
        let mut config = CompanionConfig::new(game_id, "Sage");
        config.tone = Some(Tone::Calm);
        config.personality = Some(Personality::Mentor);
        config.relationship = Some(CompanionRole::Guide);
        config.humor_level = Some(0);
        config.formality = Some(1);
        config
    }

    async fn owned_game(&self, game_id: GameId, owner: OwnerId) -> Result<bool> {
        Ok(self.repository.games().get(game_id, owner).await?.is_some())
    }
}

fn tone_description(tone: Tone) -> &'static str {
    match tone {
        Tone::Enthusiastic => "enthusiastic and energetic",
        Tone::Calm => "calm and measured",
        Tone::Mysterious => "mysterious and enigmatic",
        Tone::Professional => "professional and formal",
        Tone::Playful => "playful and lighthearted",
        Tone::Serious => "serious and thoughtful",
    }
}

fn personality_description(personality: Personality) -> &'static str {
    match personality {
        Personality::Mentor => "a wise mentor who provides guidance and knowledge",
        Personality::Friend => "a supportive friend who accompanies the player",
        Personality::Sage => "an ancient sage with deep wisdom",
        Personality::Explorer => "an adventurous explorer eager to discover",
        Personality::Historian => "a knowledgeable historian sharing stories",
        Personality::Storyteller => "a captivating storyteller weaving narratives",
    }
}

fn relationship_description(relationship: CompanionRole) -> &'static str {
    match relationship {
        CompanionRole::Guide => "You are their guide through this journey",
        CompanionRole::Companion => "You are their trusted companion",
        CompanionRole::Rival => "You are their friendly rival, challenging them",
        CompanionRole::MysteriousAlly => "You are a mysterious ally with hidden knowledge",
    }
}

const HUMOR_LEVELS: [&str; 3] = [
    "serious with no humor",
    "occasional subtle humor",
    "frequent playful humor",
];

const FORMALITY_LEVELS: [&str; 3] = [
    "casual and informal",
    "balanced tone",
    "formal and respectful",
];

/// Render the companion's system prompt from the persona fields
pub fn generate_system_prompt(request: &SaveCompanionRequest) -> String {
    let humor = HUMOR_LEVELS
        .get(request.humor_level as usize)
        .copied()
        .unwrap_or("balanced");
    let formality = FORMALITY_LEVELS
        .get(request.formality as usize)
        .copied()
        .unwrap_or("a balanced tone");

    let additional = match request.additional_context.as_deref() {
        Some(context) if !context.trim().is_empty() => {
            format!("\nAdditional Context:\n{context}\n")
        }
        _ => String::new(),
    };

    format!(
        "You are {name}, {personality}.\n\n\
         Your communication style is {tone}, with {formality}. {relationship}.\n\n\
         Communication Guidelines:\n\
         - Humor level: {humor}\n\
         - Keep responses concise and engaging\n\
         - Adapt to the player's emotional state\n\
         - Reference the game's location, characters, and story when relevant\n\
         - Guide players through their hero's journey with wisdom and encouragement\n\
         {additional}\n\
         Remember: You're part of an immersive location-based storytelling experience. \
         Help players connect with their surroundings and their inner journey.",
        name = request.name,
        personality = personality_description(request.personality),
        tone = tone_description(request.tone),
        formality = formality,
        relationship = relationship_description(request.relationship),
        humor = humor,
        additional = additional,
    )
}

#[async_trait]
impl CompanionService for CompanionServiceImpl {
    #[instrument(skip(self))]
    async fn get_or_default(
        &self,
        game_id: GameId,
        owner: OwnerId,
    ) -> Result<Option<CompanionConfig>> {
        if !self.owned_game(game_id, owner).await? {
            return Ok(None);
        }

        debug!(game_id = %game_id, "Fetching companion config");
        let stored = self
            .repository
            .companions()
            .get_by_game(game_id)
            .await
            .context("Failed to get companion config from repository")?;

        Ok(Some(
            stored.unwrap_or_else(|| Self::default_persona(game_id)),
        ))
    }

    #[instrument(skip(self, request), fields(game_id = %game_id, name = %request.name))]
    async fn save_companion(
        &self,
        game_id: GameId,
        owner: OwnerId,
        request: SaveCompanionRequest,
    ) -> Result<Option<CompanionConfig>> {
        Self::validate_request(&request)?;

        if !self.owned_game(game_id, owner).await? {
            return Ok(None);
        }

        let system_prompt = generate_system_prompt(&request);

        let existing = self
            .repository
            .companions()
            .get_by_game(game_id)
            .await
            .context("Failed to check for an existing companion config")?;

        let mut config = match existing {
            Some(config) => config,
            None => CompanionConfig::new(game_id, request.name.clone()),
        };

        config.name = request.name;
        config.avatar_url = request.avatar_url;
        config.tone = Some(request.tone);
        config.personality = Some(request.personality);
        config.relationship = Some(request.relationship);
        config.humor_level = Some(request.humor_level);
        config.formality = Some(request.formality);
        config.additional_context = request.additional_context;
        config.system_prompt = system_prompt;

        self.repository
            .companions()
            .upsert(&config)
            .await
            .context("Failed to save companion config in repository")?;

        info!(game_id = %game_id, "Saved companion persona: {}", config.name);
        Ok(Some(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> SaveCompanionRequest {
        SaveCompanionRequest {
            name: "Sage".to_string(),
            avatar_url: None,
            tone: Tone::Calm,
            personality: Personality::Mentor,
            relationship: CompanionRole::Guide,
            humor_level: 0,
            formality: 1,
            additional_context: None,
        }
    }

    #[test]
    fn test_request_validation() {
        assert!(CompanionServiceImpl::validate_request(&valid_request()).is_ok());

        let mut request = valid_request();
        request.name = "  ".to_string();
        assert!(CompanionServiceImpl::validate_request(&request).is_err());

        let mut request = valid_request();
        request.humor_level = 3;
        assert!(CompanionServiceImpl::validate_request(&request).is_err());

        let mut request = valid_request();
        request.formality = -1;
        assert!(CompanionServiceImpl::validate_request(&request).is_err());
    }

    #[test]
    fn test_system_prompt_reflects_persona() {
        let prompt = generate_system_prompt(&valid_request());
        assert!(prompt.starts_with(
            "You are Sage, a wise mentor who provides guidance and knowledge."
        ));
        assert!(prompt.contains("calm and measured"));
        assert!(prompt.contains("balanced tone"));
        assert!(prompt.contains("You are their guide through this journey"));
        assert!(prompt.contains("Humor level: serious with no humor"));
        assert!(!prompt.contains("Additional Context:"));
    }

    #[test]
    fn test_system_prompt_includes_additional_context() {
        let mut request = valid_request();
        request.additional_context = Some("The city was founded by sailors.".to_string());
        let prompt = generate_system_prompt(&request);
        assert!(prompt.contains("Additional Context:\nThe city was founded by sailors."));
    }

    #[test]
    fn test_humor_and_formality_extremes() {
        let mut request = valid_request();
        request.humor_level = 2;
        request.formality = 2;
        let prompt = generate_system_prompt(&request);
        assert!(prompt.contains("frequent playful humor"));
        assert!(prompt.contains("formal and respectful"));
    }
}
