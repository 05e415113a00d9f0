//! Card Suggestion Service - AI-assisted card authoring
//!
//! Builds a templated prompt from the creator's card settings, asks the
//! generative port for a title/prompt pair and enforces the response shape.
//! One outbound call per suggestion; retries are the caller's concern.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::application::error::ValidationError;
use crate::application::ports::outbound::{CardGeneratorPort, GeneratedCard};
use crate::domain::entities::{CardAudience, CardScope, Poi, PoiKind};
use crate::domain::value_objects::{GameId, HeroJourneyStage, OwnerId, PoiId};
use crate::infrastructure::persistence::PostgresRepository;

/// Hard caps on what the generator may return
pub const MAX_GENERATED_TITLE: usize = 50;
pub const MAX_GENERATED_PROMPT: usize = 300;

/// Request for a generated card suggestion
#[derive(Debug, Clone)]
pub struct CardSuggestionRequest {
    pub kind: PoiKind,
    pub hero_steps: Vec<HeroJourneyStage>,
    pub audience: CardAudience,
    pub scope: CardScope,
    pub keywords: Option<String>,
    pub poi_id: Option<PoiId>,
}

/// Card suggestion service trait
#[async_trait]
pub trait CardSuggestionService: Send + Sync {
    /// Generate a card title and prompt for one of the owner's games
    async fn suggest_card(
        &self,
        game_id: GameId,
        owner: OwnerId,
        request: CardSuggestionRequest,
    ) -> Result<Option<GeneratedCard>>;
}

/// Implementation generic over the generation backend
pub struct CardSuggestionServiceImpl<G: CardGeneratorPort> {
    repository: PostgresRepository,
    generator: G,
}

impl<G: CardGeneratorPort> CardSuggestionServiceImpl<G> {
    pub fn new(repository: PostgresRepository, generator: G) -> Self {
        Self {
            repository,
            generator,
        }
    }
}

const SYSTEM_PROMPT: &str = "You are a specialized content creation assistant for a \
location-based storytelling game platform. Your role is to help game creators write \
compelling card titles and prompts that enhance the player experience.\n\n\
Your expertise includes:\n\
- Understanding the Hero's Journey narrative framework and its stages\n\
- Creating prompts that align with specific journey steps or generalize across multiple steps when needed\n\
- Crafting engaging, concise content that encourages player immersion and interaction with their physical surroundings\n\
- Adapting tone and content based on character types (human, non-human, or both)\n\
- Incorporating location-specific context or general keywords effectively\n\n\
When multiple Hero's Journey steps are selected, you should create prompts that could \
fall into any of those stages naturally, finding common themes that make sense across \
the selected steps. Always prioritize clarity, engagement, and adherence to character \
limits while maintaining narrative coherence.";

fn audience_text(audience: CardAudience) -> &'static str {
    match audience {
        CardAudience::Both => "all characters",
        CardAudience::Human => "human characters only",
        CardAudience::NonHuman => "non-human characters only",
    }
}

/// Assemble the user-side prompt for one suggestion request
fn build_user_prompt(request: &CardSuggestionRequest, poi: Option<&Poi>) -> String {
    let step_details = request
        .hero_steps
        .iter()
        .map(|step| format!("{}: {}", step.label(), step.description()))
        .collect::<Vec<_>>()
        .join("\n");

    let context_info = match (request.scope, poi) {
        (CardScope::PoiSpecific, Some(poi)) => {
            let tags = if poi.tags.is_empty() {
                "N/A".to_string()
            } else {
                poi.tags.join(", ")
            };
            format!(
                "POI Context:\n\
                 - Location Name: {}\n\
                 - Description: {}\n\
                 - Contextual Data: {}\n\
                 - POI Type: {}\n\
                 - Tags: {}\n\n\
                 Please create a card prompt that is specifically tailored to this \
                 location and its unique characteristics.",
                poi.name, poi.description, poi.contextual_data, poi.kind.as_str(), tags
            )
        }
        _ => match request.keywords.as_deref() {
            Some(keywords) if !keywords.trim().is_empty() => format!(
                "Keywords: {keywords}\n\
                 Please incorporate these keywords into the card prompt to guide the \
                 player's experience."
            ),
            _ => String::new(),
        },
    };

    let scope_line = if request.scope == CardScope::PoiSpecific {
        "- Specifically tied to the location"
    } else {
        "- General enough for multiple locations"
    };

    format!(
        "Generate a card prompt for a location-based storytelling game.\n\
         Card Type: {kind}\n\n\
         Hero's Journey Steps with Descriptions:\n\
         {step_details}\n\n\
         Character perspective: {audience}\n\
         {context_info}\n\n\
         STRICT REQUIREMENTS:\n\
         1. Title: Maximum 25 characters (including spaces and punctuation)\n\
         2. Prompt: Maximum 150 characters (including spaces and punctuation)\n\n\
         The prompt should be aligned with the Hero's Journey step(s) and the card type. \
         If more than one step is provided, ensure the prompt encompasses all relevant aspects.\n\
         Must be concise and engaging, encouraging players to immerse themselves in the \
         narrative and interact with their surroundings.\n\
         {scope_line}\n\
         Return ONLY a JSON object with this exact format:\n\
         {{\n\
         \"title\": \"Your title (max 25 chars)\",\n\
         \"prompt\": \"Your prompt (max 150 chars)\"\n\
         }}",
        kind = request.kind.as_str(),
        step_details = step_details,
        audience = audience_text(request.audience),
        context_info = context_info,
        scope_line = scope_line,
    )
}

/// Enforce the response schema the generator was asked to follow
fn validate_generated(card: &GeneratedCard) -> Result<()> {
    if card.title.trim().is_empty() {
        anyhow::bail!("Generated title is empty");
    }
    if card.title.chars().count() > MAX_GENERATED_TITLE {
        anyhow::bail!("Generated title exceeds {MAX_GENERATED_TITLE} characters");
    }
    if card.prompt.trim().is_empty() {
        anyhow::bail!("Generated prompt is empty");
    }
    if card.prompt.chars().count() > MAX_GENERATED_PROMPT {
        anyhow::bail!("Generated prompt exceeds {MAX_GENERATED_PROMPT} characters");
    }
    Ok(())
}

#[async_trait]
impl<G: CardGeneratorPort> CardSuggestionService for CardSuggestionServiceImpl<G> {
    #[instrument(skip(self, request), fields(game_id = %game_id))]
    async fn suggest_card(
        &self,
        game_id: GameId,
        owner: OwnerId,
        request: CardSuggestionRequest,
    ) -> Result<Option<GeneratedCard>> {
        if request.hero_steps.is_empty() {
            return Err(ValidationError::new("Select at least one journey step").into());
        }

        if self.repository.games().get(game_id, owner).await?.is_none() {
            return Ok(None);
        }

        // POI context is best effort: a missing or unfetchable POI falls
        // back to a general prompt rather than blocking the suggestion.
        let poi = match (request.scope, request.poi_id) {
            (CardScope::PoiSpecific, Some(poi_id)) => {
                match self.repository.pois().get(poi_id, game_id).await {
                    Ok(poi) => poi,
                    Err(e) => {
                        warn!(poi_id = %poi_id, "POI fetch failed for card suggestion: {e:#}");
                        None
                    }
                }
            }
            _ => None,
        };

        let user_prompt = build_user_prompt(&request, poi.as_ref());
        debug!(game_id = %game_id, "Requesting card suggestion");

        let card = self
            .generator
            .generate_card(SYSTEM_PROMPT, &user_prompt)
            .await
            .context("Card generation failed")?;

        validate_generated(&card)?;
        Ok(Some(card))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::GeoPoint;

    fn request() -> CardSuggestionRequest {
        CardSuggestionRequest {
            kind: PoiKind::History,
            hero_steps: vec![
                HeroJourneyStage::CallToAdventure,
                HeroJourneyStage::MeetingTheMentor,
            ],
            audience: CardAudience::Both,
            scope: CardScope::General,
            keywords: Some("harbor, fog".to_string()),
            poi_id: None,
        }
    }

    #[test]
    fn test_prompt_lists_selected_stages() {
        let prompt = build_user_prompt(&request(), None);
        assert!(prompt.contains("Card Type: history"));
        assert!(prompt.contains("Call To Adventure: An event or challenge"));
        assert!(prompt.contains("Meeting The Mentor: The hero encounters a wise figure"));
        assert!(!prompt.contains("Change And Return:"));
    }

    #[test]
    fn test_prompt_includes_keywords_for_general_cards() {
        let prompt = build_user_prompt(&request(), None);
        assert!(prompt.contains("Keywords: harbor, fog"));
        assert!(prompt.contains("- General enough for multiple locations"));
    }

    #[test]
    fn test_prompt_includes_poi_context_for_bound_cards() {
        let mut req = request();
        req.scope = CardScope::PoiSpecific;
        let poi = Poi::new(
            GameId::new(),
            "Harbor Clock",
            "The oldest clock in the port district",
            PoiKind::Landmark,
            GeoPoint::new(53.54, 9.99),
        )
        .with_contextual_data("Built in 1882")
        .with_tags(vec!["clock".to_string(), "harbor".to_string()]);

        let prompt = build_user_prompt(&req, Some(&poi));
        assert!(prompt.contains("Location Name: Harbor Clock"));
        assert!(prompt.contains("Contextual Data: Built in 1882"));
        assert!(prompt.contains("Tags: clock, harbor"));
        assert!(prompt.contains("- Specifically tied to the location"));
        assert!(!prompt.contains("Keywords:"));
    }

    #[test]
    fn test_audience_wording() {
        assert_eq!(audience_text(CardAudience::Both), "all characters");
        assert_eq!(audience_text(CardAudience::Human), "human characters only");
        assert_eq!(
            audience_text(CardAudience::NonHuman),
            "non-human characters only"
        );
    }

    #[test]
    fn test_generated_card_length_caps() {
        let ok = GeneratedCard {
            title: "Echoes of the Harbor".to_string(),
            prompt: "Find the oldest stone and read the year aloud.".to_string(),
        };
        assert!(validate_generated(&ok).is_ok());

        let too_long = GeneratedCard {
            title: "x".repeat(MAX_GENERATED_TITLE + 1),
            prompt: "Short enough".to_string(),
        };
        assert!(validate_generated(&too_long).is_err());

        let empty = GeneratedCard {
            title: "Fine".to_string(),
            prompt: "  ".to_string(),
        };
        assert!(validate_generated(&empty).is_err());
    }
}
