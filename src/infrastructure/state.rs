//! Shared application state

use anyhow::Result;

use crate::application::services::{
    CardServiceImpl, CardSuggestionServiceImpl, CharacterServiceImpl, CompanionServiceImpl,
    GameServiceImpl, PoiServiceImpl,
};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::gemini::GeminiClient;
use crate::infrastructure::persistence::PostgresRepository;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    // Application services
    pub game_service: GameServiceImpl,
    pub character_service: CharacterServiceImpl,
    pub poi_service: PoiServiceImpl,
    pub card_service: CardServiceImpl,
    pub companion_service: CompanionServiceImpl,
    pub card_suggestion_service: CardSuggestionServiceImpl<GeminiClient>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        // Initialize the Postgres repository
        let repository =
            PostgresRepository::new(&config.database_url, config.database_max_connections).await?;

        // Initialize the Gemini client
        let gemini_client = GeminiClient::new(
            &config.gemini_base_url,
            &config.gemini_api_key,
            &config.gemini_model,
        );

        // Initialize application services
        let game_service = GameServiceImpl::new(repository.clone());
        let character_service = CharacterServiceImpl::new(repository.clone());
        let poi_service = PoiServiceImpl::new(repository.clone());
        let card_service = CardServiceImpl::new(repository.clone());
        let companion_service = CompanionServiceImpl::new(repository.clone());
        let card_suggestion_service =
            CardSuggestionServiceImpl::new(repository.clone(), gemini_client);

        Ok(Self {
            config,
            game_service,
            character_service,
            poi_service,
            card_service,
            companion_service,
            card_suggestion_service,
        })
    }
}
