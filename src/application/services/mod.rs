//! Application services - Use case implementations
//!
//! Each service follows hexagonal architecture principles, accepting
//! repository dependencies and returning domain entities or DTOs.

pub mod card_service;
pub mod card_suggestion_service;
pub mod character_service;
pub mod companion_service;
pub mod game_service;
pub mod poi_service;

pub use card_service::{CardRequest, CardService, CardServiceImpl};
pub use card_suggestion_service::{
    CardSuggestionRequest, CardSuggestionService, CardSuggestionServiceImpl,
};
pub use character_service::{
    CharacterService, CharacterServiceImpl, CreateCharacterRequest, UpdateCharacterRequest,
};
pub use companion_service::{CompanionService, CompanionServiceImpl, SaveCompanionRequest};
pub use game_service::{GameService, GameServiceImpl, PublishOutcome, UpdateGeneralInfoRequest};
pub use poi_service::{PoiRequest, PoiService, PoiServiceImpl};
