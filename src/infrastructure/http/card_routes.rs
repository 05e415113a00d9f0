//! Card API routes, including the AI suggestion endpoint

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::auth::AuthUser;
use super::game_routes::parse_game_id;
use super::map_service_error;
use crate::application::ports::outbound::GeneratedCard;
use crate::application::services::{
    CardRequest, CardService, CardSuggestionRequest, CardSuggestionService,
};
use crate::domain::entities::{Card, CardAudience, CardScope, PoiKind};
use crate::domain::value_objects::{CardId, HeroJourneyStage, PoiId};
use crate::infrastructure::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CardBody {
    pub title: String,
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: PoiKind,
    pub hero_steps: Vec<HeroJourneyStage>,
    pub character_category: CardAudience,
    #[serde(default = "default_scope")]
    pub card_category: CardScope,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub poi_id: Option<Uuid>,
}

fn default_scope() -> CardScope {
    CardScope::General
}

#[derive(Debug, Serialize)]
pub struct CardResponse {
    pub id: String,
    pub game_id: String,
    pub title: String,
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub hero_steps: Vec<HeroJourneyStage>,
    pub character_category: String,
    pub card_category: String,
    pub keywords: Option<String>,
    pub poi_id: Option<String>,
}

impl From<Card> for CardResponse {
    fn from(card: Card) -> Self {
        Self {
            id: card.id.to_string(),
            game_id: card.game_id.to_string(),
            title: card.title,
            prompt: card.prompt,
            kind: card.kind.as_str().to_string(),
            hero_steps: card.hero_steps,
            character_category: card.audience.as_str().to_string(),
            card_category: card.scope.as_str().to_string(),
            keywords: card.keywords,
            poi_id: card.poi_id.map(|id| id.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SuggestCardBody {
    #[serde(rename = "type")]
    pub kind: PoiKind,
    #[serde(rename = "journeySteps")]
    pub journey_steps: Vec<HeroJourneyStage>,
    #[serde(rename = "characterType")]
    pub character_type: CardAudience,
    #[serde(rename = "cardCategory", default = "default_scope")]
    pub card_category: CardScope,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(rename = "poiId", default)]
    pub poi_id: Option<Uuid>,
}

fn parse_card_id(id: &str) -> Result<CardId, (StatusCode, String)> {
    let uuid = Uuid::parse_str(id)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid card ID".to_string()))?;
    Ok(CardId::from_uuid(uuid))
}

fn body_to_request(body: CardBody) -> CardRequest {
    CardRequest {
        title: body.title,
        prompt: body.prompt,
        kind: body.kind,
        hero_steps: body.hero_steps,
        audience: body.character_category,
        scope: body.card_category,
        keywords: body.keywords,
        poi_id: body.poi_id.map(PoiId::from_uuid),
    }
}

/// List cards in a game
pub async fn list_cards(
    State(state): State<Arc<AppState>>,
    AuthUser(owner): AuthUser,
    Path(game_id): Path<String>,
) -> Result<Json<Vec<CardResponse>>, (StatusCode, String)> {
    let game_id = parse_game_id(&game_id)?;

    let cards = state
        .card_service
        .list_cards(game_id, owner)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Game not found".to_string()))?;

    Ok(Json(cards.into_iter().map(CardResponse::from).collect()))
}

/// Create a card in a game
pub async fn create_card(
    State(state): State<Arc<AppState>>,
    AuthUser(owner): AuthUser,
    Path(game_id): Path<String>,
    Json(body): Json<CardBody>,
) -> Result<(StatusCode, Json<CardResponse>), (StatusCode, String)> {
    let game_id = parse_game_id(&game_id)?;

    let card = state
        .card_service
        .create_card(game_id, owner, body_to_request(body))
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Game not found".to_string()))?;

    Ok((StatusCode::CREATED, Json(CardResponse::from(card))))
}

/// Update a card
pub async fn update_card(
    State(state): State<Arc<AppState>>,
    AuthUser(owner): AuthUser,
    Path((game_id, id)): Path<(String, String)>,
    Json(body): Json<CardBody>,
) -> Result<Json<CardResponse>, (StatusCode, String)> {
    let game_id = parse_game_id(&game_id)?;
    let card_id = parse_card_id(&id)?;

    let card = state
        .card_service
        .update_card(game_id, owner, card_id, body_to_request(body))
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Card not found".to_string()))?;

    Ok(Json(CardResponse::from(card)))
}

/// Delete a card
pub async fn delete_card(
    State(state): State<Arc<AppState>>,
    AuthUser(owner): AuthUser,
    Path((game_id, id)): Path<(String, String)>,
) -> Result<StatusCode, (StatusCode, String)> {
    let game_id = parse_game_id(&game_id)?;
    let card_id = parse_card_id(&id)?;

    let deleted = state
        .card_service
        .delete_card(game_id, owner, card_id)
        .await
        .map_err(map_service_error)?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Card not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Generate a card title and prompt with the AI assistant
pub async fn suggest_card(
    State(state): State<Arc<AppState>>,
    AuthUser(owner): AuthUser,
    Path(game_id): Path<String>,
    Json(body): Json<SuggestCardBody>,
) -> Result<Json<GeneratedCard>, (StatusCode, String)> {
    let game_id = parse_game_id(&game_id)?;

    let request = CardSuggestionRequest {
        kind: body.kind,
        hero_steps: body.journey_steps,
        audience: body.character_type,
        scope: body.card_category,
        keywords: body.keywords,
        poi_id: body.poi_id.map(PoiId::from_uuid),
    };

    let card = state
        .card_suggestion_service
        .suggest_card(game_id, owner, request)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Game not found".to_string()))?;

    Ok(Json(card))
}
