//! Character API routes

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
use crate::application::services::{
    CharacterService, CreateCharacterRequest, UpdateCharacterRequest,
};
use crate::domain::entities::{Character, CharacterCategory};
use crate::domain::value_objects::CharacterId;
use crate::infrastructure::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CharacterBody {
    pub name: String,
    pub summary: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category: CharacterCategory,
}

#[derive(Debug, Serialize)]
pub struct CharacterResponse {
    pub id: String,
    pub game_id: String,
    pub name: String,
    pub summary: String,
    pub image_url: Option<String>,
    pub category: String,
}

impl From<Character> for CharacterResponse {
    fn from(character: Character) -> Self {
        Self {
            id: character.id.to_string(),
            game_id: character.game_id.to_string(),
            name: character.name,
            summary: character.summary,
            image_url: character.image_url,
            category: character.category.as_str().to_string(),
        }
    }
}

fn parse_character_id(id: &str) -> Result<CharacterId, (StatusCode, String)> {
    let uuid = Uuid::parse_str(id)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid character ID".to_string()))?;
    Ok(CharacterId::from_uuid(uuid))
}

/// List characters in a game
pub async fn list_characters(
    State(state): State<Arc<AppState>>,
    AuthUser(owner): AuthUser,
    Path(game_id): Path<String>,
) -> Result<Json<Vec<CharacterResponse>>, (StatusCode, String)> {
    let game_id = parse_game_id(&game_id)?;

    let characters = state
        .character_service
        .list_characters(game_id, owner)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Game not found".to_string()))?;

    Ok(Json(
        characters.into_iter().map(CharacterResponse::from).collect(),
    ))
}

/// Create a character in a game
pub async fn create_character(
    State(state): State<Arc<AppState>>,
    AuthUser(owner): AuthUser,
    Path(game_id): Path<String>,
    Json(body): Json<CharacterBody>,
) -> Result<(StatusCode, Json<CharacterResponse>), (StatusCode, String)> {
    let game_id = parse_game_id(&game_id)?;

    let request = CreateCharacterRequest {
        name: body.name,
        summary: body.summary,
        image_url: body.image_url,
        category: body.category,
    };

    let character = state
        .character_service
        .create_character(game_id, owner, request)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Game not found".to_string()))?;

    Ok((StatusCode::CREATED, Json(CharacterResponse::from(character))))
}

/// Update a character
pub async fn update_character(
    State(state): State<Arc<AppState>>,
    AuthUser(owner): AuthUser,
    Path((game_id, id)): Path<(String, String)>,
    Json(body): Json<CharacterBody>,
) -> Result<Json<CharacterResponse>, (StatusCode, String)> {
    let game_id = parse_game_id(&game_id)?;
    let character_id = parse_character_id(&id)?;

    let request = UpdateCharacterRequest {
        name: body.name,
        summary: body.summary,
        image_url: body.image_url,
        category: body.category,
    };

    let character = state
        .character_service
        .update_character(game_id, owner, character_id, request)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Character not found".to_string()))?;

    Ok(Json(CharacterResponse::from(character)))
}

/// Delete a character
pub async fn delete_character(
    State(state): State<Arc<AppState>>,
    AuthUser(owner): AuthUser,
    Path((game_id, id)): Path<(String, String)>,
) -> Result<StatusCode, (StatusCode, String)> {
    let game_id = parse_game_id(&game_id)?;
    let character_id = parse_character_id(&id)?;

    let deleted = state
        .character_service
        .delete_character(game_id, owner, character_id)
        .await
        .map_err(map_service_error)?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Character not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
