//! Companion config API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::auth::AuthUser;
use super::game_routes::parse_game_id;
use super::map_service_error;
use crate::application::services::{CompanionService, SaveCompanionRequest};
use crate::domain::entities::{CompanionConfig, CompanionRole, Personality, Tone};
use crate::infrastructure::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveCompanionBody {
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub tone: Tone,
    pub personality: Personality,
    pub relationship: CompanionRole,
    pub humor_level: i16,
    pub formality: i16,
    #[serde(default)]
    pub additional_context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CompanionResponse {
    pub id: String,
    pub game_id: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub tone: Option<String>,
    pub personality: Option<String>,
    pub relationship: Option<String>,
    pub humor_level: Option<i16>,
    pub formality: Option<i16>,
    pub additional_context: Option<String>,
    pub system_prompt: String,
}

impl From<CompanionConfig> for CompanionResponse {
    fn from(config: CompanionConfig) -> Self {
        Self {
            id: config.id.to_string(),
            game_id: config.game_id.to_string(),
            name: config.name,
            avatar_url: config.avatar_url,
            tone: config.tone.map(|tone| tone.as_str().to_string()),
            personality: config
                .personality
                .map(|personality| personality.as_str().to_string()),
            relationship: config
                .relationship
                .map(|relationship| relationship.as_str().to_string()),
            humor_level: config.humor_level,
            formality: config.formality,
            additional_context: config.additional_context,
            system_prompt: config.system_prompt,
        }
    }
}

/// Get the game's companion persona (the default one if none is saved yet)
pub async fn get_companion(
    State(state): State<Arc<AppState>>,
    AuthUser(owner): AuthUser,
    Path(game_id): Path<String>,
) -> Result<Json<CompanionResponse>, (StatusCode, String)> {
    let game_id = parse_game_id(&game_id)?;

    let config = state
        .companion_service
        .get_or_default(game_id, owner)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Game not found".to_string()))?;

    Ok(Json(CompanionResponse::from(config)))
}

/// Save the companion persona, regenerating the system prompt
pub async fn save_companion(
    State(state): State<Arc<AppState>>,
    AuthUser(owner): AuthUser,
    Path(game_id): Path<String>,
    Json(body): Json<SaveCompanionBody>,
) -> Result<Json<CompanionResponse>, (StatusCode, String)> {
    let game_id = parse_game_id(&game_id)?;

    let request = SaveCompanionRequest {
        name: body.name,
        avatar_url: body.avatar_url,
        tone: body.tone,
        personality: body.personality,
        relationship: body.relationship,
        humor_level: body.humor_level,
        formality: body.formality,
        additional_context: body.additional_context,
    };

    let config = state
        .companion_service
        .save_companion(game_id, owner, request)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Game not found".to_string()))?;

    Ok(Json(CompanionResponse::from(config)))
}
