//! Game API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::auth::AuthUser;
use super::map_service_error;
use crate::application::services::{GameService, PublishOutcome, UpdateGeneralInfoRequest};
use crate::domain::entities::Game;
use crate::domain::services::publish_readiness::ReadinessReport;
use crate::domain::value_objects::{AuthoringStep, GameId, GeoPoint};
use crate::infrastructure::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateGeneralInfoBody {
    pub title: String,
    pub description: String,
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: Option<GeoPoint>,
    pub cover_image_url: Option<String>,
    pub categories: Vec<String>,
    pub status: String,
    pub visibility: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Game> for GameResponse {
    fn from(game: Game) -> Self {
        Self {
            id: game.id.to_string(),
            title: game.title,
            description: game.description,
            location: game.location,
            cover_image_url: game.cover_image_url,
            categories: game.categories,
            status: game.status.as_str().to_string(),
            visibility: game.visibility.as_str().to_string(),
            created_at: game.created_at.to_rfc3339(),
            updated_at: game.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub violations: Vec<String>,
}

impl From<ReadinessReport> for ReadinessResponse {
    fn from(report: ReadinessReport) -> Self {
        Self {
            ready: report.is_ready(),
            violations: report.violations,
        }
    }
}

/// Body returned when a publish attempt fails validation
#[derive(Debug, Serialize)]
pub struct PublishRejection {
    pub error: String,
    #[serde(rename = "validationErrors")]
    pub validation_errors: Vec<String>,
}

pub(super) fn parse_game_id(id: &str) -> Result<GameId, (StatusCode, String)> {
    let uuid = Uuid::parse_str(id)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid game ID".to_string()))?;
    Ok(GameId::from_uuid(uuid))
}

/// Create an empty draft game
pub async fn create_game(
    State(state): State<Arc<AppState>>,
    AuthUser(owner): AuthUser,
) -> Result<(StatusCode, Json<GameResponse>), (StatusCode, String)> {
    let game = state
        .game_service
        .create_game(owner)
        .await
        .map_err(map_service_error)?;

    Ok((StatusCode::CREATED, Json(GameResponse::from(game))))
}

/// List the caller's games
pub async fn list_games(
    State(state): State<Arc<AppState>>,
    AuthUser(owner): AuthUser,
) -> Result<Json<Vec<GameResponse>>, (StatusCode, String)> {
    let games = state
        .game_service
        .list_games(owner)
        .await
        .map_err(map_service_error)?;

    Ok(Json(games.into_iter().map(GameResponse::from).collect()))
}

/// Get one of the caller's games
pub async fn get_game(
    State(state): State<Arc<AppState>>,
    AuthUser(owner): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<GameResponse>, (StatusCode, String)> {
    let game_id = parse_game_id(&id)?;

    let game = state
        .game_service
        .get_game(game_id, owner)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Game not found".to_string()))?;

    Ok(Json(GameResponse::from(game)))
}

/// Update a game's general information
pub async fn update_general_info(
    State(state): State<Arc<AppState>>,
    AuthUser(owner): AuthUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateGeneralInfoBody>,
) -> Result<Json<GameResponse>, (StatusCode, String)> {
    let game_id = parse_game_id(&id)?;

    let request = UpdateGeneralInfoRequest {
        title: body.title,
        description: body.description,
        location: body.location,
        cover_image_url: body.cover_image_url,
        categories: body.categories,
    };

    let game = state
        .game_service
        .update_general_info(game_id, owner, request)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Game not found".to_string()))?;

    Ok(Json(GameResponse::from(game)))
}

/// Delete a game
pub async fn delete_game(
    State(state): State<Arc<AppState>>,
    AuthUser(owner): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let game_id = parse_game_id(&id)?;

    let deleted = state
        .game_service
        .delete_game(game_id, owner)
        .await
        .map_err(map_service_error)?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Game not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Report publish readiness without changing anything.
///
/// The review screen polls this; it and the publish action share the same
/// evaluation, so what the creator sees is exactly what publish enforces.
pub async fn check_readiness(
    State(state): State<Arc<AppState>>,
    AuthUser(owner): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ReadinessResponse>, (StatusCode, String)> {
    let game_id = parse_game_id(&id)?;

    let report = state
        .game_service
        .check_readiness(game_id, owner)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Game not found".to_string()))?;

    Ok(Json(ReadinessResponse::from(report)))
}

/// Publish a game, or answer 400 with the outstanding violations
pub async fn publish_game(
    State(state): State<Arc<AppState>>,
    AuthUser(owner): AuthUser,
    Path(id): Path<String>,
) -> Result<Response, (StatusCode, String)> {
    let game_id = parse_game_id(&id)?;

    let outcome = state
        .game_service
        .publish_game(game_id, owner)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Game not found".to_string()))?;

    match outcome {
        PublishOutcome::Published(game) => Ok(Json(GameResponse::from(game)).into_response()),
        PublishOutcome::NotReady(report) => Ok((
            StatusCode::BAD_REQUEST,
            Json(PublishRejection {
                error: "Validation failed".to_string(),
                validation_errors: report.violations,
            }),
        )
            .into_response()),
    }
}

#[derive(Debug, Serialize)]
pub struct AuthoringStepResponse {
    pub step: AuthoringStep,
    /// The step after this one; the last step hands off to review
    pub next: Option<AuthoringStep>,
}

/// The authoring wizard's step order, for editor navigation
pub async fn list_authoring_steps() -> Json<Vec<AuthoringStepResponse>> {
    Json(
        AuthoringStep::ALL
            .into_iter()
            .map(|step| AuthoringStepResponse {
                step,
                next: step.next(),
            })
            .collect(),
    )
}

/// Return a game to draft/private
pub async fn unpublish_game(
    State(state): State<Arc<AppState>>,
    AuthUser(owner): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<GameResponse>, (StatusCode, String)> {
    let game_id = parse_game_id(&id)?;

    let game = state
        .game_service
        .unpublish_game(game_id, owner)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Game not found".to_string()))?;

    Ok(Json(GameResponse::from(game)))
}
