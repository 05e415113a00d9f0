//! POI API routes

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
use crate::application::services::{PoiRequest, PoiService};
use crate::domain::entities::{Poi, PoiKind};
use crate::domain::value_objects::{GeoPoint, PoiId};
use crate::infrastructure::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PoiBody {
    pub name: String,
    pub description: String,
    pub contextual_data: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(rename = "type")]
    pub kind: PoiKind,
    #[serde(default)]
    pub tags: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
pub struct PoiResponse {
    pub id: String,
    pub game_id: String,
    pub name: String,
    pub description: String,
    pub contextual_data: String,
    pub image_url: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub tags: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Poi> for PoiResponse {
    fn from(poi: Poi) -> Self {
        Self {
            id: poi.id.to_string(),
            game_id: poi.game_id.to_string(),
            name: poi.name,
            description: poi.description,
            contextual_data: poi.contextual_data,
            image_url: poi.image_url,
            kind: poi.kind.as_str().to_string(),
            tags: poi.tags,
            latitude: poi.location.lat,
            longitude: poi.location.lng,
        }
    }
}

fn parse_poi_id(id: &str) -> Result<PoiId, (StatusCode, String)> {
    let uuid =
        Uuid::parse_str(id).map_err(|_| (StatusCode::BAD_REQUEST, "Invalid POI ID".to_string()))?;
    Ok(PoiId::from_uuid(uuid))
}

fn body_to_request(body: PoiBody) -> PoiRequest {
    PoiRequest {
        name: body.name,
        description: body.description,
        contextual_data: body.contextual_data,
        image_url: body.image_url,
        kind: body.kind,
        tags: body.tags,
        location: GeoPoint::new(body.latitude, body.longitude),
    }
}

/// List POIs in a game
pub async fn list_pois(
    State(state): State<Arc<AppState>>,
    AuthUser(owner): AuthUser,
    Path(game_id): Path<String>,
) -> Result<Json<Vec<PoiResponse>>, (StatusCode, String)> {
    let game_id = parse_game_id(&game_id)?;

    let pois = state
        .poi_service
        .list_pois(game_id, owner)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Game not found".to_string()))?;

    Ok(Json(pois.into_iter().map(PoiResponse::from).collect()))
}

/// Create a POI in a game
pub async fn create_poi(
    State(state): State<Arc<AppState>>,
    AuthUser(owner): AuthUser,
    Path(game_id): Path<String>,
    Json(body): Json<PoiBody>,
) -> Result<(StatusCode, Json<PoiResponse>), (StatusCode, String)> {
    let game_id = parse_game_id(&game_id)?;

    let poi = state
        .poi_service
        .create_poi(game_id, owner, body_to_request(body))
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Game not found".to_string()))?;

    Ok((StatusCode::CREATED, Json(PoiResponse::from(poi))))
}

/// Update a POI
pub async fn update_poi(
    State(state): State<Arc<AppState>>,
    AuthUser(owner): AuthUser,
    Path((game_id, id)): Path<(String, String)>,
    Json(body): Json<PoiBody>,
) -> Result<Json<PoiResponse>, (StatusCode, String)> {
    let game_id = parse_game_id(&game_id)?;
    let poi_id = parse_poi_id(&id)?;

    let poi = state
        .poi_service
        .update_poi(game_id, owner, poi_id, body_to_request(body))
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "POI not found".to_string()))?;

    Ok(Json(PoiResponse::from(poi)))
}

/// Delete a POI
pub async fn delete_poi(
    State(state): State<Arc<AppState>>,
    AuthUser(owner): AuthUser,
    Path((game_id, id)): Path<(String, String)>,
) -> Result<StatusCode, (StatusCode, String)> {
    let game_id = parse_game_id(&game_id)?;
    let poi_id = parse_poi_id(&id)?;

    let deleted = state
        .poi_service
        .delete_poi(game_id, owner, poi_id)
        .await
        .map_err(map_service_error)?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "POI not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
