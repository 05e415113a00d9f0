//! HTTP REST API routes

mod auth;
mod card_routes;
mod character_routes;
mod companion_routes;
mod game_routes;
mod poi_routes;

use axum::http::StatusCode;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::application::error::ValidationError;
use crate::infrastructure::state::AppState;

pub use auth::AuthUser;
pub use card_routes::*;
pub use character_routes::*;
pub use companion_routes::*;
pub use game_routes::*;
pub use poi_routes::*;

/// Map a service error onto an HTTP failure: rejected input answers 400,
/// anything else is a server-side failure.
pub(crate) fn map_service_error(error: anyhow::Error) -> (StatusCode, String) {
    if let Some(validation) = error.downcast_ref::<ValidationError>() {
        (StatusCode::BAD_REQUEST, validation.to_string())
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
    }
}

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Authoring wizard metadata
        .route(
            "/api/authoring/steps",
            get(game_routes::list_authoring_steps),
        )
        // Game routes
        .route("/api/games", get(game_routes::list_games))
        .route("/api/games", post(game_routes::create_game))
        .route("/api/games/{id}", get(game_routes::get_game))
        .route("/api/games/{id}", delete(game_routes::delete_game))
        .route(
            "/api/games/{id}/general",
            put(game_routes::update_general_info),
        )
        .route(
            "/api/games/{id}/readiness",
            get(game_routes::check_readiness),
        )
        .route("/api/games/{id}/publish", post(game_routes::publish_game))
        .route(
            "/api/games/{id}/unpublish",
            post(game_routes::unpublish_game),
        )
        // Character routes
        .route(
            "/api/games/{game_id}/characters",
            get(character_routes::list_characters),
        )
        .route(
            "/api/games/{game_id}/characters",
            post(character_routes::create_character),
        )
        .route(
            "/api/games/{game_id}/characters/{id}",
            put(character_routes::update_character),
        )
        .route(
            "/api/games/{game_id}/characters/{id}",
            delete(character_routes::delete_character),
        )
        // POI routes
        .route("/api/games/{game_id}/pois", get(poi_routes::list_pois))
        .route("/api/games/{game_id}/pois", post(poi_routes::create_poi))
        .route(
            "/api/games/{game_id}/pois/{id}",
            put(poi_routes::update_poi),
        )
        .route(
            "/api/games/{game_id}/pois/{id}",
            delete(poi_routes::delete_poi),
        )
        // Card routes
        .route("/api/games/{game_id}/cards", get(card_routes::list_cards))
        .route("/api/games/{game_id}/cards", post(card_routes::create_card))
        .route(
            "/api/games/{game_id}/cards/generate",
            post(card_routes::suggest_card),
        )
        .route(
            "/api/games/{game_id}/cards/{id}",
            put(card_routes::update_card),
        )
        .route(
            "/api/games/{game_id}/cards/{id}",
            delete(card_routes::delete_card),
        )
        // Companion routes
        .route(
            "/api/games/{game_id}/companion",
            get(companion_routes::get_companion),
        )
        .route(
            "/api/games/{game_id}/companion",
            put(companion_routes::save_companion),
        )
}
