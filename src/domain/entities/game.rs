//! Game entity - the top-level authored experience

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{GameId, GeoPoint, OwnerId};

/// Lifecycle status of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Draft,
    Published,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Draft => "draft",
            GameStatus::Published => "published",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(GameStatus::Draft),
            "published" => Some(GameStatus::Published),
            _ => None,
        }
    }
}

/// Who can see a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    Public,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Public => "public",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "private" => Some(Visibility::Private),
            "public" => Some(Visibility::Public),
            _ => None,
        }
    }
}

/// A location-based storytelling game under construction
///
/// New games start empty: everything except the owner is filled in step by
/// step through the authoring wizard, so title and description may be blank
/// and the anchor location absent while the game is a draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub owner_id: OwnerId,
    pub title: String,
    pub description: String,
    /// Anchor coordinate the game's map is centered on
    pub location: Option<GeoPoint>,
    pub cover_image_url: Option<String>,
    pub categories: Vec<String>,
    pub status: GameStatus,
    pub visibility: Visibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Game {
    /// Create a fresh draft owned by the given creator
    pub fn new(owner_id: OwnerId) -> Self {
        let now = Utc::now();
        Self {
            id: GameId::new(),
            owner_id,
            title: String::new(),
            description: String::new(),
            location: None,
            cover_image_url: None,
            categories: Vec::new(),
            status: GameStatus::Draft,
            visibility: Visibility::Private,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update_general_info(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        location: Option<GeoPoint>,
        cover_image_url: Option<String>,
        categories: Vec<String>,
    ) {
        self.title = title.into();
        self.description = description.into();
        self.location = location;
        self.cover_image_url = cover_image_url;
        self.categories = categories;
        self.updated_at = Utc::now();
    }

    /// Flip to published/public. Callers must gate this on publish readiness.
    pub fn publish(&mut self) {
        self.status = GameStatus::Published;
        self.visibility = Visibility::Public;
        self.updated_at = Utc::now();
    }

    /// Return to draft/private. Always permitted for the owner.
    pub fn unpublish(&mut self) {
        self.status = GameStatus::Draft;
        self.visibility = Visibility::Private;
        self.updated_at = Utc::now();
    }

    pub fn is_published(&self) -> bool {
        self.status == GameStatus::Published
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_is_private_draft() {
        let game = Game::new(OwnerId::new());
        assert_eq!(game.status, GameStatus::Draft);
        assert_eq!(game.visibility, Visibility::Private);
        assert!(game.title.is_empty());
        assert!(game.location.is_none());
    }

    #[test]
    fn test_publish_unpublish_transitions() {
        let mut game = Game::new(OwnerId::new());
        game.publish();
        assert!(game.is_published());
        assert_eq!(game.visibility, Visibility::Public);

        game.unpublish();
        assert!(!game.is_published());
        assert_eq!(game.status, GameStatus::Draft);
        assert_eq!(game.visibility, Visibility::Private);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(GameStatus::parse("draft"), Some(GameStatus::Draft));
        assert_eq!(GameStatus::parse("published"), Some(GameStatus::Published));
        assert_eq!(GameStatus::parse("archived"), None);
    }
}
