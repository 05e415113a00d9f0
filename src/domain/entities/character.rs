//! Character entity - narrative figures a game's cards can draw on

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CharacterId, GameId};

/// Broad casting category for a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterCategory {
    #[serde(rename = "human")]
    Human,
    #[serde(rename = "non-human")]
    NonHuman,
}

impl CharacterCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterCategory::Human => "human",
            CharacterCategory::NonHuman => "non-human",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "human" => Some(CharacterCategory::Human),
            "non-human" => Some(CharacterCategory::NonHuman),
            _ => None,
        }
    }
}

/// A character in a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub game_id: GameId,
    pub name: String,
    pub summary: String,
    /// Portrait image in external storage
    pub image_url: Option<String>,
    pub category: CharacterCategory,
}

impl Character {
    pub fn new(
        game_id: GameId,
        name: impl Into<String>,
        summary: impl Into<String>,
        category: CharacterCategory,
    ) -> Self {
        Self {
            id: CharacterId::new(),
            game_id,
            name: name.into(),
            summary: summary.into(),
            image_url: None,
            category,
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}
