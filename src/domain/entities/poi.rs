//! Point of interest entity - geolocated narrative waypoints

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{GameId, GeoPoint, PoiId};

/// Thematic type shared by POIs and cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoiKind {
    Nature,
    History,
    Sense,
    Action,
    Landmark,
}

impl PoiKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoiKind::Nature => "nature",
            PoiKind::History => "history",
            PoiKind::Sense => "sense",
            PoiKind::Action => "action",
            PoiKind::Landmark => "landmark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "nature" => Some(PoiKind::Nature),
            "history" => Some(PoiKind::History),
            "sense" => Some(PoiKind::Sense),
            "action" => Some(PoiKind::Action),
            "landmark" => Some(PoiKind::Landmark),
            _ => None,
        }
    }
}

/// A geolocated waypoint players visit during a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poi {
    pub id: PoiId,
    pub game_id: GameId,
    pub name: String,
    pub description: String,
    /// Background material the companion can weave into its responses
    pub contextual_data: String,
    pub image_url: Option<String>,
    pub kind: PoiKind,
    pub tags: Vec<String>,
    pub location: GeoPoint,
}

impl Poi {
    pub fn new(
        game_id: GameId,
        name: impl Into<String>,
        description: impl Into<String>,
        kind: PoiKind,
        location: GeoPoint,
    ) -> Self {
        Self {
            id: PoiId::new(),
            game_id,
            name: name.into(),
            description: description.into(),
            contextual_data: String::new(),
            image_url: None,
            kind,
            tags: Vec::new(),
            location,
        }
    }

    pub fn with_contextual_data(mut self, data: impl Into<String>) -> Self {
        self.contextual_data = data.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}
