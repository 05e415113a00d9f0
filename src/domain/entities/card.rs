//! Card entity - narrative prompts tagged with hero's journey stages

use serde::{Deserialize, Serialize};

use super::poi::PoiKind;
use crate::domain::value_objects::{CardId, GameId, HeroJourneyStage, PoiId};

/// Which character categories a card addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardAudience {
    #[serde(rename = "human")]
    Human,
    #[serde(rename = "non-human")]
    NonHuman,
    #[serde(rename = "both")]
    Both,
}

impl CardAudience {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardAudience::Human => "human",
            CardAudience::NonHuman => "non-human",
            CardAudience::Both => "both",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "human" => Some(CardAudience::Human),
            "non-human" => Some(CardAudience::NonHuman),
            "both" => Some(CardAudience::Both),
            _ => None,
        }
    }
}

/// Whether a card applies anywhere or is bound to one POI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardScope {
    General,
    PoiSpecific,
}

impl CardScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardScope::General => "general",
            CardScope::PoiSpecific => "poi_specific",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "general" => Some(CardScope::General),
            "poi_specific" => Some(CardScope::PoiSpecific),
            _ => None,
        }
    }
}

/// A narrative prompt drawn during play
///
/// Cards carry one to six hero's journey stage tags. A published game needs
/// its card deck to cover all six stages between them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub game_id: GameId,
    pub title: String,
    pub prompt: String,
    /// Thematic type, same vocabulary as POIs
    pub kind: PoiKind,
    pub hero_steps: Vec<HeroJourneyStage>,
    pub audience: CardAudience,
    pub scope: CardScope,
    /// Guidance keywords for general cards
    pub keywords: Option<String>,
    /// Bound POI for poi_specific cards
    pub poi_id: Option<PoiId>,
}

impl Card {
    pub fn new(
        game_id: GameId,
        title: impl Into<String>,
        prompt: impl Into<String>,
        kind: PoiKind,
        hero_steps: Vec<HeroJourneyStage>,
        audience: CardAudience,
    ) -> Self {
        Self {
            id: CardId::new(),
            game_id,
            title: title.into(),
            prompt: prompt.into(),
            kind,
            hero_steps,
            audience,
            scope: CardScope::General,
            keywords: None,
            poi_id: None,
        }
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    pub fn bound_to_poi(mut self, poi_id: PoiId) -> Self {
        self.scope = CardScope::PoiSpecific;
        self.poi_id = Some(poi_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_is_general() {
        let card = Card::new(
            GameId::new(),
            "Listen at the gate",
            "Stand at the gate and describe what you hear",
            PoiKind::Sense,
            vec![HeroJourneyStage::CallToAdventure],
            CardAudience::Both,
        )
        .with_keywords("gate, sounds");

        assert_eq!(card.scope, CardScope::General);
        assert_eq!(card.keywords.as_deref(), Some("gate, sounds"));
        assert!(card.poi_id.is_none());
    }

    #[test]
    fn test_binding_to_poi_switches_scope() {
        let poi_id = PoiId::new();
        let card = Card::new(
            GameId::new(),
            "The stopped clock",
            "Ask the clock why it stopped",
            PoiKind::History,
            vec![HeroJourneyStage::MeetingTheMentor],
            CardAudience::NonHuman,
        )
        .bound_to_poi(poi_id);

        assert_eq!(card.scope, CardScope::PoiSpecific);
        assert_eq!(card.poi_id, Some(poi_id));
    }
}
