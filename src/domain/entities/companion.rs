//! AI companion configuration - the persona players talk to in-game

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CompanionConfigId, GameId};

/// Voice the companion speaks with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Enthusiastic,
    Calm,
    Mysterious,
    Professional,
    Playful,
    Serious,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Enthusiastic => "enthusiastic",
            Tone::Calm => "calm",
            Tone::Mysterious => "mysterious",
            Tone::Professional => "professional",
            Tone::Playful => "playful",
            Tone::Serious => "serious",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "enthusiastic" => Some(Tone::Enthusiastic),
            "calm" => Some(Tone::Calm),
            "mysterious" => Some(Tone::Mysterious),
            "professional" => Some(Tone::Professional),
            "playful" => Some(Tone::Playful),
            "serious" => Some(Tone::Serious),
            _ => None,
        }
    }
}

/// Character the companion plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    Mentor,
    Friend,
    Sage,
    Explorer,
    Historian,
    Storyteller,
}

impl Personality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Personality::Mentor => "mentor",
            Personality::Friend => "friend",
            Personality::Sage => "sage",
            Personality::Explorer => "explorer",
            Personality::Historian => "historian",
            Personality::Storyteller => "storyteller",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "mentor" => Some(Personality::Mentor),
            "friend" => Some(Personality::Friend),
            "sage" => Some(Personality::Sage),
            "explorer" => Some(Personality::Explorer),
            "historian" => Some(Personality::Historian),
            "storyteller" => Some(Personality::Storyteller),
            _ => None,
        }
    }
}

/// How the companion relates to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanionRole {
    #[serde(rename = "guide")]
    Guide,
    #[serde(rename = "companion")]
    Companion,
    #[serde(rename = "rival")]
    Rival,
    #[serde(rename = "mysterious-ally")]
    MysteriousAlly,
}

impl CompanionRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanionRole::Guide => "guide",
            CompanionRole::Companion => "companion",
            CompanionRole::Rival => "rival",
            CompanionRole::MysteriousAlly => "mysterious-ally",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "guide" => Some(CompanionRole::Guide),
            "companion" => Some(CompanionRole::Companion),
            "rival" => Some(CompanionRole::Rival),
            "mysterious-ally" => Some(CompanionRole::MysteriousAlly),
            _ => None,
        }
    }
}

/// Persona configuration for a game's AI companion
///
/// At most one per game. Persona fields are optional in storage: a config
/// row may exist with gaps while the creator is still working through the
/// wizard, and the publish-readiness check reports each gap separately.
/// `humor_level` and `formality` range over 0..=2 where 0 is a deliberate
/// choice, not an absent value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanionConfig {
    pub id: CompanionConfigId,
    pub game_id: GameId,
    pub name: String,
    pub avatar_url: Option<String>,
    pub tone: Option<Tone>,
    pub personality: Option<Personality>,
    pub relationship: Option<CompanionRole>,
    pub humor_level: Option<i16>,
    pub formality: Option<i16>,
    pub additional_context: Option<String>,
    /// Derived system prompt, regenerated whenever the persona is saved
    pub system_prompt: String,
}

impl CompanionConfig {
    pub fn new(game_id: GameId, name: impl Into<String>) -> Self {
        Self {
            id: CompanionConfigId::new(),
            game_id,
            name: name.into(),
            avatar_url: None,
            tone: None,
            personality: None,
            relationship: None,
            humor_level: None,
            formality: None,
            additional_context: None,
            system_prompt: String::new(),
        }
    }
}
