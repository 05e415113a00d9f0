//! Hero's journey stages - the fixed narrative arc cards are tagged with

use serde::{Deserialize, Serialize};

/// One of the six narrative-arc phases a card can represent.
///
/// A published game must have cards collectively covering all six.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeroJourneyStage {
    CallToAdventure,
    CrossingTheThreshold,
    MeetingTheMentor,
    TrialsAndGrowth,
    DeathAndTransformation,
    ChangeAndReturn,
}

impl HeroJourneyStage {
    /// Every stage, in narrative order
    pub const ALL: [HeroJourneyStage; 6] = [
        HeroJourneyStage::CallToAdventure,
        HeroJourneyStage::CrossingTheThreshold,
        HeroJourneyStage::MeetingTheMentor,
        HeroJourneyStage::TrialsAndGrowth,
        HeroJourneyStage::DeathAndTransformation,
        HeroJourneyStage::ChangeAndReturn,
    ];

    /// Wire/storage name (snake_case, matches the serde representation)
    pub fn as_str(&self) -> &'static str {
        match self {
            HeroJourneyStage::CallToAdventure => "call_to_adventure",
            HeroJourneyStage::CrossingTheThreshold => "crossing_the_threshold",
            HeroJourneyStage::MeetingTheMentor => "meeting_the_mentor",
            HeroJourneyStage::TrialsAndGrowth => "trials_and_growth",
            HeroJourneyStage::DeathAndTransformation => "death_and_transformation",
            HeroJourneyStage::ChangeAndReturn => "change_and_return",
        }
    }

    /// Parse a stored stage name. Unknown values yield `None` so that
    /// row mapping can skip them instead of failing the whole fetch.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "call_to_adventure" => Some(HeroJourneyStage::CallToAdventure),
            "crossing_the_threshold" => Some(HeroJourneyStage::CrossingTheThreshold),
            "meeting_the_mentor" => Some(HeroJourneyStage::MeetingTheMentor),
            "trials_and_growth" => Some(HeroJourneyStage::TrialsAndGrowth),
            "death_and_transformation" => Some(HeroJourneyStage::DeathAndTransformation),
            "change_and_return" => Some(HeroJourneyStage::ChangeAndReturn),
            _ => None,
        }
    }

    /// Human-readable label, e.g. "Call To Adventure"
    pub fn label(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Prompt-side description of the stage, used when generating card content
    pub fn description(&self) -> &'static str {
        match self {
            HeroJourneyStage::CallToAdventure => {
                "An event or challenge that disrupts the ordinary world and invites the hero to embark on a journey."
            }
            HeroJourneyStage::CrossingTheThreshold => {
                "The hero commits to the adventure and enters the special world, leaving the familiar behind."
            }
            HeroJourneyStage::MeetingTheMentor => {
                "The hero encounters a wise figure who provides guidance, training, or magical gifts for the journey ahead."
            }
            HeroJourneyStage::TrialsAndGrowth => {
                "The hero faces challenges, makes friends, identifies foes, and grows through experiences while learning the rules of the special world."
            }
            HeroJourneyStage::DeathAndTransformation => {
                "The hero faces their greatest fear or most difficult challenge, often a life-or-death moment that leads to profound transformation or rebirth."
            }
            HeroJourneyStage::ChangeAndReturn => {
                "The hero returns to the ordinary world transformed, bringing newfound wisdom, treasure, or the power to help others."
            }
        }
    }
}

impl std::fmt::Display for HeroJourneyStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_stage() {
        for stage in HeroJourneyStage::ALL {
            assert_eq!(HeroJourneyStage::parse(stage.as_str()), Some(stage));
        }
    }

    #[test]
    fn test_parse_skips_unknown_values() {
        assert_eq!(HeroJourneyStage::parse("refusal_of_the_call"), None);
        assert_eq!(HeroJourneyStage::parse(""), None);
    }

    #[test]
    fn test_label() {
        assert_eq!(
            HeroJourneyStage::CallToAdventure.label(),
            "Call To Adventure"
        );
        assert_eq!(
            HeroJourneyStage::DeathAndTransformation.label(),
            "Death And Transformation"
        );
    }
}
