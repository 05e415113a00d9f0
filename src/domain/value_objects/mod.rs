//! Value objects - Immutable domain types without identity

mod authoring_step;
mod geo;
mod hero_journey;
mod ids;

pub use authoring_step::AuthoringStep;
pub use geo::GeoPoint;
pub use hero_journey::HeroJourneyStage;
pub use ids::{CardId, CharacterId, CompanionConfigId, GameId, OwnerId, PoiId};
