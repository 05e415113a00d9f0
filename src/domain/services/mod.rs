//! Domain services - Pure business logic operations

pub mod publish_readiness;

pub use publish_readiness::{evaluate, ReadinessReport, MIN_CARDS, MIN_CHARACTERS, MIN_POIS};
