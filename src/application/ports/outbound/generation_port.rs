//! Generative-AI port - Interface for card content generation
//!
//! The application asks an external model for a card title and prompt; the
//! infrastructure layer decides which provider answers.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Structured content returned by the generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedCard {
    pub title: String,
    pub prompt: String,
}

/// Port for generating card content from a templated prompt
#[async_trait]
pub trait CardGeneratorPort: Send + Sync {
    /// Run a single generation call and parse the structured response.
    ///
    /// Implementations request JSON output constrained to the
    /// [`GeneratedCard`] shape; no retry or streaming is expected here.
    async fn generate_card(&self, system_prompt: &str, user_prompt: &str)
        -> Result<GeneratedCard>;
}
