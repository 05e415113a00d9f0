//! Gemini client for AI-assisted card authoring

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::application::ports::outbound::{CardGeneratorPort, GeneratedCard};

/// Client for the Gemini generateContent API
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    /// Run a single generateContent call constrained to JSON output
    pub async fn generate_content(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        response_schema: serde_json::Value,
    ) -> Result<String, GeminiError> {
        let request = GenerateContentRequest {
            system_instruction: ContentBlock {
                parts: vec![TextPart {
                    text: system_prompt.to_string(),
                }],
            },
            contents: vec![ContentBlock {
                parts: vec![TextPart {
                    text: user_prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema,
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(GeminiError::ApiError(error_text));
        }

        let body: GenerateContentResponse = response.json().await?;
        extract_text(body)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    #[serde(rename = "system_instruction")]
    system_instruction: ContentBlock,
    contents: Vec<ContentBlock>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct ContentBlock {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
    #[serde(rename = "thinkingConfig")]
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
struct ThinkingConfig {
    #[serde(rename = "thinkingBudget")]
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

fn extract_text(response: GenerateContentResponse) -> Result<String, GeminiError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| GeminiError::InvalidResponse("empty response from model".to_string()))
}

/// JSON schema the model is constrained to for card suggestions
fn card_response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "prompt": { "type": "STRING" }
        },
        "required": ["title", "prompt"]
    })
}

#[async_trait]
impl CardGeneratorPort for GeminiClient {
    async fn generate_card(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<GeneratedCard> {
        let text = self
            .generate_content(system_prompt, user_prompt, card_response_schema())
            .await?;

        let card: GeneratedCard = serde_json::from_str(&text)
            .map_err(|e| GeminiError::InvalidResponse(format!("malformed card JSON: {e}")))?;

        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_takes_first_candidate_part() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "{\"title\":\"T\",\"prompt\":\"P\"}" } ] } }
            ]
        }))
        .unwrap();

        let text = extract_text(response).unwrap();
        let card: GeneratedCard = serde_json::from_str(&text).unwrap();
        assert_eq!(card.title, "T");
        assert_eq!(card.prompt, "P");
    }

    #[test]
    fn test_extract_text_rejects_empty_candidates() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [] })).unwrap();
        assert!(matches!(
            extract_text(response),
            Err(GeminiError::InvalidResponse(_))
        ));
    }
}
