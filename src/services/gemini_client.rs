// src/services/gemini_client.rs
// DOCUMENTATION: Gemini generateContent API client
// PURPOSE: Handle communication with the generative model for café analysis

use crate::errors::ApiError;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Model used for every analysis call
const GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Low-randomness sampling chosen to favor well-formed JSON output
const TEMPERATURE: f64 = 0.4;
const TOP_P: f64 = 0.8;

/// Gemini API client
/// DOCUMENTATION: Handles authentication and generateContent calls
pub struct GeminiClient {
    /// HTTP client for making requests
    client: Client,
    /// Gemini API key
    api_key: String,
    /// Base URL for the Generative Language API
    base_url: String,
}

/// Request body for generateContent
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub system_instruction: Content,
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

/// A content block: one or more text parts
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn from_text(text: impl Into<String>) -> Self {
        Content {
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// A single text part
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

/// Fixed sampling configuration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
}

/// Response from generateContent
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One model candidate
#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
}

impl GeminiClient {
    /// Create new Gemini API client
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }

    /// Invoke the model once and return its first text reply
    /// DOCUMENTATION: One non-streaming generateContent round-trip with the
    /// fixed sampling configuration. Any transport failure or malformed
    /// reply becomes a typed enrichment failure, never a silent empty result
    pub async fn generate(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> Result<String, ApiError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, GEMINI_MODEL
        );

        let request = GenerateContentRequest {
            system_instruction: Content::from_text(system_instruction),
            contents: vec![Content::from_text(prompt)],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
            },
        };

        log::debug!("Gemini generateContent call: model={}", GEMINI_MODEL);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                log::error!("Gemini API request failed: {}", e);
                ApiError::EnrichmentFailed(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Gemini API error {}: {}", status, body);
            return Err(ApiError::EnrichmentFailed(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let api_response: GenerateContentResponse = response.json().await.map_err(|e| {
            log::error!("Failed to parse Gemini response: {}", e);
            ApiError::EnrichmentFailed(format!("Parse error: {}", e))
        })?;

        extract_first_text(api_response)
    }
}

/// Extract the first text part of the first candidate
/// Missing candidate or missing part is a malformed reply
pub fn extract_first_text(response: GenerateContentResponse) -> Result<String, ApiError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::EnrichmentFailed("reply has no candidates".to_string()))?;

    let part = candidate
        .content
        .parts
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::EnrichmentFailed("reply has no content parts".to_string()))?;

    Ok(part.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_with_api_field_names() {
        let request = GenerateContentRequest {
            system_instruction: Content::from_text("instruction"),
            contents: vec![Content::from_text("data")],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "instruction");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "data");
        assert_eq!(json["generationConfig"]["temperature"], 0.4);
        assert_eq!(json["generationConfig"]["topP"], 0.8);
    }

    #[test]
    fn test_extract_first_text() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": "[]" }, { "text": "ignored" } ] } }
            ]
        }))
        .unwrap();

        assert_eq!(extract_first_text(response).unwrap(), "[]");
    }

    #[test]
    fn test_extract_fails_without_candidates() {
        let response = GenerateContentResponse::default();
        let err = extract_first_text(response).unwrap_err();
        assert!(matches!(err, ApiError::EnrichmentFailed(_)));
    }

    #[test]
    fn test_extract_fails_without_parts() {
        let response: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({ "candidates": [ {} ] })).unwrap();
        let err = extract_first_text(response).unwrap_err();
        assert!(matches!(err, ApiError::EnrichmentFailed(_)));
    }
}
