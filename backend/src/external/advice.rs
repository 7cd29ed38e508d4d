//! Advice assistant client
//!
//! Integrates with the Google Gemini generateContent API to answer the
//! chat widget's farming questions. The client absorbs every failure
//! mode into a canned reply, so the chat endpoint always has something
//! to say and callers never special-case the assistant being down.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Reply used when no API key is configured; no network call is made.
pub const NOT_CONFIGURED_REPLY: &str = "I'm sorry, but the AI service is not configured. Please contact the administrator to set up the Google Gemini API key.";

/// Reply used when the upstream call fails for any reason, including a
/// timeout or a response that cannot be parsed.
pub const UNAVAILABLE_REPLY: &str = "I'm experiencing some technical difficulties right now. Please try asking your question again in a moment.";

/// Reply used when the upstream answer comes back with no text.
pub const EMPTY_REPLY: &str = "I'm sorry, I couldn't generate a response. Please try again.";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const SYSTEM_INSTRUCTION: &str = "\
You are an expert agricultural advisor and farming consultant. You provide helpful, practical advice on:

- Crop cultivation and farming techniques
- Soil health and fertilization
- Pest and disease management
- Irrigation and water management
- Seasonal planting schedules
- Organic farming practices
- Farm equipment and tools
- Market trends and crop selection
- Sustainable farming practices
- Weather-related farming decisions

Provide clear, actionable advice that farmers can implement. Be encouraging and supportive while being practical and realistic. If the question is not related to farming or agriculture, politely redirect the conversation back to farming topics.";

/// Advice assistant client
#[derive(Clone)]
pub struct AdviceClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
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

impl AdviceClient {
    /// Create a new advice client
    pub fn new(api_key: String, model: String, timeout: Duration) -> Self {
        Self::with_base_url(api_key, model, timeout, DEFAULT_BASE_URL.to_string())
    }

    /// Create a new advice client with custom base URL (for testing)
    pub fn with_base_url(
        api_key: String,
        model: String,
        timeout: Duration,
        base_url: String,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            base_url,
            model,
        }
    }

    /// Answer a farming question.
    ///
    /// Never fails: a missing key skips the network entirely, and a
    /// failed or empty upstream call degrades to a canned reply.
    pub async fn get_farming_advice(&self, question: &str) -> String {
        if self.api_key.is_empty() {
            return NOT_CONFIGURED_REPLY.to_string();
        }

        match self.generate(question).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("Advice request failed: {}", e);
                UNAVAILABLE_REPLY.to_string()
            }
        }
    }

    async fn generate(&self, question: &str) -> Result<String, reqwest::Error> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: question }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: SYSTEM_INSTRUCTION,
                }],
            },
            generation_config: GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 1000,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let data: GenerateContentResponse = response.json().await?;

        Ok(extract_text(data).unwrap_or_else(|| EMPTY_REPLY.to_string()))
    }
}

/// Pull the generated text out of a response, treating whitespace-only
/// answers as absent.
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_candidate_text() {
        let raw = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "Rotate " }, { "text": "your crops." }]
                }
            }]
        });
        let response: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(extract_text(response).as_deref(), Some("Rotate your crops."));
    }

    #[test]
    fn test_empty_response_yields_no_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(extract_text(response), None);
    }

    #[test]
    fn test_whitespace_only_text_counts_as_empty() {
        let raw = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "  \n " }] }
            }]
        });
        let response: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(extract_text(response), None);
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits() {
        let client = AdviceClient::new(
            String::new(),
            "gemini-2.5-flash".to_string(),
            Duration::from_secs(5),
        );
        let reply = client.get_farming_advice("How do I plant corn?").await;
        assert_eq!(reply, NOT_CONFIGURED_REPLY);
    }

    /// A configured key with an unreachable upstream degrades to the
    /// fallback reply, never an error.
    #[tokio::test]
    async fn test_unreachable_upstream_falls_back() {
        let client = AdviceClient::with_base_url(
            "test-key".to_string(),
            "gemini-2.5-flash".to_string(),
            Duration::from_secs(2),
            "http://127.0.0.1:9".to_string(),
        );
        let reply = client.get_farming_advice("How do I plant corn?").await;
        assert_eq!(reply, UNAVAILABLE_REPLY);
    }
}
