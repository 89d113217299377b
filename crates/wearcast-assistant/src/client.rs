//! Chat-completions client for outfit advice.
//!
//! Talks to any OpenAI-compatible endpoint. The model is asked for a JSON
//! object; anything that fails to arrive or parse is an error the caller
//! turns into the local fallback.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{AdviceRequest, Outfit};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const SAMPLING_TEMPERATURE: f64 = 0.7;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("assistant request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("assistant API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("assistant returned an unusable response: {0}")]
    Malformed(String),
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// The JSON object the prompt asks the model to produce.
#[derive(Debug, Clone, Deserialize)]
pub struct AdvicePayload {
    #[serde(default)]
    pub outfits: Vec<Outfit>,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AssistantClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl AssistantClient {
    /// Client against the production endpoint with the default model.
    ///
    /// # Errors
    /// Fails if the underlying HTTP client cannot be constructed.
    pub fn new(api_key: impl Into<String>) -> Result<Self, AssistantError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, DEFAULT_MODEL)
    }

    /// Client against an alternate endpoint/model (tests, proxies).
    ///
    /// # Errors
    /// Fails if the underlying HTTP client cannot be constructed.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, AssistantError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Ask the model for outfit advice.
    ///
    /// # Errors
    /// `Api` on a non-success status, `Malformed` when the reply is not the
    /// JSON object the prompt asked for, `Network` on transport failure.
    pub async fn outfit_advice(&self, request: &AdviceRequest) -> Result<AdvicePayload, AssistantError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: build_prompt(request) }],
            temperature: SAMPLING_TEMPERATURE,
            response_format: ResponseFormat { kind: "json_object" },
        };

        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AssistantError::Api { status: status.as_u16(), message });
        }

        let reply: ChatResponse = response.json().await?;
        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AssistantError::Malformed("no message content".to_string()))?;

        serde_json::from_str(&content)
            .map_err(|e| AssistantError::Malformed(format!("bad advice JSON: {e}")))
    }
}

fn build_prompt(request: &AdviceRequest) -> String {
    let mut prompt = format!(
        "You are a professional outfit advisor. Recommend clothing for these conditions:\n\
         \n\
         - Temperature: {}°C\n\
         - Weather: {}\n\
         - Occasion: {}\n",
        request.temperature,
        request.weather,
        request.scene.description(),
    );
    if !request.preferences.is_empty() {
        prompt.push_str(&format!("- Personal preferences: {}\n", request.preferences.join(", ")));
    }
    if !request.history.is_empty() {
        prompt.push_str(&format!("- Recently worn: {}\n", request.history.join(", ")));
    }
    prompt.push_str(
        "\nReply with a JSON object with these fields:\n\
         - outfits: array of { top, bottom, shoes, accessories }, each an array of garment names\n\
         - reasons: array of strings explaining the choices\n\
         - tips: array of strings with things to watch out for\n",
    );
    prompt
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::scene::Scene;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> AdviceRequest {
        AdviceRequest {
            temperature: 18.0,
            weather: "小雨".to_string(),
            scene: Scene::Work,
            preferences: vec!["muted colors".to_string()],
            history: vec!["oxford shirt".to_string()],
        }
    }

    fn chat_reply(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        })
    }

    #[test]
    fn test_prompt_carries_the_request() {
        let prompt = build_prompt(&request());
        assert!(prompt.contains("18°C"));
        assert!(prompt.contains("小雨"));
        assert!(prompt.contains("the office"));
        assert!(prompt.contains("muted colors"));
        assert!(prompt.contains("oxford shirt"));
    }

    #[test]
    fn test_prompt_omits_empty_sections() {
        let mut req = request();
        req.preferences.clear();
        req.history.clear();
        let prompt = build_prompt(&req);
        assert!(!prompt.contains("Personal preferences"));
        assert!(!prompt.contains("Recently worn"));
    }

    #[tokio::test]
    async fn test_advice_parses_the_model_reply() {
        let server = MockServer::start().await;
        let advice = serde_json::json!({
            "outfits": [{
                "top": ["wool coat"],
                "bottom": ["chinos"],
                "shoes": ["leather boots"],
                "accessories": ["umbrella"]
            }],
            "reasons": ["Cool and rainy calls for layers"],
            "tips": ["Waterproof shoes help"]
        });
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(&advice.to_string())))
            .mount(&server)
            .await;

        let client = AssistantClient::with_base_url("test-key", server.uri(), "test-model").unwrap();
        let payload = client.outfit_advice(&request()).await.unwrap();

        assert_eq!(payload.outfits.len(), 1);
        assert_eq!(payload.outfits[0].top, vec!["wool coat"]);
        assert_eq!(payload.reasons.len(), 1);
        assert_eq!(payload.tips.len(), 1);
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let client = AssistantClient::with_base_url("test-key", server.uri(), "test-model").unwrap();
        let err = client.outfit_advice(&request()).await.unwrap_err();
        assert!(matches!(err, AssistantError::Api { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_non_json_content_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(chat_reply("wear something nice")),
            )
            .mount(&server)
            .await;

        let client = AssistantClient::with_base_url("test-key", server.uri(), "test-model").unwrap();
        let err = client.outfit_advice(&request()).await.unwrap_err();
        assert!(matches!(err, AssistantError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_missing_choices_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": []
            })))
            .mount(&server)
            .await;

        let client = AssistantClient::with_base_url("test-key", server.uri(), "test-model").unwrap();
        let err = client.outfit_advice(&request()).await.unwrap_err();
        assert!(matches!(err, AssistantError::Malformed(_)));
    }
}
