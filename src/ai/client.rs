//! Chat-completion client for OpenAI-compatible endpoints
//!
//! Uses ureq (sync HTTP) — no async runtime needed. One call, one request:
//! no retries and no request de-duplication.

use crate::ai::{message_or_fallback, AiError, AiResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub model: Option<String>,
    pub api_url: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Whole-request timeout; `None` leaves the transport default in place
    pub timeout: Option<Duration>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: None,
            api_url: None,
            max_tokens: 1000,
            temperature: 0.3,
            timeout: None,
        }
    }
}

impl AiConfig {
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }
}

/// Chat-completion client — sync HTTP via ureq
pub struct AiClient {
    config: AiConfig,
    api_key: String,
    agent: ureq::Agent,
}

fn make_agent(timeout: Option<Duration>) -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false) // status codes are mapped to AiError::ApiError below
        .timeout_global(timeout)
        .build()
        .new_agent()
}

impl AiClient {
    /// Create a client; a missing or blank key fails before any I/O
    pub fn new(config: AiConfig, api_key: impl Into<String>) -> AiResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AiError::NotConfigured);
        }
        let agent = make_agent(config.timeout);
        Ok(Self {
            config,
            api_key,
            agent,
        })
    }

    /// Like [`AiClient::new`], treating `None` as not configured
    pub fn from_key(config: AiConfig, api_key: Option<&str>) -> AiResult<Self> {
        Self::new(config, api_key.ok_or(AiError::NotConfigured)?)
    }

    pub fn model(&self) -> &str {
        self.config.model()
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Send one chat completion and return the first choice's text.
    ///
    /// A choice with null content yields an empty string.
    pub fn generate(&self, messages: Vec<Message>) -> AiResult<String> {
        let body = OpenAiRequest {
            model: self.config.model().to_string(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("POST {} (model {})", self.config.api_url(), body.model);

        let response = self
            .agent
            .post(self.config.api_url())
            .header("Content-Type", "application/json")
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(&body)
            .map_err(|e| AiError::RequestFailed(message_or_fallback(e.to_string())))?;

        let status = response.status().as_u16();
        if status >= 400 {
            let error_text = response.into_body().read_to_string().unwrap_or_default();
            return Err(AiError::ApiError {
                status,
                message: message_or_fallback(api_error_message(&error_text)),
            });
        }

        let resp: OpenAiResponse = response
            .into_body()
            .read_json()
            .map_err(|e| AiError::ParseError(message_or_fallback(e.to_string())))?;

        resp.choices
            .into_iter()
            .next()
            .map(|c| c.message.content.unwrap_or_default())
            .ok_or_else(|| AiError::ParseError("No response choices".to_string()))
    }
}

/// Pull `error.message` out of an OpenAI error body, else return the raw text
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<OpenAiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

// OpenAI API types
#[derive(Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiErrorBody {
    error: OpenAiErrorDetail,
}

#[derive(Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.model(), "gpt-4o-mini");
        assert_eq!(config.api_url(), DEFAULT_API_URL);
        assert_eq!(config.max_tokens, 1000);
        assert!((config.temperature - 0.3).abs() < f32::EPSILON);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_config_model_override() {
        let config = AiConfig {
            model: Some("custom-model".to_string()),
            ..Default::default()
        };
        assert_eq!(config.model(), "custom-model");
    }

    #[test]
    fn test_blank_key_is_not_configured() {
        assert!(matches!(
            AiClient::new(AiConfig::default(), ""),
            Err(AiError::NotConfigured)
        ));
        assert!(matches!(
            AiClient::new(AiConfig::default(), "   "),
            Err(AiError::NotConfigured)
        ));
        assert!(matches!(
            AiClient::from_key(AiConfig::default(), None),
            Err(AiError::NotConfigured)
        ));
        assert!(AiClient::new(AiConfig::default(), "sk-test").is_ok());
    }

    #[test]
    fn test_request_body_shape() {
        let body = OpenAiRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![Message::system("sys"), Message::user("code")],
            max_tokens: 1000,
            temperature: 0.3,
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["messages"][0]["role"], "system");
        assert_eq!(v["messages"][1]["role"], "user");
        assert_eq!(v["max_tokens"], 1000);
    }

    #[test]
    fn test_api_error_message_extraction() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert_eq!(api_error_message(body), "Incorrect API key provided");
        assert_eq!(api_error_message("Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn test_null_content_deserializes() {
        let resp: OpenAiResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#)
                .unwrap();
        assert!(resp.choices[0].message.content.is_none());
    }
}
