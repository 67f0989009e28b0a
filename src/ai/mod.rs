//! AI-assisted security review
//!
//! Sends source text to an OpenAI-compatible chat-completion endpoint and
//! turns the model's line-oriented answer into regular [`Finding`]s, so the
//! results can be appended to the local rule findings.
//!
//! The API key is always passed in explicitly; this module never reads the
//! environment or config files. See [`crate::config::UserConfig`] for that.
//!
//! # Example
//!
//! ```rust,ignore
//! use secanalyzer::ai::{AiAnalyzer, AiClient, AiConfig};
//!
//! let client = AiClient::new(AiConfig::default(), api_key)?;
//! let findings = AiAnalyzer::new(client).analyze_code(&source)?;
//! ```
//!
//! [`Finding`]: crate::models::Finding

mod analyzer;
mod client;
mod prompts;

pub use analyzer::{parse_response, AiAnalyzer, AI_RULE_ID};
pub use client::{AiClient, AiConfig, Message, Role, DEFAULT_API_URL, DEFAULT_MODEL};
pub use prompts::{build_user_prompt, SYSTEM_PROMPT, USER_PROMPT_PREFIX};

use thiserror::Error;

/// Message used when a failure carries no text of its own
pub const GENERIC_FAILURE: &str = "AI analysis failed";

/// Errors that can occur in the AI module
#[derive(Error, Debug)]
pub enum AiError {
    #[error("OpenAI API key not configured. Set OPENAI_API_KEY or run `secanalyzer init`")]
    NotConfigured,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse API response: {0}")]
    ParseError(String),
}

impl AiError {
    /// Configuration problems need user action; retrying will not help
    pub fn is_config_error(&self) -> bool {
        matches!(self, AiError::NotConfigured)
    }
}

pub type AiResult<T> = Result<T, AiError>;

/// Fall back to [`GENERIC_FAILURE`] when an underlying message is blank
pub(crate) fn message_or_fallback(message: impl Into<String>) -> String {
    let message = message.into();
    if message.trim().is_empty() {
        GENERIC_FAILURE.to_string()
    } else {
        message
    }
}
