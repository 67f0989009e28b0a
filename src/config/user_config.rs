//! User-level configuration for secanalyzer
//!
//! Supports loading config from:
//! - Environment variables
//! - ~/.config/secanalyzer/config.toml

use crate::ai;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const MODEL_ENV: &str = "SECANALYZER_MODEL";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub ai: AiSettings,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AiSettings {
    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Model to use (default: gpt-4o-mini)
    pub model: Option<String>,

    /// Chat-completion endpoint (default: OpenAI)
    pub api_url: Option<String>,

    /// Request timeout in seconds (default: none beyond the HTTP transport's)
    pub timeout_secs: Option<u64>,
}

impl UserConfig {
    /// Load config from all sources, with priority:
    /// 1. Environment variables (highest)
    /// 2. User config (~/.config/secanalyzer/config.toml)
    pub fn load() -> Result<Self> {
        let mut config = Self::user_config_path()
            .filter(|p| p.exists())
            .map(|p| Self::load_file(&p))
            .unwrap_or_default();

        config.apply_env(
            std::env::var(API_KEY_ENV).ok(),
            std::env::var(MODEL_ENV).ok(),
        );

        Ok(config)
    }

    /// Read one TOML file; unreadable or invalid files yield defaults
    pub fn load_file(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match toml::from_str::<UserConfig>(&content) {
            Ok(config) => {
                debug!("Loaded user config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Get the user config directory path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("secanalyzer").join("config.toml"))
    }

    /// Environment values win over file values; blank values are ignored
    fn apply_env(&mut self, api_key: Option<String>, model: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.ai.openai_api_key = Some(key);
        }
        if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
            self.ai.model = Some(model);
        }
    }

    /// Get the OpenAI API key, if configured
    pub fn api_key(&self) -> Option<&str> {
        self.ai
            .openai_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
    }

    /// Check if AI features are available
    pub fn has_ai_key(&self) -> bool {
        self.api_key().is_some()
    }

    /// Client settings for the AI adapter
    pub fn ai_config(&self) -> ai::AiConfig {
        let defaults = ai::AiConfig::default();
        ai::AiConfig {
            model: self.ai.model.clone(),
            api_url: self.ai.api_url.clone(),
            timeout: self.ai.timeout_secs.map(Duration::from_secs),
            ..defaults
        }
    }

    /// Initialize user config directory and create example config.
    ///
    /// Returns the config path and whether a new file was written.
    pub fn init_user_config() -> Result<(PathBuf, bool)> {
        let config_path = Self::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        let created = Self::write_example(&config_path)?;
        Ok((config_path, created))
    }

    /// Write the example config unless a file already exists at `path`
    pub fn write_example(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, EXAMPLE_CONFIG)?;
        Ok(true)
    }
}

const EXAMPLE_CONFIG: &str = r#"# secanalyzer user configuration

[ai]
# Get a key from https://platform.openai.com/api-keys
# The OPENAI_API_KEY environment variable takes priority over this value.
# openai_api_key = "sk-..."

# model = "gpt-4o-mini"
# api_url = "https://api.openai.com/v1/chat/completions"
# Unset means no request timeout beyond the HTTP transport's own.
# timeout_secs = 300
"#;
