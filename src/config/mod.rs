//! Configuration module for secanalyzer
//!
//! This module handles:
//! - User-level configuration (~/.config/secanalyzer/config.toml)
//! - Environment overrides for the AI adapter

mod user_config;

pub use user_config::{AiSettings, UserConfig, API_KEY_ENV, MODEL_ENV};
