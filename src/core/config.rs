//! Environment-backed configuration
//!
//! The API key is intentionally absent: it is typed in once per session and
//! never read from the environment.

use anyhow::Result;
use std::env;

use crate::features::generation::{GenerationSettings, DEFAULT_BASE_URL, DEFAULT_MODEL};

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_model: String,
    pub openai_base_url: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let openai_base_url = get("OPENAI_BASE_URL", DEFAULT_BASE_URL);
        if !openai_base_url.starts_with("http://") && !openai_base_url.starts_with("https://") {
            anyhow::bail!("OPENAI_BASE_URL must be an http(s) URL, got '{openai_base_url}'");
        }

        Ok(Config {
            openai_model: get("SKILLQUEST_MODEL", DEFAULT_MODEL),
            openai_base_url,
            log_level: get("LOG_LEVEL", "info"),
        })
    }

    /// Request parameters; temperature and max tokens are fixed
    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            model: self.openai_model.clone(),
            ..GenerationSettings::default()
        }
    }
}
