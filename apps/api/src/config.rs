use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::analysis::engine::EngineConfig;

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON skill table replacing the built-in vocabulary.
    pub skill_vocabulary_path: Option<PathBuf>,
    pub required_skill_share_percent: u32,
    pub level_context_window: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required_skill_share_percent: u32 =
            parse_or(&lookup, "REQUIRED_SKILL_SHARE_PERCENT", 60)?;
        if !(1..=100).contains(&required_skill_share_percent) {
            bail!(
                "REQUIRED_SKILL_SHARE_PERCENT must be between 1 and 100, got {required_skill_share_percent}"
            );
        }

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            skill_vocabulary_path: lookup("SKILL_VOCABULARY_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            required_skill_share_percent,
            level_context_window: parse_or(&lookup, "LEVEL_CONTEXT_WINDOW", 50)?,
        })
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            required_share_percent: self.required_skill_share_percent,
            level_context_window: self.level_context_window,
            ..EngineConfig::default()
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
