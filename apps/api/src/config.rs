use std::str::FromStr;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_API_BASE;
use crate::session::{DEFAULT_IDLE_MINUTES, DEFAULT_MAX_SESSIONS};

/// Application configuration loaded from environment variables.
///
/// Only the numeric settings (`PORT`, `MAX_SESSIONS`, `SESSION_IDLE_MINUTES`)
/// can fail to load. A missing `GEMINI_API_KEY` is not fatal:
/// every AI facade then answers with its fallback value.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    pub youtube_api_key: Option<String>,
    pub port: u16,
    pub max_sessions: usize,
    pub session_idle_minutes: u32,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_api_base: optional_env("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            youtube_api_key: optional_env("YOUTUBE_API_KEY"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            max_sessions: parsed_env("MAX_SESSIONS", DEFAULT_MAX_SESSIONS)?,
            session_idle_minutes: parsed_env("SESSION_IDLE_MINUTES", DEFAULT_IDLE_MINUTES)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Unset and blank are treated alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed_env<T: FromStr>(key: &str, default: T) -> Result<T> {
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .ok()
            .with_context(|| format!("{key} must be a non-negative integer")),
        None => Ok(default),
    }
}
