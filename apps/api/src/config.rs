use anyhow::{Context, Result};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Application configuration loaded from environment variables.
/// Only malformed values fail startup; a missing API key is tolerated until first use.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let max_upload_mb = std::env::var("MAX_UPLOAD_MB")
            .unwrap_or_else(|_| "20".to_string())
            .parse::<usize>()
            .context("MAX_UPLOAD_MB must be a whole number of megabytes")?;

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_base_url: optional_env("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            max_upload_bytes: max_upload_mb * 1024 * 1024,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
