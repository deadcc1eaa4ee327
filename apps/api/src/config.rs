use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Panics at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Directory holding the TTF files for PDF export (regular, bold,
    /// italic, bold-italic). The directory ships without the binaries;
    /// PDF requests fall back to plain text until they are installed.
    pub font_dir: String,
    pub font_family: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            font_dir: std::env::var("FONT_DIR").unwrap_or_else(|_| "assets/fonts".to_string()),
            font_family: std::env::var("FONT_FAMILY").unwrap_or_else(|_| "Roboto".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
