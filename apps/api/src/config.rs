use anyhow::{Context, Result};

const DEFAULT_PORT: &str = "8080";
const DEFAULT_MAX_PAGE_LIMIT: &str = "100";
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Application configuration loaded from environment variables.
///
/// `DATABASE_URL` is optional here because `serve --snapshot` runs without a
/// database; commands that need one call [`Config::require_database_url`].
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub max_page_limit: u32,
    pub api_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let max_page_limit = std::env::var("MAX_PAGE_LIMIT")
            .unwrap_or_else(|_| DEFAULT_MAX_PAGE_LIMIT.to_string())
            .parse::<u32>()
            .context("MAX_PAGE_LIMIT must be a positive integer")?;
        if max_page_limit == 0 {
            anyhow::bail!("MAX_PAGE_LIMIT must be at least 1");
        }

        Ok(Config {
            database_url: std::env::var("DATABASE_URL").ok(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_page_limit,
            api_url: std::env::var("OUTREACH_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        })
    }

    pub fn require_database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .context("Required environment variable 'DATABASE_URL' is not set")
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: None,
            port: 8080,
            rust_log: "info".to_string(),
            max_page_limit: 100,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}
