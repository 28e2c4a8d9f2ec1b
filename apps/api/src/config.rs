use anyhow::{Context, Result};

use crate::document::SortDirection;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. Unset means resumes live in memory only.
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// Direction used when a request asks for `sort_value` order without naming one.
    pub default_sort: SortDirection,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            default_sort: parse_default_sort(optional_env("DEFAULT_SORT"))?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: None,
            port: 8080,
            rust_log: "info".to_string(),
            default_sort: SortDirection::Ascending,
        }
    }
}

fn parse_default_sort(raw: Option<String>) -> Result<SortDirection> {
    match raw {
        Some(raw) => raw
            .parse::<SortDirection>()
            .map_err(anyhow::Error::msg)
            .context("DEFAULT_SORT must be 'asc' or 'desc'"),
        None => Ok(SortDirection::default()),
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
