use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Runtime configuration, read from a JSON file (default `.config.json`).
#[derive(Deserialize, Clone)]
pub struct Config {
    /// iCalendar feed URLs included in the day listing. May be empty for
    /// task-only use.
    #[serde(rename = "CALENDAR_URLS", default)]
    pub calendar_urls: Vec<String>,

    #[serde(rename = "NOTION_API_KEY")]
    pub api_key: String,

    #[serde(rename = "NOTION_DATABASE_ID")]
    pub database_id: String,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }
}
