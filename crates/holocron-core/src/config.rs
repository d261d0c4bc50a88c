use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::host::HostPage;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: Option<String>,
    /// Search endpoint, relative to `base_url` or absolute.
    pub endpoint: Option<String>,
    pub show_hero: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            base_url: Some(DEFAULT_BASE_URL.to_string()),
            endpoint: None,
            show_hero: Some(true),
        }
    }

    /// Loads the user config, then applies `HOLOCRON_BASE_URL` and
    /// `HOLOCRON_ENDPOINT` from the environment.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::get_config_path()?)?;
        config.apply_env(
            std::env::var("HOLOCRON_BASE_URL").ok(),
            std::env::var("HOLOCRON_ENDPOINT").ok(),
        );
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    fn apply_env(&mut self, base_url: Option<String>, endpoint: Option<String>) {
        if let Some(base_url) = base_url.filter(|v| !v.is_empty()) {
            self.base_url = Some(base_url);
        }
        if let Some(endpoint) = endpoint.filter(|v| !v.is_empty()) {
            self.endpoint = Some(endpoint);
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn show_hero(&self) -> bool {
        self.show_hero.unwrap_or(true)
    }

    /// The terminal host always carries the chat section.
    pub fn host_page(&self) -> HostPage {
        HostPage::complete(self.endpoint.clone(), self.show_hero())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("holocron").join("config.json"))
    }
}
