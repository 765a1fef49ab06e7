use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use storeseed_admin::ApiConfig;
use storeseed_admin::config::DEFAULT_API_VERSION;

const CONFIG_FILE: &str = "storeseed.toml";
const DEFAULT_DATA_FILE: &str = "shopify_data_new.json";
const DEFAULT_SAVE_FILE: &str = "shopify_data_save_new.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
    #[serde(default)]
    pub files: FilesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub url: String,
    pub access_token: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    #[serde(default = "default_data_file")]
    pub data: PathBuf,
    #[serde(default = "default_save_file")]
    pub save: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            data: default_data_file(),
            save: default_save_file(),
        }
    }
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_save_file() -> PathBuf {
    PathBuf::from(DEFAULT_SAVE_FILE)
}

impl AppConfig {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("storeseed")
            .join(CONFIG_FILE)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).with_context(|| {
            format!(
                "config not found at {} (run `storeseed init` first)",
                path.display()
            )
        })?;
        toml::from_str(&content).context("failed to parse config")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(&self.store.url, &self.store.access_token)
            .with_api_version(&self.store.api_version)
    }
}
