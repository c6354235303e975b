use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Static settings read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(rename = "API_URL")]
    pub api_url: String,
    #[serde(rename = "DATABASE")]
    pub database: String,
    #[serde(rename = "TABLE")]
    pub table: String,
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let mut config: AppConfig =
            serde_json::from_str(text).context("config is not a valid JSON object")?;
        config.api_url = config.api_url.trim().trim_end_matches('/').to_string();

        for (key, value) in [
            ("API_URL", &config.api_url),
            ("DATABASE", &config.database),
            ("TABLE", &config.table),
        ] {
            if value.trim().is_empty() {
                bail!("config key {key} must not be empty");
            }
        }
        Ok(config)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

pub fn load_config(path: &Path) -> Result<AppConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    AppConfig::from_json(&text).with_context(|| format!("invalid config: {}", path.display()))
}

/// Working-directory config first, then the per-user config directory.
pub fn resolve_config_path(working_dir: &Path, user_config_dir: Option<&Path>) -> Option<PathBuf> {
    std::iter::once(working_dir)
        .chain(user_config_dir)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}
