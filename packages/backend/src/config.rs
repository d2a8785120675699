use folio_model::PLACEHOLDER_IMAGE_URL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "folio.config.json";

/// Backend configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendConfig {
    /// URL used for "no image chosen yet" slots.
    #[serde(default = "default_placeholder_image_url")]
    pub placeholder_image_url: String,

    /// Hard cap on draft sections per page.
    #[serde(default = "default_max_sections")]
    pub max_sections_per_page: usize,
}

fn default_placeholder_image_url() -> String {
    PLACEHOLDER_IMAGE_URL.to_string()
}

fn default_max_sections() -> usize {
    40
}

impl BackendConfig {
    /// Load config from a directory, falling back to defaults when no
    /// config file exists.
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: BackendConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(BackendConfig::default())
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            placeholder_image_url: default_placeholder_image_url(),
            max_sections_per_page: default_max_sections(),
        }
    }
}
