use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{NailAideError, Result};

/// Top-level configuration for the NailAide assistant.
///
/// Loaded from `~/.nailaide/config.toml` by default. Every section falls
/// back to its defaults when missing from the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NailAideConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub business: BusinessConfig,
}

impl NailAideConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: NailAideConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| NailAideError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory holding the persisted user context database.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.nailaide/data".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Chat pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Whether the assistant answers messages at all.
    pub enabled: bool,
    /// Maximum number of conversation turns kept in memory.
    pub history_limit: usize,
    /// Persist the user context every N messages.
    pub persist_every: u32,
    /// Maximum FAQ matches considered per question.
    pub max_faq_results: usize,
    /// Maximum accepted message length in characters.
    pub max_message_length: usize,
    /// Fixed seed for template selection. `None` seeds from the OS.
    pub rng_seed: Option<u64>,
    /// Key under which the user context is persisted.
    pub storage_key: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            history_limit: 20,
            persist_every: 5,
            max_faq_results: 3,
            max_message_length: 2000,
            rng_seed: None,
            storage_key: "nailaide_user_context".to_string(),
        }
    }
}

/// Overrides for the salon's contact details.
///
/// Unset fields keep the values shipped with the knowledge store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessConfig {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub booking_url: Option<String>,
}
