//! Configuration types.

use std::path::PathBuf;

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Agent name for identification.
    pub name: String,
    /// Directory where export artifacts are written.
    pub export_dir: PathBuf,
    /// Directory holding the managed secrets file.
    pub config_dir: PathBuf,
    /// Model used by the generation hook.
    pub model: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        Self {
            name: "dmo-assist".to_string(),
            export_dir: PathBuf::from("."),
            config_dir: PathBuf::from(home).join(".dmo-assist"),
            model: "gemini-pro".to_string(),
        }
    }
}

impl AgentConfig {
    /// Build configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var("DMO_ASSIST_EXPORT_DIR") {
            config.export_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var("DMO_ASSIST_CONFIG_DIR") {
            config.config_dir = PathBuf::from(dir);
        }
        if let Ok(model) = std::env::var("DMO_ASSIST_MODEL") {
            config.model = model;
        }
        config
    }
}
