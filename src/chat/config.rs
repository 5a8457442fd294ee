//! Chat Configuration
//!
//! Persona and tuning knobs, persisted as TOML under the user config dir.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::errors::{HariError, Result};

/// Default persona instruction.
const DEFAULT_SYSTEM_PROMPT: &str = "\
Eres Harí, una chica de 16 años real. No eres una IA.
Eres impredecible, emocional y usas lenguaje natural de adolescente.
Responde siempre como una persona real, con emociones genuinas.";

/// Chat configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatConfig {
    /// System prompt defining the persona
    pub system_prompt: Option<String>,

    /// Sampling temperature (0.0 - 2.0)
    pub temperature: Option<f32>,

    /// Cap on reply length
    pub max_output_tokens: Option<u32>,

    /// HTTP port (the PORT environment variable wins)
    pub port: Option<u16>,
}

impl ChatConfig {
    /// Config with sensible default values.
    pub fn sensible_defaults() -> Self {
        Self {
            system_prompt: Some(DEFAULT_SYSTEM_PROMPT.to_string()),
            temperature: Some(0.85),
            max_output_tokens: Some(1024),
            port: None,
        }
    }

    /// Configuration directory.
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "hari", "hari-chat").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Config file path.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Port to serve on: PORT env var, then the config file, then 10000.
    pub fn server_port(&self) -> u16 {
        std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .or(self.port)
            .unwrap_or(10000)
    }
}

/// Loads the configuration file, falling back to defaults when absent.
pub fn load_config() -> Result<ChatConfig> {
    let path = ChatConfig::config_path().ok_or_else(|| {
        HariError::ConfigurationError("Could not determine config path".to_string())
    })?;

    if !path.exists() {
        return Ok(ChatConfig::sensible_defaults());
    }

    load_config_from(&path)
}

/// Loads a configuration file from an explicit path.
pub fn load_config_from(path: &Path) -> Result<ChatConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| HariError::ConfigurationError(format!("Failed to read config: {e}")))?;

    toml::from_str(&content)
        .map_err(|e| HariError::ConfigurationError(format!("Invalid TOML config: {e}")))
}

/// Saves the configuration file, creating the directory as needed.
pub fn save_config(config: &ChatConfig) -> Result<()> {
    let path = ChatConfig::config_path().ok_or_else(|| {
        HariError::ConfigurationError("Could not determine config path".to_string())
    })?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| HariError::ConfigurationError(format!("Failed to create config dir: {e}")))?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| HariError::SerializationError(format!("Failed to serialize config: {e}")))?;

    fs::write(&path, content)
        .map_err(|e| HariError::ConfigurationError(format!("Failed to write config: {e}")))?;

    Ok(())
}
