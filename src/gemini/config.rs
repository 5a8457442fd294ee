//! Google Gemini configuration

use std::env;

use crate::errors::{HariError, Result};

/// Model used when GEMINI_MODEL is not set.
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Google Gemini configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for Google AI
    pub api_key: String,
    /// Model to use
    pub model: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Maximum number of retries
    pub max_retries: u32,
    /// Rate limit in requests per minute
    pub rate_limit_rpm: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            timeout_seconds: 30,
            max_retries: 3,
            rate_limit_rpm: 60,
        }
    }
}

impl GeminiConfig {
    /// Creates configuration from environment variables.
    ///
    /// A missing `GEMINI_API_KEY` is a startup error: the process must not
    /// come up without a credential for the collaborator.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| HariError::ConfigurationError("GEMINI_API_KEY not set".to_string()))?;

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let timeout_seconds = env::var("GEMINI_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| {
                HariError::ConfigurationError("Invalid GEMINI_TIMEOUT_SECONDS".to_string())
            })?;

        let max_retries = env::var("GEMINI_MAX_RETRIES")
            .unwrap_or_else(|_| "3".to_string())
            .parse()
            .map_err(|_| HariError::ConfigurationError("Invalid GEMINI_MAX_RETRIES".to_string()))?;

        let rate_limit_rpm = env::var("GEMINI_RATE_LIMIT_RPM")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .map_err(|_| {
                HariError::ConfigurationError("Invalid GEMINI_RATE_LIMIT_RPM".to_string())
            })?;

        Ok(Self {
            api_key,
            model,
            timeout_seconds,
            max_retries,
            rate_limit_rpm,
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(HariError::ConfigurationError(
                "Gemini API key cannot be empty".to_string(),
            ));
        }

        if !self.api_key.starts_with("AIza") {
            return Err(HariError::ConfigurationError(
                "Invalid Gemini API key format (should start with 'AIza')".to_string(),
            ));
        }

        if self.model.is_empty() {
            return Err(HariError::ConfigurationError(
                "Gemini model cannot be empty".to_string(),
            ));
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > 300 {
            return Err(HariError::ConfigurationError(
                "Timeout must be between 1 and 300 seconds".to_string(),
            ));
        }

        if self.max_retries == 0 || self.max_retries > 10 {
            return Err(HariError::ConfigurationError(
                "Max retries must be between 1 and 10".to_string(),
            ));
        }

        if self.rate_limit_rpm == 0 || self.rate_limit_rpm > 1000 {
            return Err(HariError::ConfigurationError(
                "Rate limit must be between 1 and 1000 RPM".to_string(),
            ));
        }

        Ok(())
    }

    /// Base URL for the Gemini API.
    pub fn base_url(&self) -> &'static str {
        "https://generativelanguage.googleapis.com/v1beta"
    }

    /// Full generateContent URL for the configured model.
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url(),
            self.model,
            self.api_key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> GeminiConfig {
        GeminiConfig {
            api_key: "AIzaTestKey".to_string(),
            ..GeminiConfig::default()
        }
    }

    #[test]
    fn test_validation_accepts_sane_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_missing_key() {
        let config = GeminiConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_malformed_key() {
        let mut config = valid_config();
        config.api_key = "InvalidKey".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = valid_config();
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_endpoint_url_targets_generate_content() {
        let url = valid_config().endpoint_url();
        assert!(url.contains("/models/gemini-2.0-flash:generateContent"));
        assert!(url.ends_with("key=AIzaTestKey"));
    }
}
