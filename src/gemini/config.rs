//! Google Gemini configuration

use crate::errors::{FolioError, Result};
use std::env;

/// Available Gemini models
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeminiModel {
    /// Gemini 2.5 Flash - fast and cost-effective, the portfolio default
    Gemini25Flash,
    /// Gemini 2.5 Pro - most capable model
    Gemini25Pro,
}

impl GeminiModel {
    /// Get the model name for API requests
    pub fn model_name(&self) -> &'static str {
        match self {
            GeminiModel::Gemini25Flash => "gemini-2.5-flash",
            GeminiModel::Gemini25Pro => "gemini-2.5-pro",
        }
    }

    /// Endpoint path for a streaming generation call
    pub fn stream_endpoint(&self) -> String {
        format!("models/{}:streamGenerateContent", self.model_name())
    }
}

impl std::fmt::Display for GeminiModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.model_name())
    }
}

/// Google Gemini configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for Google AI
    pub api_key: String,
    /// Model to use
    pub model: GeminiModel,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: GeminiModel::Gemini25Flash,
            timeout_seconds: 60,
        }
    }
}

impl GeminiConfig {
    /// Create configuration from environment variables.
    ///
    /// Returns `None` when `GEMINI_API_KEY` is absent; the chat feature
    /// then degrades to a fixed "unavailable" message instead of failing.
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("GEMINI_API_KEY").ok()?;

        let model = match env::var("GEMINI_MODEL").ok().as_deref() {
            Some("gemini-2.5-pro") => GeminiModel::Gemini25Pro,
            _ => GeminiModel::Gemini25Flash,
        };

        Some(Self {
            api_key,
            model,
            ..Default::default()
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(FolioError::ConfigurationError(
                "Gemini API key cannot be empty".to_string(),
            ));
        }

        if !self.api_key.starts_with("AIza") {
            return Err(FolioError::ConfigurationError(
                "Invalid Gemini API key format (should start with 'AIza')".to_string(),
            ));
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > 300 {
            return Err(FolioError::ConfigurationError(
                "Timeout must be between 1 and 300 seconds".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the base URL for the Gemini API
    pub fn base_url(&self) -> &'static str {
        "https://generativelanguage.googleapis.com/v1beta"
    }

    /// Full URL for a streaming endpoint (SSE framing)
    pub fn stream_url(&self) -> String {
        format!(
            "{}/{}?alt=sse&key={}",
            self.base_url(),
            self.model.stream_endpoint(),
            self.api_key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let mut config = GeminiConfig {
            api_key: "AIzaValidKey".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        config.api_key = "InvalidKey".to_string();
        assert!(config.validate().is_err());

        config.api_key = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_stream_url_shape() {
        let config = GeminiConfig {
            api_key: "AIzaTest".to_string(),
            ..Default::default()
        };
        let url = config.stream_url();

        assert!(url.contains("gemini-2.5-flash:streamGenerateContent"));
        assert!(url.contains("alt=sse"));
    }
}
