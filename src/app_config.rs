/*!
 * Application configuration module.
 *
 * This module handles loading, validating and defaulting the configuration
 * for the translation client and orchestrators. Configuration is read from a
 * JSON file; the API key may also come from the `LINGOFILL_API_KEY`
 * environment variable.
 */

use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::providers::RetryPolicy;
use crate::record::LocaleCode;

/// Environment variable consulted when the config file carries no API key
pub const API_KEY_ENV_VAR: &str = "LINGOFILL_API_KEY";

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Wait (seconds) before each successive retry after a rate-limit response
    #[serde(default = "default_retry_delays_secs")]
    pub retry_delays_secs: Vec<u64>,

    /// Minimum spacing (milliseconds) between consecutive remote calls
    #[serde(default = "default_rate_limit_delay_ms")]
    pub rate_limit_delay_ms: u64,

    /// Default source locale when a request does not name one
    #[serde(default = "default_locale")]
    pub default_locale: String,

    /// Locales translations may target
    #[serde(default = "default_available_locales")]
    pub available_locales: Vec<String>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Remote chat-completion API settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    /// API key, required (may come from the environment instead)
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Base URL of the API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Transport-level read timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Corresponding `log` crate level filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_endpoint() -> String {
    "https://api.mistral.ai".to_string()
}

fn default_model() -> String {
    "mistral-small".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_retry_delays_secs() -> Vec<u64> {
    vec![2, 4, 8, 16]
}

fn default_rate_limit_delay_ms() -> u64 {
    2000
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_available_locales() -> Vec<String> {
    vec!["en".to_string()]
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            retry_delays_secs: default_retry_delays_secs(),
            rate_limit_delay_ms: default_rate_limit_delay_ms(),
            default_locale: default_locale(),
            available_locales: default_available_locales(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file: {}", path.as_ref().display())
        })?;
        let config: Config =
            serde_json::from_str(&content).context("Failed to parse config file as JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// The API key from the config file, falling back to the environment.
    /// Fails fast when neither carries a non-blank value.
    pub fn api_key(&self) -> Result<String> {
        if !self.api.api_key.trim().is_empty() {
            return Ok(self.api.api_key.clone());
        }
        match std::env::var(API_KEY_ENV_VAR) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(anyhow!(
                "API key is not set. Provide api.api_key in the config file or set {}",
                API_KEY_ENV_VAR
            )),
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.api.endpoint.trim().is_empty() {
            return Err(anyhow!("API endpoint cannot be empty"));
        }
        if self.api.model.trim().is_empty() {
            return Err(anyhow!("API model cannot be empty"));
        }
        if !(0.0..=2.0).contains(&self.api.temperature) {
            return Err(anyhow!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.api.temperature
            ));
        }
        if self.default_locale.trim().is_empty() {
            return Err(anyhow!("Default locale cannot be empty"));
        }
        if self.available_locales.is_empty() {
            return Err(anyhow!("At least one available locale is required"));
        }
        if !self.available_locales.contains(&self.default_locale) {
            return Err(anyhow!(
                "Default locale '{}' must be listed in available_locales",
                self.default_locale
            ));
        }
        Ok(())
    }

    /// Retry policy built from the configured delay sequence
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_delays_secs
                .iter()
                .map(|secs| Duration::from_secs(*secs))
                .collect::<Vec<_>>(),
        )
    }

    /// Blocking pause inserted between consecutive remote calls
    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.rate_limit_delay_ms)
    }

    /// Transport-level read timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Default source locale as a typed code
    pub fn default_locale_code(&self) -> LocaleCode {
        LocaleCode::new(self.default_locale.clone())
    }

    /// Available locales as typed codes, in configured order
    pub fn available_locale_codes(&self) -> Vec<LocaleCode> {
        self.available_locales
            .iter()
            .map(|l| LocaleCode::new(l.clone()))
            .collect()
    }
}
