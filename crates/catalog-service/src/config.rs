//! Runtime configuration for the catalog service.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use catalog_fetch::TimeoutConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::provider::ProviderMode;
use crate::simulated::SimulationProfile;

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("error_rate must be within [0, 1], got {0}")]
    InvalidErrorRate(f64),

    #[error("invalid api_base_url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("unknown environment {0:?} (expected development or production)")]
    UnknownEnvironment(String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format.
    #[default]
    Human,
    /// JSON lines.
    Json,
}

/// Named configuration profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigError::UnknownEnvironment(s.to_string())),
        }
    }
}

/// Catalog service configuration.
///
/// Every field has a default, so partial files deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Serve calls from the simulated catalog instead of the backend.
    #[serde(default = "default_use_mock")]
    pub use_mock_data: bool,

    /// Backend base URL, endpoints are appended to it.
    #[serde(default = "default_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_enable_logging")]
    pub enable_logging: bool,

    /// Uniform simulated latency; per-operation defaults when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock_delay_ms: Option<u64>,

    /// Uniform simulated failure probability; per-operation defaults
    /// when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_rate: Option<f64>,

    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Seed for failure injection; entropy when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_use_mock() -> bool {
    true
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_enable_logging() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            use_mock_data: default_use_mock(),
            api_base_url: default_base_url(),
            enable_logging: default_enable_logging(),
            mock_delay_ms: None,
            error_rate: None,
            request_timeout_secs: default_timeout_secs(),
            seed: None,
            log_format: LogFormat::default(),
        }
    }
}

impl CatalogConfig {
    /// Defaults with the development profile applied.
    pub fn development() -> Self {
        Self::default().with_environment(Environment::Development)
    }

    /// Defaults with the production profile applied.
    pub fn production() -> Self {
        Self::default().with_environment(Environment::Production)
    }

    /// Overlay a named profile. The base URL and transport settings are
    /// kept.
    pub fn with_environment(mut self, env: Environment) -> Self {
        match env {
            Environment::Development => {
                self.use_mock_data = true;
                self.enable_logging = true;
                self.mock_delay_ms = Some(800);
                self.error_rate = Some(0.02);
            }
            Environment::Production => {
                self.use_mock_data = false;
                self.enable_logging = false;
                self.mock_delay_ms = Some(0);
                self.error_rate = Some(0.0);
            }
        }
        self
    }

    pub fn with_mode(mut self, mode: ProviderMode) -> Self {
        self.use_mock_data = mode.is_mock();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(rate) = self.error_rate {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::InvalidErrorRate(rate));
            }
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        url::Url::parse(&self.api_base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.api_base_url.clone(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    pub fn mode(&self) -> ProviderMode {
        if self.use_mock_data {
            ProviderMode::Mock
        } else {
            ProviderMode::Remote
        }
    }

    /// Simulation settings with the configured overrides.
    pub fn simulation_profile(&self) -> SimulationProfile {
        let mut profile = SimulationProfile::realistic();
        if let Some(ms) = self.mock_delay_ms {
            profile = profile.with_delay(Duration::from_millis(ms));
        }
        if let Some(rate) = self.error_rate {
            profile = profile.with_failure_rate(rate);
        }
        profile
    }

    pub fn timeout(&self) -> TimeoutConfig {
        TimeoutConfig::from_secs(self.request_timeout_secs)
    }

    /// Default log filter implied by `enable_logging`.
    pub fn log_level(&self) -> &'static str {
        if self.enable_logging {
            "debug"
        } else {
            "warn"
        }
    }
}
