//! Configuration for the dashboard
//!
//! Settings come from the process environment (the binary loads `.env` via
//! `dotenvy` first) and are validated before any client is built.
//!
//! | variable | default |
//! |---|---|
//! | `BACKOFFICE_API_URL` | `http://localhost:3000/api` |
//! | `BACKOFFICE_API_TOKEN` | unset |
//! | `BACKOFFICE_REQUEST_TIMEOUT_SECS` | `30` |
//! | `BACKOFFICE_FAILED_LOAD` | `keep` |
//! | `BACKOFFICE_LOG` | unset |
//!
//! # Example
//!
//! ```no_run
//! use backoffice_dashboard::config::DashboardConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DashboardConfig::from_env()?;
//! println!("API: {}", config.api_url);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Base URL used when `BACKOFFICE_API_URL` is unset
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// Request timeout used when `BACKOFFICE_REQUEST_TIMEOUT_SECS` is unset
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const API_URL_VAR: &str = "BACKOFFICE_API_URL";
const API_TOKEN_VAR: &str = "BACKOFFICE_API_TOKEN";
const TIMEOUT_VAR: &str = "BACKOFFICE_REQUEST_TIMEOUT_SECS";
const FAILED_LOAD_VAR: &str = "BACKOFFICE_FAILED_LOAD";
const LOG_VAR: &str = "BACKOFFICE_LOG";

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable is set but its value does not parse
    #[error("Invalid value for {name}: {value}")]
    InvalidValue {
        /// Variable name
        name: &'static str,
        /// Offending value
        value: String,
    },

    /// Values parsed but are not usable together
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// What a list does with its rows when a reload fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailedLoadPolicy {
    /// Leave the previously loaded rows in place
    #[default]
    KeepPrevious,
    /// Empty the list
    Clear,
}

impl FromStr for FailedLoadPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keep" | "keep-previous" | "keep_previous" => Ok(Self::KeepPrevious),
            "clear" => Ok(Self::Clear),
            _ => Err(ConfigError::InvalidValue {
                name: FAILED_LOAD_VAR,
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for FailedLoadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeepPrevious => write!(f, "keep"),
            Self::Clear => write!(f, "clear"),
        }
    }
}

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// REST base URL, without a trailing slash
    pub api_url: String,
    /// Bearer token sent with every request
    pub api_token: Option<String>,
    /// HTTP client timeout
    pub request_timeout: Duration,
    /// Behaviour of lists on a failed reload
    pub failed_load: FailedLoadPolicy,
    /// Tracing filter override
    pub log_filter: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            failed_load: FailedLoadPolicy::default(),
            log_filter: None,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns error if a variable does not parse or validation fails
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns error if a variable does not parse or validation fails
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(API_URL_VAR) {
            config.api_url = url;
        }
        config.api_token = get(API_TOKEN_VAR);

        if let Some(raw) = get(TIMEOUT_VAR) {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                name: TIMEOUT_VAR,
                value: raw.clone(),
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = get(FAILED_LOAD_VAR) {
            config.failed_load = raw.parse()?;
        }
        config.log_filter = get(LOG_VAR);

        config.api_url = config.api_url.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    /// Replace the API base URL, re-validating the result
    ///
    /// # Errors
    ///
    /// Returns error if the new URL is not http or https
    pub fn with_api_url(mut self, url: impl Into<String>) -> Result<Self, ConfigError> {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self.validate()?;
        Ok(self)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "API URL must start with http:// or https://, got '{}'",
                self.api_url
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "request timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
