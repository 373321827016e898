//! Client configuration: where the backend lives and how long to wait.

use std::time::Duration;

/// Backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://event--management.vercel.app/api";

/// Per-request deadline used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Environment variable holding the base URL.
pub const BASE_URL_VAR: &str = "EVENTDESK_API_BASE_URL";

/// Older name for [`BASE_URL_VAR`], still honoured.
pub const LEGACY_BASE_URL_VAR: &str = "BASE_URI";

/// Environment variable holding the timeout in milliseconds.
pub const TIMEOUT_VAR: &str = "EVENTDESK_API_TIMEOUT_MS";

/// Rejected configuration values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("base URL must be an http:// or https:// URL, got {0:?}")]
    InvalidBaseUrl(String),

    #[error("{var} must be a positive number of milliseconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Resolved once at startup and then read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
}

impl ClientConfig {
    /// Validates `base_url` and uses the default timeout.
    ///
    /// A trailing `/` is dropped so endpoint paths can be appended as-is.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Replaces the per-request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable source.
    ///
    /// `from_env` is this with `std::env::var`; tests pass a closure over
    /// a map instead of mutating the process environment.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = lookup(BASE_URL_VAR)
            .or_else(|| lookup(LEGACY_BASE_URL_VAR))
            .filter(|value| !value.trim().is_empty());
        let mut config = match base_url {
            Some(url) => Self::new(&url)?,
            None => Self::default(),
        };

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or(ConfigError::InvalidTimeout {
                    var: TIMEOUT_VAR,
                    value: raw.clone(),
                })?;
            config.timeout = Duration::from_millis(millis);
        }
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Joins the base URL and an endpoint path (which starts with `/`).
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let lower = trimmed.to_ascii_lowercase();
    let host = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"));
    match host {
        Some(rest) if !rest.is_empty() && !rest.contains(char::is_whitespace) => {
            Ok(trimmed.to_string())
        }
        _ => Err(ConfigError::InvalidBaseUrl(raw.to_string())),
    }
}
