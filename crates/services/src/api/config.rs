use std::env;
use std::time::Duration;

use credit_core::model::ApiBaseUrl;

use crate::error::ApiConfigError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: ApiBaseUrl,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: ApiBaseUrl::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: ApiBaseUrl) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `CREDIT45_API_URL` and `CREDIT45_TIMEOUT_SECS`, falling back to
    /// defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns `ApiConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ApiConfigError> {
        let mut config = Self::default();
        if let Ok(raw) = env::var("CREDIT45_API_URL") {
            config.base_url = ApiBaseUrl::parse(&raw)?;
        }
        if let Ok(raw) = env::var("CREDIT45_TIMEOUT_SECS") {
            config.timeout = parse_timeout_secs(&raw)?;
        }
        Ok(config)
    }
}

/// Parse a whole number of seconds, rejecting zero.
///
/// # Errors
///
/// Returns `ApiConfigError::Timeout` for anything but a positive integer.
pub fn parse_timeout_secs(raw: &str) -> Result<Duration, ApiConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ApiConfigError::Timeout {
            raw: raw.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_must_be_positive() {
        assert_eq!(parse_timeout_secs(" 30 ").unwrap(), Duration::from_secs(30));
        assert!(parse_timeout_secs("0").is_err());
        assert!(parse_timeout_secs("-5").is_err());
        assert!(parse_timeout_secs("soon").is_err());
    }

    #[test]
    fn default_points_at_local_backend() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url.as_url().as_str(), "http://localhost:8000/");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
