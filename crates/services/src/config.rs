use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const BASE_URL_ENV: &str = "QUIZ_API_BASE_URL";
pub const TIMEOUT_ENV: &str = "QUIZ_API_TIMEOUT_SECS";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Where the quiz service lives and how long to wait for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl ClientConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` if the url does not parse, is not http(s), or
    /// the timeout is zero.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: timeout_from_secs(timeout_secs)?,
        })
    }

    /// Read `QUIZ_API_BASE_URL` and `QUIZ_API_TIMEOUT_SECS`, falling back to
    /// defaults for unset or blank variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let base_url = read(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = match read(TIMEOUT_ENV) {
            Some(raw) => parse_timeout_secs(&raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        Self::new(&base_url, timeout_secs)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// # Errors
///
/// Returns `ConfigError` for unparsable or non-http(s) urls.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|source| ConfigError::InvalidUrl {
        value: trimmed.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::UnsupportedScheme(trimmed.to_string())),
    }
}

/// # Errors
///
/// Returns `ConfigError::InvalidTimeout` unless `raw` is a positive integer.
pub fn parse_timeout_secs(raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidTimeout(raw.trim().to_string())),
    }
}

fn timeout_from_secs(secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidTimeout(secs.to_string()));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn defaults() -> ClientConfig {
        ClientConfig::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS).unwrap()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, defaults());
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.timeout, Duration::from_secs(15));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config =
            ClientConfig::from_lookup(lookup_from(&[(BASE_URL_ENV, "  "), (TIMEOUT_ENV, "")]))
                .unwrap();
        assert_eq!(config, defaults());
    }

    #[test]
    fn reads_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (BASE_URL_ENV, "https://quiz.example.com/api-root"),
            (TIMEOUT_ENV, "3"),
        ]))
        .unwrap();
        assert_eq!(config.base_url.host_str(), Some("quiz.example.com"));
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "0")])),
            Err(ConfigError::InvalidTimeout(_))
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "soon")])),
            Err(ConfigError::InvalidTimeout(_))
        ));
        assert!(matches!(
            ClientConfig::new("not a url", 5),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            ClientConfig::new("ftp://quiz.example.com", 5),
            Err(ConfigError::UnsupportedScheme(_))
        ));
    }
}
