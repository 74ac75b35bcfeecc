//! Retrieval configuration

use std::time::Duration;

use crate::error::RetrievalError;

/// Where Virginia Tech publishes the bicycle helmet ratings
pub const DEFAULT_URL: &str = "https://www.helmet.beam.vt.edu/js/bicycleData.js";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable that overrides the dataset URL
pub const URL_ENV_VAR: &str = "HELMET_DATA_URL";

#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    pub url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("helmet-ratings/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetchConfig {
    /// Build a config from CLI input, falling back to `HELMET_DATA_URL`
    /// and then the built-in defaults.
    pub fn resolve(
        explicit_url: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, RetrievalError> {
        let env_url = std::env::var(URL_ENV_VAR).ok();
        Self::resolve_with(explicit_url, env_url.as_deref(), timeout_secs)
    }

    fn resolve_with(
        explicit_url: Option<&str>,
        env_url: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, RetrievalError> {
        let mut config = Self::default();

        if let Some(url) = explicit_url.or(env_url).filter(|u| !u.trim().is_empty()) {
            config.url = url.trim().to_string();
        }
        if let Some(secs) = timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Only absolute http(s) URLs are accepted
    pub fn validate(&self) -> Result<(), RetrievalError> {
        let parsed = url::Url::parse(&self.url).map_err(|e| RetrievalError::InvalidUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(RetrievalError::InvalidUrl {
                url: self.url.clone(),
                reason: format!("unsupported scheme {}", other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FetchConfig::resolve_with(None, None, None).unwrap();
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("helmet-ratings/"));
    }

    #[test]
    fn test_explicit_url_wins_over_env() {
        let config = FetchConfig::resolve_with(
            Some("https://mirror.example.com/bicycleData.js"),
            Some("https://other.example.com/data.js"),
            Some(5),
        )
        .unwrap();
        assert_eq!(config.url, "https://mirror.example.com/bicycleData.js");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_env_url_used_when_no_flag() {
        let config =
            FetchConfig::resolve_with(None, Some("http://localhost:8080/data.js"), None).unwrap();
        assert_eq!(config.url, "http://localhost:8080/data.js");
    }

    #[test]
    fn test_blank_env_url_ignored() {
        let config = FetchConfig::resolve_with(None, Some("  "), None).unwrap();
        assert_eq!(config.url, DEFAULT_URL);
    }

    #[test]
    fn test_rejects_bad_urls() {
        let err = FetchConfig::resolve_with(Some("not a url"), None, None).unwrap_err();
        assert!(matches!(err, RetrievalError::InvalidUrl { .. }));

        let err = FetchConfig::resolve_with(Some("ftp://example.com/data.js"), None, None)
            .unwrap_err();
        assert!(err.to_string().contains("unsupported scheme ftp"));
    }
}
