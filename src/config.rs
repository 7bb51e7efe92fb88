use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Errors raised while resolving the generation service endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("MCQGEN_BASE_URL environment variable not set")]
    MissingBaseUrl,
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
}

static BASE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://\S+$").expect("valid hardcoded regex"));

/// Endpoint configuration for the question generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    base_url: String,
}

impl Config {
    /// Creates a config from an explicit base URL.
    ///
    /// Trailing slashes are trimmed so route joins produce a single slash.
    pub fn new(base_url: &str) -> Result<Config, ConfigError> {
        let trimmed = base_url.trim_end_matches('/');
        if !BASE_URL_RE.is_match(trimmed) {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Config {
            base_url: trimmed.to_string(),
        })
    }

    /// Reads the config from the `MCQGEN_BASE_URL` environment variable.
    pub fn from_env() -> Result<Config, ConfigError> {
        let base_url = std::env::var("MCQGEN_BASE_URL").map_err(|_| ConfigError::MissingBaseUrl)?;
        Config::new(&base_url)
    }

    /// Returns the service base URL, never slash-terminated.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_url_accepted() {
        let config = Config::new("http://localhost:8000").unwrap();
        assert_eq!(config.base_url(), "http://localhost:8000");
    }

    #[test]
    fn https_url_accepted() {
        let config = Config::new("https://mcq.example.com").unwrap();
        assert_eq!(config.base_url(), "https://mcq.example.com");
    }

    #[test]
    fn trailing_slashes_trimmed() {
        let config = Config::new("http://localhost:8000///").unwrap();
        assert_eq!(config.base_url(), "http://localhost:8000");
    }

    #[test]
    fn missing_scheme_rejected() {
        assert_eq!(
            Config::new("localhost:8000"),
            Err(ConfigError::InvalidBaseUrl("localhost:8000".to_string()))
        );
    }

    #[test]
    fn non_http_scheme_rejected() {
        assert_eq!(
            Config::new("ftp://files.example.com"),
            Err(ConfigError::InvalidBaseUrl(
                "ftp://files.example.com".to_string()
            ))
        );
    }

    #[test]
    fn bare_scheme_rejected() {
        assert_eq!(
            Config::new("https://"),
            Err(ConfigError::InvalidBaseUrl("https://".to_string()))
        );
    }

    #[test]
    fn empty_rejected() {
        assert_eq!(
            Config::new(""),
            Err(ConfigError::InvalidBaseUrl(String::new()))
        );
    }

    #[test]
    fn embedded_whitespace_rejected() {
        assert_eq!(
            Config::new("http://bad host"),
            Err(ConfigError::InvalidBaseUrl("http://bad host".to_string()))
        );
    }
}
