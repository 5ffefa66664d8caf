//! Client configuration

use platdemo_core::{CoreError, Result};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Default `User-Agent` header
pub const DEFAULT_USER_AGENT: &str = "platdemo";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct ClientConfig {
    /// Platform base URL, always ending in `/`
    endpoint: Url,

    /// Token used for management calls
    pub token: String,

    pub user_agent: String,

    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration for `endpoint` using `token` for management calls
    pub fn new(endpoint: &str, token: impl Into<String>) -> Result<Self> {
        let mut endpoint = Url::parse(endpoint)
            .map_err(|e| CoreError::configuration(format!("invalid API endpoint {:?}: {}", endpoint, e)))?;

        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            return Err(CoreError::configuration(format!(
                "API endpoint must be http or https, got {}",
                endpoint.scheme()
            )));
        }

        // Relative joins keep any path prefix only if the base ends in '/'
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }

        let token = token.into();
        if token.trim().is_empty() {
            return Err(CoreError::configuration("API token must not be empty"));
        }

        Ok(Self {
            endpoint,
            token,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("token", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_gets_trailing_slash() {
        let config = ClientConfig::new("http://localhost:9999", "t").unwrap();
        assert_eq!(config.endpoint().as_str(), "http://localhost:9999/");

        let config = ClientConfig::new("https://example.com/influx", "t").unwrap();
        assert_eq!(config.endpoint().as_str(), "https://example.com/influx/");
        assert_eq!(
            config.endpoint().join("api/v2/users").unwrap().as_str(),
            "https://example.com/influx/api/v2/users"
        );
    }

    #[test]
    fn test_rejects_bad_endpoints_and_tokens() {
        assert!(ClientConfig::new("not a url", "t").is_err());
        assert!(ClientConfig::new("ftp://localhost", "t").is_err());
        assert!(ClientConfig::new("http://localhost:9999", "  ").is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new("http://localhost:9999", "super-secret").unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("http://localhost:9999", "t")
            .unwrap()
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
