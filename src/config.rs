//! Client configuration
//!
//! [`ClientConfig`] can be assembled in code with [`ClientConfig::builder`]
//! or loaded from a YAML file:
//!
//! ```yaml
//! base_url: https://disqus.com/api/3.0
//! timeout_seconds: 5
//! history_capacity: 10
//! default_params:
//!   api_key: YOUR_PUBLIC_KEY
//! throttle:
//!   requests_per_second: 1
//!   burst_size: 5
//! ```

use crate::error::{Error, Result};
use crate::http::RateLimiterConfig;
use crate::params::Params;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Disqus API 3.0 root
pub const DEFAULT_BASE_URL: &str = "https://disqus.com/api/3.0";

/// Number of responses kept for introspection
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Configuration for [`crate::ApiClient`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API root; resources resolve to `{base_url}/{resource}.json`
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// User agent string
    pub user_agent: String,

    /// Number of responses retained in the history
    pub history_capacity: usize,

    /// Parameters sent with every request (credentials usually live here)
    pub default_params: Params,

    /// Optional client-side throttle; `None` sends requests immediately
    pub throttle: Option<RateLimiterConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 5,
            user_agent: format!("disqust/{}", env!("CARGO_PKG_VERSION")),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            default_params: Params::new(),
            throttle: None,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Parse a config from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Check that the config can be used to build a client
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_config(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.history_capacity == 0 {
            return Err(Error::invalid_config(
                "history_capacity",
                "must be at least 1",
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(Error::invalid_config("timeout_seconds", "must be at least 1"));
        }
        Ok(())
    }

    /// Full URL for a resource name such as `forums/listPosts`
    pub fn resource_url(&self, resource: &str) -> Result<String> {
        let name = resource.trim_matches('/');
        if name.is_empty() {
            return Err(Error::InvalidResource {
                resource: resource.to_string(),
            });
        }
        let base = self.base_url.trim_end_matches('/');
        Ok(format!("{base}/{name}.json"))
    }
}

/// Builder for [`ClientConfig`]
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout (whole seconds, rounded up)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        let secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
        self.config.timeout_seconds = secs;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set how many responses the history keeps
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config.history_capacity = capacity;
        self
    }

    /// Add a default parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.config.default_params.insert(key, value);
        self
    }

    /// Replace the default parameters
    pub fn params(mut self, params: Params) -> Self {
        self.config.default_params = params;
        self
    }

    /// Set the public API key (`api_key` parameter)
    pub fn api_key(self, key: impl Into<String>) -> Self {
        let key: String = key.into();
        self.param("api_key", key)
    }

    /// Set the user access token (`access_token` parameter)
    pub fn access_token(self, token: impl Into<String>) -> Self {
        let token: String = token.into();
        self.param("access_token", token)
    }

    /// Enable the client-side throttle
    pub fn throttle(mut self, config: RateLimiterConfig) -> Self {
        self.config.throttle = Some(config);
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.history_capacity, 10);
        assert!(config.default_params.is_empty());
        assert!(config.throttle.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder()
            .base_url("http://localhost:8080/api/3.0/")
            .timeout(Duration::from_millis(2500))
            .api_key("pub")
            .access_token("tok")
            .param("limit", 100)
            .history_capacity(3)
            .throttle(RateLimiterConfig::new(2, 4))
            .build();

        assert_eq!(config.timeout_seconds, 3);
        assert_eq!(config.default_params.get("api_key"), Some(&json!("pub")));
        assert_eq!(config.default_params.get("access_token"), Some(&json!("tok")));
        assert_eq!(config.default_params.get("limit"), Some(&json!(100)));
        assert_eq!(config.history_capacity, 3);
        assert_eq!(config.throttle, Some(RateLimiterConfig::new(2, 4)));
    }

    #[test]
    fn test_resource_url() {
        let config = ClientConfig::builder()
            .base_url("https://disqus.com/api/3.0/")
            .build();
        assert_eq!(
            config.resource_url("forums/listPosts").unwrap(),
            "https://disqus.com/api/3.0/forums/listPosts.json"
        );
        assert_eq!(
            config.resource_url("/posts/list/").unwrap(),
            "https://disqus.com/api/3.0/posts/list.json"
        );
        assert!(matches!(
            config.resource_url(""),
            Err(Error::InvalidResource { .. })
        ));
        assert!(config.resource_url("/").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_scheme = ClientConfig::builder().base_url("ftp://example.com").build();
        assert!(matches!(
            bad_scheme.validate(),
            Err(Error::InvalidConfigValue { .. })
        ));

        let not_a_url = ClientConfig::builder().base_url("not a url").build();
        assert!(matches!(not_a_url.validate(), Err(Error::InvalidUrl(_))));

        let zero_history = ClientConfig::builder().history_capacity(0).build();
        assert!(zero_history.validate().is_err());
    }

    #[test]
    fn test_from_yaml_partial_uses_defaults() {
        let yaml = r"
default_params:
  api_key: abc
  limit: 100
throttle:
  requests_per_second: 1
  burst_size: 5
";
        let config = ClientConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.default_params.get("limit"), Some(&json!(100)));
        assert_eq!(config.throttle, Some(RateLimiterConfig::new(1, 5)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: http://127.0.0.1:9000\ntimeout_seconds: 12").unwrap();

        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout(), Duration::from_secs(12));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ClientConfig::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
