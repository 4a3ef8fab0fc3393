//! Configuration for the API client

use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::time::Duration;

/// Default Checkout API base URL
pub const DEFAULT_BASE_URL: &str = "https://checkout.tebex.io/api";

/// Configuration for [`ReqwestTransport`](crate::client::ReqwestTransport)
pub struct ClientConfig {
    /// API base URL, without a trailing slash
    pub base_url: String,

    /// Project id, sent as the basic auth username
    pub project_id: String,

    /// Private key, sent as the basic auth password
    pub private_key: SecretString,

    /// Request timeout
    pub timeout: Duration,

    /// User-Agent header for outgoing requests
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            project_id: String::new(),
            private_key: SecretString::new(String::new().into()),
            timeout: Duration::from_secs(30),
            user_agent: format!("tebex-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("project_id", &self.project_id)
            .field("private_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Check whether both credentials are present
    pub fn has_credentials(&self) -> bool {
        !self.project_id.is_empty() && !self.private_key.expose_secret().is_empty()
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the project id and private key used for basic auth
    pub fn credentials(
        mut self,
        project_id: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        self.config.project_id = project_id.into();
        self.config.private_key = SecretString::new(private_key.into().into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout = Duration::from_secs(secs);
        self
    }

    /// Set the User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("tebex-rust/"));
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder()
            .base_url("http://localhost:8080/api/")
            .credentials("1234567", "sk_test")
            .timeout_secs(5)
            .build();

        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.project_id, "1234567");
        assert_eq!(config.private_key.expose_secret(), "sk_test");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.has_credentials());
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let config = ClientConfig::builder().credentials("1", "sk_live_secret").build();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk_live_secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
