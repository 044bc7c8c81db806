//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use oratr_config::{Config, CorsConfig, HealthConfig, ServerConfig, UpstreamConfig};
use secrecy::SecretString;
use url::Url;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder pointed at a mock upstream
    pub fn new(upstream_base_url: &str) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                    cors: None,
                },
                upstream: UpstreamConfig {
                    api_key: SecretString::from("test-key"),
                    base_url: Url::parse(upstream_base_url).expect("valid upstream URL"),
                    default_voice: None,
                    default_format: None,
                    default_text: None,
                    timeout_seconds: 5,
                },
                telemetry: None,
            },
        }
    }

    /// Set the default voice token
    pub fn with_default_voice(mut self, token: &str) -> Self {
        self.config.upstream.default_voice = Some(token.to_string());
        self
    }

    /// Set the default output format token
    pub fn with_default_format(mut self, token: &str) -> Self {
        self.config.upstream.default_format = Some(token.to_string());
        self
    }

    /// Set the default text
    pub fn with_default_text(mut self, text: &str) -> Self {
        self.config.upstream.default_text = Some(text.to_string());
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
