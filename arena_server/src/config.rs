//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::net::SocketAddr;

/// Default HTTP bind address
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// HTTP bind address
    pub bind: SocketAddr,
    /// Prometheus exporter bind address; no exporter when unset
    pub metrics_bind: Option<SocketAddr>,
    /// Register demo games, players and a team on startup
    pub seed_demo_data: bool,
    /// Allow any origin
    pub cors_permissive: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    /// * `seed_override` - Force demo data seeding (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a set variable cannot be parsed
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        seed_override: bool,
    ) -> Result<Self, ConfigError> {
        let bind = match bind_override {
            Some(bind) => bind,
            None => parse_addr("SERVER_BIND")?.unwrap_or(default_bind()?),
        };

        Ok(ServerConfig {
            bind,
            metrics_bind: parse_addr("METRICS_BIND")?,
            seed_demo_data: seed_override || parse_env_or("SEED_DEMO_DATA", false),
            cors_permissive: parse_env_or("CORS_PERMISSIVE", true),
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.metrics_bind == Some(self.bind) {
            return Err(ConfigError::Invalid {
                var: "METRICS_BIND".to_string(),
                reason: format!("Must differ from the server bind address ({})", self.bind),
            });
        }

        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            metrics_bind: None,
            seed_demo_data: false,
            cors_permissive: true,
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn default_bind() -> Result<SocketAddr, ConfigError> {
    DEFAULT_BIND.parse().map_err(|_| ConfigError::MissingRequired {
        var: "SERVER_BIND".to_string(),
        hint: "Set an address such as 127.0.0.1:8080".to_string(),
    })
}

/// Parse an optional socket address variable; a set but malformed value is an error
fn parse_addr(key: &str) -> Result<Option<SocketAddr>, ConfigError> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => {
            value
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| ConfigError::Invalid {
                    var: key.to_string(),
                    reason: format!("'{value}' is not an IP:PORT address"),
                })
        }
        _ => Ok(None),
    }
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
