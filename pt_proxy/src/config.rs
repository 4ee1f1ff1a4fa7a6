//! Proxy configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::net::SocketAddr;

/// Default address the proxy listens on
pub const DEFAULT_BIND: &str = "127.0.0.1:1234";

/// Default PokerTH server the proxy relays to
pub const DEFAULT_UPSTREAM: &str = "127.0.0.1:7234";

/// Complete proxy configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Address clients connect to
    pub bind: SocketAddr,
    /// Server address (host:port) every client is relayed to
    pub upstream: String,
}

impl ProxyConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    /// * `upstream_override` - Optional upstream address override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if `PROXY_BIND` is set but is not a socket address
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        upstream_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let bind = match bind_override {
            Some(bind) => bind,
            None => {
                let raw = std::env::var("PROXY_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
                raw.parse().map_err(|_| ConfigError::Invalid {
                    var: "PROXY_BIND".to_string(),
                    reason: format!("Expected IP:PORT, got {raw:?}"),
                })?
            }
        };

        let upstream = upstream_override
            .or_else(|| std::env::var("PROXY_UPSTREAM").ok())
            .unwrap_or_else(|| DEFAULT_UPSTREAM.to_string());

        Ok(Self { bind, upstream })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upstream.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                var: "PROXY_UPSTREAM".to_string(),
                hint: format!("Pass --upstream or set PROXY_UPSTREAM, e.g. {DEFAULT_UPSTREAM}"),
            });
        }

        if !self.upstream.contains(':') {
            return Err(ConfigError::Invalid {
                var: "PROXY_UPSTREAM".to_string(),
                reason: format!("Expected host:port, got {:?}", self.upstream),
            });
        }

        if self.upstream == self.bind.to_string() {
            return Err(ConfigError::Invalid {
                var: "PROXY_UPSTREAM".to_string(),
                reason: "Must differ from the bind address".to_string(),
            });
        }

        Ok(())
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

#[cfg(test)]
mod tests {
    use super::*;

    fn config(upstream: &str) -> ProxyConfig {
        ProxyConfig {
            bind: DEFAULT_BIND.parse().unwrap(),
            upstream: upstream.to_string(),
        }
    }

    #[test]
    fn test_overrides_win() {
        let bind: SocketAddr = "0.0.0.0:4000".parse().unwrap();
        let loaded =
            ProxyConfig::from_env(Some(bind), Some("poker.example:7234".to_string())).unwrap();
        assert_eq!(loaded.bind, bind);
        assert_eq!(loaded.upstream, "poker.example:7234");
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(config(DEFAULT_UPSTREAM).validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_upstream() {
        let err = config(" ").validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired { var, .. } if var == "PROXY_UPSTREAM"));
    }

    #[test]
    fn test_config_validation_upstream_without_port() {
        let err = config("localhost").validate().unwrap_err();
        assert!(err.to_string().contains("host:port"));
    }

    #[test]
    fn test_config_validation_loop() {
        assert!(config(DEFAULT_BIND).validate().is_err());
    }
}
