//! Application configuration loaded from environment variables.

use std::time::Duration;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_GATEWAY_TIMEOUT_MS: u64 = 2000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` - bind address (default: `"0.0.0.0"`)
/// - `PORT` - listen port (default: `8080`)
/// - `RUST_LOG` - tracing filter directive (default: `"info"`)
/// - `INVENTORY_SERVICE_URL` - base URL of the inventory service; unset runs
///   against an in-memory catalog seeded with demo parts
/// - `PAYMENT_SERVICE_URL` - base URL of the payment service; unset runs
///   against an in-memory payment service
/// - `GATEWAY_TIMEOUT_MS` - budget for each outbound call (default: `2000`)
/// - `REQUEST_TIMEOUT_SECS` - budget for each inbound request (default: `10`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub inventory_service_url: Option<String>,
    pub payment_service_url: Option<String>,
    pub gateway_timeout: Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    ///
    /// Unparsable numbers and empty URLs fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let url = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            inventory_service_url: url("INVENTORY_SERVICE_URL"),
            payment_service_url: url("PAYMENT_SERVICE_URL"),
            gateway_timeout: lookup("GATEWAY_TIMEOUT_MS")
                .and_then(|ms| ms.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.gateway_timeout),
            request_timeout: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|secs| secs.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            log_level: "info".to_string(),
            inventory_service_url: None,
            payment_service_url: None,
            gateway_timeout: Duration::from_millis(DEFAULT_GATEWAY_TIMEOUT_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}
