//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPIFY_STORE` - Shopify store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_ADMIN_ACCESS_TOKEN` - Admin API access token (HIGH PRIVILEGE)
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `SHOPIFY_API_VERSION` - API version (default: 2025-07)
//! - `SHOPIFY_REQUEST_TIMEOUT_SECS` - Transport-level HTTP timeout (default: 30)
//! - `BULK_UPDATE_CONCURRENCY` - Max in-flight price mutations (default: 4)
//! - `BULK_UPDATE_TIMEOUT_SECS` - Per-mutation timeout (default: 10)
//! - `BULK_UPDATE_RETRY_ATTEMPTS` - Attempts per mutation, transport errors
//!   only (default: 3)
//! - `BULK_UPDATE_RETRY_BASE_DELAY_MS` - Base backoff delay (default: 250)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry traces sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Shopify Admin API configuration
    pub shopify: ShopifyAdminConfig,
    /// Bulk price-update tuning
    pub bulk_update: BulkUpdateSettings,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Shopify Admin API configuration.
///
/// Implements `Debug` manually to redact the HIGH PRIVILEGE access token.
#[derive(Clone)]
pub struct ShopifyAdminConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store: String,
    /// Shopify API version (e.g., 2025-07)
    pub api_version: String,
    /// Admin API access token (HIGH PRIVILEGE - full store access)
    pub access_token: SecretString,
    /// Transport-level timeout applied to every HTTP request
    pub request_timeout: Duration,
}

impl std::fmt::Debug for ShopifyAdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyAdminConfig")
            .field("store", &self.store)
            .field("api_version", &self.api_version)
            .field("access_token", &"[REDACTED]")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Tuning knobs for the bulk price updater.
///
/// Defaults are deliberately conservative: the Admin API enforces per-shop
/// rate limits, so concurrency stays small and each mutation carries its
/// own timeout so one stuck call cannot stall the batch.
#[derive(Debug, Clone)]
pub struct BulkUpdateSettings {
    /// Maximum number of price mutations in flight at once.
    pub max_concurrency: usize,
    /// Timeout for a single mutation attempt.
    pub mutation_timeout: Duration,
    /// Total attempts per mutation (1 = no retry). Only transport-class
    /// failures are retried.
    pub retry_max_attempts: u32,
    /// Base delay for exponential backoff between attempts.
    pub retry_base_delay: Duration,
}

impl Default for BulkUpdateSettings {
    fn default() -> Self {
        Self {
            max_concurrency: 4,
            mutation_timeout: Duration::from_secs(10),
            retry_max_attempts: 3,
            retry_base_delay: Duration::from_millis(250),
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_value("ADMIN_HOST", &get_env_or_default("ADMIN_HOST", "127.0.0.1"))?;
        let port = parse_value("ADMIN_PORT", &get_env_or_default("ADMIN_PORT", "3001"))?;

        let shopify = ShopifyAdminConfig::from_env()?;
        let bulk_update = BulkUpdateSettings::from_env()?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            shopify,
            bulk_update,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ShopifyAdminConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs: u64 = parse_value(
            "SHOPIFY_REQUEST_TIMEOUT_SECS",
            &get_env_or_default("SHOPIFY_REQUEST_TIMEOUT_SECS", "30"),
        )?;

        Ok(Self {
            store: get_required_env("SHOPIFY_STORE")?,
            api_version: get_env_or_default("SHOPIFY_API_VERSION", "2025-07"),
            access_token: SecretString::from(get_required_env("SHOPIFY_ADMIN_ACCESS_TOKEN")?),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl BulkUpdateSettings {
    fn from_env() -> Result<Self, ConfigError> {
        let max_concurrency: usize = parse_value(
            "BULK_UPDATE_CONCURRENCY",
            &get_env_or_default("BULK_UPDATE_CONCURRENCY", "4"),
        )?;
        if max_concurrency == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "BULK_UPDATE_CONCURRENCY".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let timeout_secs: u64 = parse_value(
            "BULK_UPDATE_TIMEOUT_SECS",
            &get_env_or_default("BULK_UPDATE_TIMEOUT_SECS", "10"),
        )?;
        let retry_max_attempts: u32 = parse_value(
            "BULK_UPDATE_RETRY_ATTEMPTS",
            &get_env_or_default("BULK_UPDATE_RETRY_ATTEMPTS", "3"),
        )?;
        let base_delay_ms: u64 = parse_value(
            "BULK_UPDATE_RETRY_BASE_DELAY_MS",
            &get_env_or_default("BULK_UPDATE_RETRY_BASE_DELAY_MS", "250"),
        )?;

        Ok(Self {
            max_concurrency,
            mutation_timeout: Duration::from_secs(timeout_secs),
            retry_max_attempts: retry_max_attempts.max(1),
            retry_base_delay: Duration::from_millis(base_delay_ms),
        })
    }
}

// =============================================================================
// Environment helpers
// =============================================================================

fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a raw string into `T`, attributing failures to `key`.
fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_valid_port() {
        let port: u16 = parse_value("ADMIN_PORT", "3001").unwrap();
        assert_eq!(port, 3001);
    }

    #[test]
    fn test_parse_value_invalid_port() {
        let result: Result<u16, _> = parse_value("ADMIN_PORT", "not-a-port");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "ADMIN_PORT"));
    }

    #[test]
    fn test_bulk_update_defaults() {
        let settings = BulkUpdateSettings::default();
        assert_eq!(settings.max_concurrency, 4);
        assert_eq!(settings.mutation_timeout, Duration::from_secs(10));
        assert_eq!(settings.retry_max_attempts, 3);
        assert_eq!(settings.retry_base_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_shopify_config_debug_redacts_token() {
        let config = ShopifyAdminConfig {
            store: "example.myshopify.com".to_string(),
            api_version: "2025-07".to_string(),
            access_token: SecretString::from("shpat_super_secret"),
            request_timeout: Duration::from_secs(30),
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("shpat_super_secret"));
    }

    #[test]
    fn test_socket_addr() {
        let config = AdminConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            shopify: ShopifyAdminConfig {
                store: "example.myshopify.com".to_string(),
                api_version: "2025-07".to_string(),
                access_token: SecretString::from("token"),
                request_timeout: Duration::from_secs(30),
            },
            bulk_update: BulkUpdateSettings::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        };
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3001");
    }
}
