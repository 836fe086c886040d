//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_CATALOG_PATH` - Catalog JSON file (default: crates/storefront/content/catalog.json)
//! - `STOREFRONT_STATIC_DIR` - Static asset root (default: crates/storefront/static)
//! - `STOREFRONT_CATALOG_TIMEOUT_MS` - How long a page waits for the catalog (default: 2500)
//! - `STOREFRONT_CURRENCY` - Display currency (default: USD)
//! - `STOREFRONT_FREE_SHIPPING_OVER` - Subtotal above which shipping is free (default: 150)
//! - `STOREFRONT_FLAT_SHIPPING` - Flat shipping fee (default: 9.99)
//! - `STOREFRONT_MOBILE_BREAKPOINT_PX` - Mini-cart scroll-lock breakpoint (default: 720)
//! - `STOREFRONT_HERO_FULL_VIDEO` - Full-resolution hero video (default: /static/video/hero-full-1080.mp4)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;
use vast_core::checkout::ShippingPolicy;
use vast_core::settings::{DEFAULT_FULL_VIDEO_SRC, DEFAULT_MOBILE_BREAKPOINT_PX};
use vast_core::{CART_STORAGE_KEY, ClientSettings, CurrencyCode};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Catalog JSON file loaded at startup
    pub catalog_path: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Upper bound on how long a page render waits for the catalog
    pub catalog_timeout: Duration,
    /// Currency prices are displayed in
    pub currency: CurrencyCode,
    /// Shipping rule shared with the browser bundle
    pub shipping: ShippingPolicy,
    /// Viewport width below which the open mini-cart locks page scrolling
    pub mobile_breakpoint_px: u32,
    /// Source appended to the hero modal on first open
    pub full_video_src: String,
    /// Sentry error tracking configuration
    pub sentry: SentryConfig,
}

/// Sentry configuration.
#[derive(Debug, Clone)]
pub struct SentryConfig {
    pub dsn: Option<String>,
    pub environment: Option<String>,
    pub sample_rate: f32,
    pub traces_sample_rate: f32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            catalog_path: PathBuf::from("crates/storefront/content/catalog.json"),
            static_dir: PathBuf::from("crates/storefront/static"),
            catalog_timeout: Duration::from_millis(2500),
            currency: CurrencyCode::default(),
            shipping: ShippingPolicy::default(),
            mobile_breakpoint_px: DEFAULT_MOBILE_BREAKPOINT_PX,
            full_video_src: DEFAULT_FULL_VIDEO_SRC.to_string(),
            sentry: SentryConfig::default(),
        }
    }
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            environment: None,
            sample_rate: 1.0,
            traces_sample_rate: 0.0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);
        let defaults = Self::default();

        let free_over = env.parse_or("STOREFRONT_FREE_SHIPPING_OVER", defaults.shipping.free_over)?;
        let flat_fee = env.parse_or("STOREFRONT_FLAT_SHIPPING", defaults.shipping.flat_fee)?;
        for (key, value) in [
            ("STOREFRONT_FREE_SHIPPING_OVER", free_over),
            ("STOREFRONT_FLAT_SHIPPING", flat_fee),
        ] {
            if value < Decimal::ZERO {
                return Err(ConfigError::InvalidEnvVar(
                    key.to_string(),
                    "must not be negative".to_string(),
                ));
            }
        }

        let timeout_ms: u64 = env.parse_or(
            "STOREFRONT_CATALOG_TIMEOUT_MS",
            u64::try_from(defaults.catalog_timeout.as_millis()).unwrap_or(u64::MAX),
        )?;

        Ok(Self {
            host: env.parse_or("STOREFRONT_HOST", defaults.host)?,
            port: env.parse_or("STOREFRONT_PORT", defaults.port)?,
            catalog_path: env
                .optional("STOREFRONT_CATALOG_PATH")
                .map_or(defaults.catalog_path, PathBuf::from),
            static_dir: env
                .optional("STOREFRONT_STATIC_DIR")
                .map_or(defaults.static_dir, PathBuf::from),
            catalog_timeout: Duration::from_millis(timeout_ms),
            currency: env.parse_or("STOREFRONT_CURRENCY", defaults.currency)?,
            shipping: ShippingPolicy {
                free_over,
                flat_fee,
            },
            mobile_breakpoint_px: env
                .parse_or("STOREFRONT_MOBILE_BREAKPOINT_PX", defaults.mobile_breakpoint_px)?,
            full_video_src: env
                .optional("STOREFRONT_HERO_FULL_VIDEO")
                .unwrap_or(defaults.full_video_src),
            sentry: SentryConfig {
                dsn: env.optional("SENTRY_DSN"),
                environment: env.optional("SENTRY_ENVIRONMENT"),
                sample_rate: env.parse_or("SENTRY_SAMPLE_RATE", defaults.sentry.sample_rate)?,
                traces_sample_rate: env
                    .parse_or("SENTRY_TRACES_SAMPLE_RATE", defaults.sentry.traces_sample_rate)?,
            },
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Settings handed to the browser bundle through the page's data island.
    #[must_use]
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            cart_storage_key: CART_STORAGE_KEY.to_string(),
            shipping: self.shipping,
            mobile_breakpoint_px: self.mobile_breakpoint_px,
            full_video_src: self.full_video_src.clone(),
            currency: self.currency,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable source wrapper.
struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Parse a variable, or use the default when it is unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.catalog_timeout, Duration::from_millis(2500));
        assert_eq!(config.shipping, ShippingPolicy::default());
        assert_eq!(config.mobile_breakpoint_px, 720);
        assert!(config.sentry.dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("STOREFRONT_PORT", "8080"),
            ("STOREFRONT_FREE_SHIPPING_OVER", "200"),
            ("STOREFRONT_FLAT_SHIPPING", "4.50"),
            ("STOREFRONT_CURRENCY", "eur"),
            ("STOREFRONT_CATALOG_TIMEOUT_MS", "100"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.shipping.free_over, Decimal::new(200, 0));
        assert_eq!(config.shipping.flat_fee, Decimal::new(450, 2));
        assert_eq!(config.currency, CurrencyCode::EUR);
        assert_eq!(config.catalog_timeout, Duration::from_millis(100));
    }

    #[test]
    fn test_blank_value_uses_default() {
        let config = config_from(&[("STOREFRONT_PORT", "  ")]).unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("STOREFRONT_PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_negative_shipping_rejected() {
        let err = config_from(&[("STOREFRONT_FLAT_SHIPPING", "-1")]).unwrap_err();
        assert!(err.to_string().contains("STOREFRONT_FLAT_SHIPPING"));
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig::default();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_client_settings_mirror_config() {
        let config = config_from(&[("STOREFRONT_MOBILE_BREAKPOINT_PX", "600")]).unwrap();
        let settings = config.client_settings();
        assert_eq!(settings.mobile_breakpoint_px, 600);
        assert_eq!(settings.cart_storage_key, CART_STORAGE_KEY);
        assert_eq!(settings.shipping, config.shipping);
    }
}
