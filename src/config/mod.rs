//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SURF_GATE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use surf_gate::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod error;
mod payment;
mod server;
mod store;

pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};
pub use store::{StoreBackend, StoreConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (bind address, logging, timeouts, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Payment configuration (Stripe)
    pub payment: PaymentConfig,

    /// Subscription store backend
    #[serde(default)]
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SURF_GATE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SURF_GATE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `SURF_GATE__PAYMENT__STRIPE_API_KEY=...` -> `payment.stripe_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("SURF_GATE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.payment.validate(&self.server.environment)?;
        self.store.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "SURF_GATE__PAYMENT__STRIPE_API_KEY",
        "SURF_GATE__PAYMENT__STRIPE_WEBHOOK_SECRET",
        "SURF_GATE__PAYMENT__STRIPE_PRICE_ID",
        "SURF_GATE__PAYMENT__APP_BASE_URL",
        "SURF_GATE__PAYMENT__REQUIRE_LIVEMODE",
        "SURF_GATE__SERVER__PORT",
        "SURF_GATE__SERVER__ENVIRONMENT",
        "SURF_GATE__STORE__BACKEND",
        "SURF_GATE__STORE__REDIS_URL",
    ];

    /// Helper to set environment variables for testing
    fn set_minimal_env() {
        env::set_var("SURF_GATE__PAYMENT__STRIPE_API_KEY", "sk_test_xxx");
        env::set_var("SURF_GATE__PAYMENT__STRIPE_WEBHOOK_SECRET", "whsec_xxx");
        env::set_var("SURF_GATE__PAYMENT__STRIPE_PRICE_ID", "price_xxx");
        env::set_var("SURF_GATE__PAYMENT__APP_BASE_URL", "http://localhost:5173");
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        set_minimal_env();
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let result = load_with(&[]);

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.payment.stripe_api_key.expose_secret(), "sk_test_xxx");
        assert_eq!(config.payment.stripe_price_id, "price_xxx");
        assert_eq!(config.payment.stripe_api_base_url, "https://api.stripe.com");
        assert!(!config.payment.require_livemode);
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.store.backend, StoreBackend::File);
    }

    #[test]
    fn test_missing_payment_section_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert!(AppConfig::load().is_err());
    }

    #[test]
    fn test_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("SURF_GATE__SERVER__PORT", "3000"),
            ("SURF_GATE__PAYMENT__REQUIRE_LIVEMODE", "true"),
            ("SURF_GATE__STORE__BACKEND", "redis"),
            ("SURF_GATE__STORE__REDIS_URL", "redis://localhost:6379"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert!(config.payment.require_livemode);
        assert_eq!(config.store.backend, StoreBackend::Redis);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_requires_https_app_url() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[("SURF_GATE__SERVER__ENVIRONMENT", "production")]).unwrap();

        assert!(config.is_production());
        assert_eq!(config.validate(), Err(ValidationError::AppUrlMustBeHttps));
    }
}
