//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Payment configuration (Stripe)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key
    pub stripe_api_key: SecretString,

    /// Stripe webhook signing secret
    pub stripe_webhook_secret: SecretString,

    /// Recurring price sold at checkout
    pub stripe_price_id: String,

    /// Public URL of the front end; checkout redirects back here
    pub app_base_url: String,

    /// Stripe API base URL (overridable for tests and proxies)
    #[serde(default = "default_api_base_url")]
    pub stripe_api_base_url: String,

    /// Reject webhook events not sent in live mode
    #[serde(default)]
    pub require_livemode: bool,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key.expose_secret().starts_with("sk_test_")
    }

    /// Check if using Stripe live mode
    pub fn is_live_mode(&self) -> bool {
        self.stripe_api_key.expose_secret().starts_with("sk_live_")
    }

    /// App base URL without a trailing slash
    pub fn app_base_url(&self) -> &str {
        self.app_base_url.trim_end_matches('/')
    }

    /// Validate payment configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let api_key = self.stripe_api_key.expose_secret();
        let webhook_secret = self.stripe_webhook_secret.expose_secret();

        if api_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_API_KEY"));
        }
        if webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_WEBHOOK_SECRET"));
        }
        if self.stripe_price_id.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_PRICE_ID"));
        }
        if self.app_base_url.is_empty() {
            return Err(ValidationError::MissingRequired("APP_BASE_URL"));
        }

        // Verify key prefixes for safety
        if !api_key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }
        if !self.stripe_price_id.starts_with("price_") {
            return Err(ValidationError::InvalidStripePriceId);
        }

        if !is_http_url(&self.app_base_url) {
            return Err(ValidationError::InvalidUrl("APP_BASE_URL"));
        }
        if *environment == Environment::Production && !self.app_base_url.starts_with("https://") {
            return Err(ValidationError::AppUrlMustBeHttps);
        }
        if !is_http_url(&self.stripe_api_base_url) {
            return Err(ValidationError::InvalidUrl("STRIPE_API_BASE_URL"));
        }

        Ok(())
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn default_api_base_url() -> String {
    "https://api.stripe.com".to_string()
}
