//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` trait for the Stripe REST API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(api_key);
//! let adapter = StripePaymentAdapter::new(config);
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::ports::{
    CheckoutSession, CheckoutSessionDetails, CreateCheckoutRequest, Customer, PaymentError,
    PaymentErrorCode, PaymentProvider,
};

use super::api_types::{StripeCheckoutSession, StripeCustomer, StripeErrorResponse};

/// Production Stripe API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Stripe payment provider adapter.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    /// Create a new Stripe adapter with the given configuration.
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Builds `<base>/<segments...>`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url, PaymentError> {
        let mut url = reqwest::Url::parse(&self.config.api_base_url)
            .map_err(|e| PaymentError::invalid_request(format!("invalid Stripe base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| PaymentError::invalid_request("invalid Stripe base URL"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, PaymentError> {
        request
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, PaymentError> {
        response
            .json()
            .await
            .map_err(|e| PaymentError::provider(format!("Failed to parse Stripe response: {}", e)))
    }
}

/// Converts a non-2xx Stripe response into a `PaymentError`.
///
/// Stripe's own `error.message` is kept verbatim; it is what callers report.
async fn error_from_response(response: reqwest::Response) -> PaymentError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let api_error = serde_json::from_str::<StripeErrorResponse>(&body)
        .ok()
        .map(|envelope| envelope.error);

    let code = match status.as_u16() {
        401 | 403 => PaymentErrorCode::AuthenticationError,
        404 => PaymentErrorCode::NotFound,
        429 => PaymentErrorCode::RateLimitExceeded,
        400 | 402 => PaymentErrorCode::InvalidRequest,
        _ => PaymentErrorCode::ProviderError,
    };

    tracing::warn!(
        %status,
        stripe_code = ?api_error.as_ref().and_then(|e| e.code.as_deref()),
        stripe_error_type = ?api_error.as_ref().and_then(|e| e.error_type.as_deref()),
        "Stripe API request failed"
    );

    let message = api_error
        .and_then(|e| e.message)
        .unwrap_or_else(|| format!("Stripe API error ({})", status));

    PaymentError::new(code, message)
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn retrieve_customer(
        &self,
        customer_id: &str,
    ) -> Result<Option<Customer>, PaymentError> {
        let url = self.endpoint(&["v1", "customers", customer_id])?;

        let response = self.send(self.http_client.get(url)).await?;

        // An unknown id is an error; only a deleted customer reads as "no email".
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let stripe_customer: StripeCustomer = Self::parse_json(response).await?;

        if stripe_customer.deleted {
            return Ok(None);
        }

        Ok(Some(Customer {
            id: stripe_customer.id,
            email: stripe_customer.email,
        }))
    }

    async fn retrieve_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSessionDetails, PaymentError> {
        let url = self.endpoint(&["v1", "checkout", "sessions", session_id])?;

        let response = self
            .send(self.http_client.get(url).query(&[("expand[]", "customer")]))
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let session: StripeCheckoutSession = Self::parse_json(response).await?;

        let customer_object_email = session
            .customer
            .as_ref()
            .and_then(|customer| customer.as_object())
            .filter(|customer| !customer.deleted)
            .and_then(|customer| customer.email.clone());

        Ok(CheckoutSessionDetails {
            id: session.id,
            customer_details_email: session.customer_details.and_then(|details| details.email),
            customer_email: session.customer_email,
            customer_object_email,
        })
    }

    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let url = self.endpoint(&["v1", "checkout", "sessions"])?;

        let params = [
            ("mode", "subscription".to_string()),
            ("line_items[0][price]", request.price_id),
            ("line_items[0][quantity]", "1".to_string()),
            ("success_url", request.success_url),
            ("cancel_url", request.cancel_url),
        ];

        let response = self.send(self.http_client.post(url).form(&params)).await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let session: StripeCheckoutSession = Self::parse_json(response).await?;

        let url = session
            .url
            .ok_or_else(|| PaymentError::provider("Stripe returned a checkout session without a URL"))?;

        Ok(CheckoutSession {
            id: session.id,
            url,
        })
    }
}
