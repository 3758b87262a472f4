//! Payment provider port for the hosted billing API.
//!
//! The gate never owns customer or subscription truth; it asks the provider
//! three things: who a customer is, which email a checkout session belongs
//! to, and for a new hosted checkout page.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::subscription::SubscriberEmail;

/// Port for payment provider integrations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Get customer by provider ID.
    ///
    /// Returns `None` if the customer does not exist or has been deleted.
    async fn retrieve_customer(&self, customer_id: &str)
        -> Result<Option<Customer>, PaymentError>;

    /// Get a checkout session with its customer expanded.
    async fn retrieve_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSessionDetails, PaymentError>;

    /// Create a hosted checkout session for a recurring subscription.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;
}

/// Customer in the payment system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Provider's customer ID.
    pub id: String,

    /// Customer email, if the provider has one on file.
    pub email: Option<String>,
}

/// The email-bearing parts of a retrieved checkout session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionDetails {
    /// Provider's session ID.
    pub id: String,

    /// Email entered on the checkout page.
    pub customer_details_email: Option<String>,

    /// Email prefilled when the session was created.
    pub customer_email: Option<String>,

    /// Email of the expanded customer object.
    pub customer_object_email: Option<String>,
}

impl CheckoutSessionDetails {
    /// First usable email: checkout page, then prefill, then customer record.
    pub fn resolved_email(&self) -> Option<SubscriberEmail> {
        [
            &self.customer_details_email,
            &self.customer_email,
            &self.customer_object_email,
        ]
        .into_iter()
        .find_map(|candidate| SubscriberEmail::from_optional(candidate.as_deref()))
    }
}

/// Request to create a checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Recurring price to subscribe to.
    pub price_id: String,

    /// URL to redirect after successful checkout.
    pub success_url: String,

    /// URL to redirect after canceled checkout.
    pub cancel_url: String,
}

/// Checkout session for payment completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session ID.
    pub id: String,

    /// URL for customer to complete checkout.
    pub url: String,
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message.
    pub message: String,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::AuthenticationError, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidRequest, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }

    /// Create a not found error.
    pub fn not_found(resource: &str) -> Self {
        Self::new(PaymentErrorCode::NotFound, format!("{} not found", resource))
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// API authentication failed.
    AuthenticationError,

    /// Resource not found.
    NotFound,

    /// Rate limit exceeded.
    RateLimitExceeded,

    /// Request rejected as malformed by the provider.
    InvalidRequest,

    /// Provider API error.
    ProviderError,
}

impl PaymentErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PaymentErrorCode::NetworkError
                | PaymentErrorCode::RateLimitExceeded
                | PaymentErrorCode::ProviderError
        )
    }
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::NotFound => "not_found",
            PaymentErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            PaymentErrorCode::InvalidRequest => "invalid_request",
            PaymentErrorCode::ProviderError => "provider_error",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn PaymentProvider) {}
    }

    #[test]
    fn payment_error_retryable() {
        assert!(PaymentErrorCode::NetworkError.is_retryable());
        assert!(PaymentErrorCode::RateLimitExceeded.is_retryable());
        assert!(PaymentErrorCode::ProviderError.is_retryable());

        assert!(!PaymentErrorCode::AuthenticationError.is_retryable());
        assert!(!PaymentErrorCode::NotFound.is_retryable());
        assert!(!PaymentErrorCode::InvalidRequest.is_retryable());
    }

    #[test]
    fn payment_error_display() {
        let err = PaymentError::invalid_request("No such price: 'price_x'");
        assert_eq!(err.to_string(), "invalid_request: No such price: 'price_x'");
    }

    #[test]
    fn resolved_email_prefers_checkout_page_entry() {
        let details = CheckoutSessionDetails {
            id: "cs_1".to_string(),
            customer_details_email: Some("Page@Example.com".to_string()),
            customer_email: Some("prefill@example.com".to_string()),
            customer_object_email: Some("customer@example.com".to_string()),
        };
        assert_eq!(details.resolved_email().unwrap().as_str(), "page@example.com");
    }

    #[test]
    fn resolved_email_falls_through_blank_candidates() {
        let details = CheckoutSessionDetails {
            id: "cs_1".to_string(),
            customer_details_email: Some("  ".to_string()),
            customer_email: None,
            customer_object_email: Some("Customer@Example.com".to_string()),
        };
        assert_eq!(
            details.resolved_email().unwrap().as_str(),
            "customer@example.com"
        );
    }

    #[test]
    fn resolved_email_none_when_nothing_known() {
        let details = CheckoutSessionDetails {
            id: "cs_1".to_string(),
            ..Default::default()
        };
        assert!(details.resolved_email().is_none());
    }
}
