//! Webhook error types for Stripe webhook handling.
//!
//! Authentication and envelope failures are the sender's problem (4xx, never
//! retried); failures while acting on an authentic event are ours (5xx, the
//! provider redelivers).

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur during webhook processing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// No `Stripe-Signature` header on the request.
    #[error("Missing Stripe-Signature header")]
    MissingSignature,

    /// No `v1` signature matched the payload.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Signature timestamp is older than the tolerance window (5 minutes).
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Signature timestamp is in the future beyond clock skew tolerance.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Failed to parse the signature header or JSON payload.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A test mode event reached a server that only accepts live events.
    #[error("Test mode event rejected")]
    LivemodeMismatch,

    /// Authentic event whose `data.object` lacks what the event type requires.
    #[error("Invalid event object: {0}")]
    InvalidEventObject(String),

    /// Customer lookup against the payment provider failed.
    #[error("{0}")]
    Provider(String),

    /// Status store write failed.
    #[error("{0}")]
    Storage(String),
}

impl WebhookError {
    /// Returns true for failures raised before the event was trusted.
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            WebhookError::MissingSignature
                | WebhookError::InvalidSignature
                | WebhookError::TimestampOutOfRange
                | WebhookError::InvalidTimestamp
                | WebhookError::ParseError(_)
                | WebhookError::LivemodeMismatch
        )
    }

    /// Returns true if the provider redelivering this webhook may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::Provider(_) | WebhookError::Storage(_))
    }

    /// Maps the error to the status code the provider sees.
    pub fn status_code(&self) -> StatusCode {
        if self.is_verification_failure() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
