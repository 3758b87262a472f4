//! Subscription query and checkout error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | MissingParameter | 400 |
//! | Provider | 500 |
//! | Storage | 500 |

use thiserror::Error;

/// Errors raised by the status query and checkout operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscriptionError {
    /// A required query parameter was absent or blank.
    #[error("Missing {0}")]
    MissingParameter(&'static str),

    /// The payment provider call failed.
    #[error("{0}")]
    Provider(String),

    /// The status store failed.
    #[error("{0}")]
    Storage(String),
}

impl SubscriptionError {
    /// Creates a provider error.
    pub fn provider(message: impl Into<String>) -> Self {
        SubscriptionError::Provider(message.into())
    }

    /// Creates a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        SubscriptionError::Storage(message.into())
    }

    /// Returns true if the caller sent a bad request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SubscriptionError::MissingParameter(_))
    }
}
