//! Data Transfer Objects for subscription HTTP endpoints.
//!
//! Wire shapes are camelCase JSON; absent optional fields are omitted except
//! where the front end expects an explicit `null`.

use serde::{Deserialize, Serialize};

use crate::application::handlers::subscription::VerifyCheckoutSessionResult;
use crate::domain::foundation::Timestamp;
use crate::domain::subscription::SubscriptionRecord;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// `?email=` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusParams {
    pub email: Option<String>,
}

/// `?session_id=` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifySessionParams {
    pub session_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Status lookup response. An unknown email is just `{"active":false}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl From<Option<SubscriptionRecord>> for StatusResponse {
    fn from(record: Option<SubscriptionRecord>) -> Self {
        match record {
            Some(record) => Self {
                active: record.active,
                email: Some(record.email.into()),
                status: record.status,
                updated_at: Some(record.updated_at),
            },
            None => Self {
                active: false,
                email: None,
                status: None,
                updated_at: None,
            },
        }
    }
}

/// Session verification response; `email` is always present, possibly null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifySessionResponse {
    pub active: bool,
    pub email: Option<String>,
}

impl From<VerifyCheckoutSessionResult> for VerifySessionResponse {
    fn from(result: VerifyCheckoutSessionResult) -> Self {
        Self {
            active: result.active,
            email: result.email.map(String::from),
        }
    }
}

/// Hosted checkout URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub url: String,
}

/// Error body for upstream failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
