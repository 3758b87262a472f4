//! Subscription record - the single piece of state the gate persists.

use serde::{Deserialize, Serialize};

use super::email::SubscriberEmail;
use super::status::{SubscriptionLifecycle, DELETED_STATUS};
use crate::domain::foundation::Timestamp;

/// Current subscription status for one email.
///
/// Every write replaces the whole record; there is no merge with what was
/// stored before and no history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    /// Normalized email, also the store key.
    pub email: SubscriberEmail,

    /// Whether the subscriber currently has access.
    pub active: bool,

    /// Provider lifecycle label (informational only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// When this record was written.
    pub updated_at: Timestamp,
}

impl SubscriptionRecord {
    /// Record written when a checkout session completes.
    ///
    /// Checkout completion carries no lifecycle label, so `status` stays empty.
    pub fn checkout_completed(email: SubscriberEmail, at: Timestamp) -> Self {
        Self {
            email,
            active: true,
            status: None,
            updated_at: at,
        }
    }

    /// Record written when a subscription is created or updated.
    pub fn from_lifecycle(
        email: SubscriberEmail,
        lifecycle: &SubscriptionLifecycle,
        at: Timestamp,
    ) -> Self {
        Self {
            email,
            active: lifecycle.grants_access(),
            status: Some(lifecycle.as_str().to_string()),
            updated_at: at,
        }
    }

    /// Record written when a subscription is deleted.
    pub fn subscription_deleted(email: SubscriberEmail, at: Timestamp) -> Self {
        Self {
            email,
            active: false,
            status: Some(DELETED_STATUS.to_string()),
            updated_at: at,
        }
    }
}
