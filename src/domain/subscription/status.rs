//! Provider subscription lifecycle labels.

use std::fmt;

/// Label written when the provider reports a subscription as deleted.
pub const DELETED_STATUS: &str = "deleted";

/// Subscription lifecycle as reported by the payment provider.
///
/// The gate only acts on [`SubscriptionLifecycle::grants_access`]; the label
/// itself is mirrored into the record for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionLifecycle {
    Active,
    Trialing,
    PastDue,
    Canceled,
    Unpaid,
    Incomplete,
    IncompleteExpired,
    Paused,
    /// A label this crate does not know; kept verbatim.
    Other(String),
}

impl SubscriptionLifecycle {
    /// Parses the provider's `status` string.
    pub fn from_provider(status: &str) -> Self {
        match status {
            "active" => Self::Active,
            "trialing" => Self::Trialing,
            "past_due" => Self::PastDue,
            "canceled" => Self::Canceled,
            "unpaid" => Self::Unpaid,
            "incomplete" => Self::Incomplete,
            "incomplete_expired" => Self::IncompleteExpired,
            "paused" => Self::Paused,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the provider's label for this lifecycle state.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Trialing => "trialing",
            Self::PastDue => "past_due",
            Self::Canceled => "canceled",
            Self::Unpaid => "unpaid",
            Self::Incomplete => "incomplete",
            Self::IncompleteExpired => "incomplete_expired",
            Self::Paused => "paused",
            Self::Other(label) => label,
        }
    }

    /// Only active and trialing subscriptions open the gate.
    pub fn grants_access(&self) -> bool {
        matches!(self, Self::Active | Self::Trialing)
    }
}

impl fmt::Display for SubscriptionLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
