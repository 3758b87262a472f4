//! Stripe webhook event envelope.
//!
//! Only the envelope fields the gate reads are captured; everything else in
//! Stripe's event schema is ignored.

use serde::{Deserialize, Serialize};

/// Stripe webhook event envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEvent {
    /// Unique identifier for the event (evt_xxx format).
    #[serde(default)]
    pub id: String,

    /// Type of event (e.g., "checkout.session.completed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Time at which the event was created (Unix seconds).
    #[serde(default)]
    pub created: i64,

    /// Object the event is about.
    pub data: StripeEventData,

    /// Whether this is a live mode event (vs test mode).
    #[serde(default)]
    pub livemode: bool,

    /// API version used to render this event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
}

/// Container for event-specific data.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    /// The object that triggered the event (shape depends on event type).
    pub object: serde_json::Value,
}

impl StripeEvent {
    /// Returns true if this is a live mode event.
    pub fn is_live(&self) -> bool {
        self.livemode
    }

    /// Attempts to deserialize the data object as the specified type.
    pub fn deserialize_object<T: serde::de::DeserializeOwned>(
        &self,
    ) -> Result<T, serde_json::Error> {
        T::deserialize(&self.data.object)
    }

    /// Parse the event type into a known enum variant.
    pub fn parsed_type(&self) -> StripeEventType {
        StripeEventType::parse(&self.event_type)
    }
}

/// Stripe event types that change subscription state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripeEventType {
    CheckoutSessionCompleted,
    CustomerSubscriptionCreated,
    CustomerSubscriptionUpdated,
    CustomerSubscriptionDeleted,
    /// Anything else; acknowledged without action.
    Unknown,
}

impl StripeEventType {
    /// Parse event type from its wire name.
    pub fn parse(s: &str) -> Self {
        match s {
            "checkout.session.completed" => Self::CheckoutSessionCompleted,
            "customer.subscription.created" => Self::CustomerSubscriptionCreated,
            "customer.subscription.updated" => Self::CustomerSubscriptionUpdated,
            "customer.subscription.deleted" => Self::CustomerSubscriptionDeleted,
            _ => Self::Unknown,
        }
    }

    /// Convert to the Stripe event type string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckoutSessionCompleted => "checkout.session.completed",
            Self::CustomerSubscriptionCreated => "customer.subscription.created",
            Self::CustomerSubscriptionUpdated => "customer.subscription.updated",
            Self::CustomerSubscriptionDeleted => "customer.subscription.deleted",
            Self::Unknown => "unknown",
        }
    }
}
