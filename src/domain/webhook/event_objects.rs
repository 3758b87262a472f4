//! Typed views of the `data.object` payloads the gate acts on.

use serde::Deserialize;

use crate::domain::subscription::{SubscriberEmail, SubscriptionLifecycle};

/// `checkout.session` object as delivered in `checkout.session.completed`.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSessionObject {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub customer_details: Option<CustomerDetails>,
    #[serde(default)]
    pub customer_email: Option<String>,
}

/// Billing details collected on the hosted checkout page.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerDetails {
    #[serde(default)]
    pub email: Option<String>,
}

impl CheckoutSessionObject {
    /// Email entered at checkout, falling back to the prefilled `customer_email`.
    pub fn email(&self) -> Option<SubscriberEmail> {
        self.customer_details
            .as_ref()
            .and_then(|details| SubscriberEmail::from_optional(details.email.as_deref()))
            .or_else(|| SubscriberEmail::from_optional(self.customer_email.as_deref()))
    }
}

/// `subscription` object as delivered in `customer.subscription.*` events.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionObject {
    #[serde(default)]
    pub id: Option<String>,
    pub status: String,
    pub customer: CustomerReference,
}

impl SubscriptionObject {
    pub fn lifecycle(&self) -> SubscriptionLifecycle {
        SubscriptionLifecycle::from_provider(&self.status)
    }
}

/// A customer field: either the bare id or the expanded object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CustomerReference {
    Id(String),
    Expanded {
        id: String,
        #[serde(default)]
        email: Option<String>,
    },
}

impl CustomerReference {
    pub fn id(&self) -> &str {
        match self {
            CustomerReference::Id(id) => id,
            CustomerReference::Expanded { id, .. } => id,
        }
    }
}
