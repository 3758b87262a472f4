//! Stripe REST API response shapes.
//!
//! Only the fields the gate reads are modelled; unknown fields are ignored.

use serde::Deserialize;

/// `customer` object, including the stub Stripe returns for deleted customers.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeCustomer {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

/// A field that holds either an id or, when expanded, the full object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Expandable<T> {
    Id(String),
    Object(T),
}

impl<T> Expandable<T> {
    pub fn as_object(&self) -> Option<&T> {
        match self {
            Expandable::Id(_) => None,
            Expandable::Object(object) => Some(object),
        }
    }
}

/// `checkout.session` object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeCheckoutSession {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_details: Option<StripeCustomerDetails>,
    #[serde(default)]
    pub customer: Option<Expandable<StripeCustomer>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeCustomerDetails {
    #[serde(default)]
    pub email: Option<String>,
}

/// Error envelope returned with every non-2xx response.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    pub error: StripeApiError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeApiError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
}
