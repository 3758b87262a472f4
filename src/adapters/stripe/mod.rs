//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port against the Stripe REST API:
//! - Customer lookup
//! - Checkout session retrieval (customer expanded)
//! - Checkout session creation
//!
//! The API key is held in a `secrecy::SecretString` and sent as HTTP basic
//! auth. Webhook signature checks live in `domain::webhook`.

mod api_types;
mod mock_payment_provider;
mod stripe_adapter;

pub use api_types::{
    Expandable, StripeApiError, StripeCheckoutSession, StripeCustomer, StripeCustomerDetails,
    StripeErrorResponse,
};
pub use mock_payment_provider::{MethodCall, MockPaymentProvider};
pub use stripe_adapter::{StripeConfig, StripePaymentAdapter, DEFAULT_API_BASE_URL};
