//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SubscriptionStore` - Durable email to status records
//! - `PaymentProvider` - Hosted billing API (customers, checkout sessions)

mod payment_provider;
mod subscription_store;

pub use payment_provider::{
    CheckoutSession, CheckoutSessionDetails, CreateCheckoutRequest, Customer, PaymentError,
    PaymentErrorCode, PaymentProvider,
};
pub use subscription_store::{StoreError, SubscriptionStore};
