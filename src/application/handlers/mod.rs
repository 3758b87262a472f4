//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod subscription;

pub use subscription::{
    CheckoutSettings, CreateCheckoutSessionHandler, GetStatusByEmailHandler,
    GetStatusByEmailQuery, GetStatusByEmailResult, HandlePaymentWebhookCommand,
    HandlePaymentWebhookHandler, VerifyCheckoutSessionHandler, VerifyCheckoutSessionQuery,
    VerifyCheckoutSessionResult, WebhookOutcome,
};
