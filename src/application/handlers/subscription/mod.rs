//! Subscription handlers.
//!
//! ## Commands
//! - Processing payment webhooks
//! - Creating checkout sessions
//!
//! ## Queries
//! - Status by email
//! - Status by checkout session

mod create_checkout_session;
mod get_status_by_email;
mod handle_payment_webhook;
mod verify_checkout_session;

// Commands
pub use create_checkout_session::{CheckoutSettings, CreateCheckoutSessionHandler};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, WebhookOutcome,
};

// Queries
pub use get_status_by_email::{
    GetStatusByEmailHandler, GetStatusByEmailQuery, GetStatusByEmailResult,
};
pub use verify_checkout_session::{
    VerifyCheckoutSessionHandler, VerifyCheckoutSessionQuery, VerifyCheckoutSessionResult,
};
