//! HTTP adapter for subscription endpoints.
//!
//! - `POST /api/checkout/session` - Start a hosted checkout
//! - `POST /api/webhooks/stripe` - Handle Stripe webhooks
//! - `GET /api/subscription/status` - Status by email
//! - `GET /api/subscription/verify-session` - Status by checkout session

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{SubscriptionAppState, STRIPE_SIGNATURE_HEADER};
pub use routes::subscription_router;
