//! Payment webhook domain module.
//!
//! # Module Structure
//!
//! - `stripe_event` - Event envelope and recognized event types
//! - `event_objects` - Checkout session and subscription payloads
//! - `webhook_verifier` - Signature verification producing `VerifiedEvent`
//! - `webhook_errors` - Error type with HTTP status mapping

mod event_objects;
mod stripe_event;
mod webhook_errors;
mod webhook_verifier;

pub use event_objects::{CheckoutSessionObject, CustomerDetails, CustomerReference, SubscriptionObject};
pub use stripe_event::{StripeEvent, StripeEventData, StripeEventType};
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{sign_payload, SignatureHeader, StripeWebhookVerifier, VerifiedEvent};
