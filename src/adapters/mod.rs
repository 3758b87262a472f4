//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `store` - Subscription store backends (memory, file, Redis)
//! - `stripe` - Stripe REST client and a scriptable mock
//! - `http` - Axum routes, handlers and middleware

pub mod http;
pub mod store;
pub mod stripe;

pub use http::{app_router, apply_middleware, SubscriptionAppState};
pub use store::{FileSubscriptionStore, InMemorySubscriptionStore, RedisSubscriptionStore};
pub use stripe::{MockPaymentProvider, StripeConfig, StripePaymentAdapter};
