//! Surf Gate - subscription gate for the surf forecast dashboard.
//!
//! Records whether a subscriber (keyed by normalized email) currently has
//! access, driven by signed Stripe webhooks, and answers status queries by
//! email or by checkout session.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
