//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (timestamps, validation errors)
//! - `subscription` - Subscriber emails, lifecycle statuses and stored records
//! - `webhook` - Stripe event envelopes and signature verification

pub mod foundation;
pub mod subscription;
pub mod webhook;
