//! Subscription domain module.
//!
//! Handles the subscriber identity (email), the persisted status record and
//! the mapping from provider lifecycle labels to access.
//!
//! # Module Structure
//!
//! - `email` - SubscriberEmail normalization
//! - `record` - SubscriptionRecord written on every relevant webhook
//! - `status` - SubscriptionLifecycle labels and the access rule
//! - `errors` - Query/checkout errors

mod email;
mod errors;
mod record;
mod status;

pub use email::SubscriberEmail;
pub use errors::SubscriptionError;
pub use record::SubscriptionRecord;
pub use status::{SubscriptionLifecycle, DELETED_STATUS};
