//! Subscription store adapters.
//!
//! - `InMemorySubscriptionStore` - tests and local development
//! - `FileSubscriptionStore` - single-node deployments
//! - `RedisSubscriptionStore` - shared deployments

mod file;
mod in_memory;
mod redis;

pub use file::FileSubscriptionStore;
pub use in_memory::InMemorySubscriptionStore;
pub use self::redis::{RedisSubscriptionStore, DEFAULT_NAMESPACE};
