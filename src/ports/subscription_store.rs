//! Subscription Store Port - durable email → status mapping.
//!
//! Single-key reads and whole-record writes only. Adapters must give
//! read-your-writes for one key; nothing spans keys.

use async_trait::async_trait;

use crate::domain::subscription::{SubscriberEmail, SubscriptionRecord};

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to serialize record: {0}")]
    Serialization(String),

    #[error("Failed to deserialize record: {0}")]
    Deserialization(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

/// Port for reading and writing subscription records.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Returns the record for `email`, or `None` if it was never written.
    async fn get(&self, email: &SubscriberEmail) -> Result<Option<SubscriptionRecord>, StoreError>;

    /// Replaces the record stored under `record.email`.
    async fn set(&self, record: &SubscriptionRecord) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn SubscriptionStore) {}
    }

    #[test]
    fn io_errors_convert() {
        let err: StoreError = std::io::Error::new(std::io::ErrorKind::Other, "disk gone").into();
        assert_eq!(err.to_string(), "IO error: disk gone");
    }
}
