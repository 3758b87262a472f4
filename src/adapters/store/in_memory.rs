//! In-memory Subscription Store Adapter
//!
//! Non-persistent; intended for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::subscription::{SubscriberEmail, SubscriptionRecord};
use crate::ports::{StoreError, SubscriptionStore};

/// In-memory map from normalized email to record.
#[derive(Debug, Default)]
pub struct InMemorySubscriptionStore {
    records: RwLock<HashMap<SubscriberEmail, SubscriptionRecord>>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn get(&self, email: &SubscriberEmail) -> Result<Option<SubscriptionRecord>, StoreError> {
        Ok(self.records.read().await.get(email).cloned())
    }

    async fn set(&self, record: &SubscriptionRecord) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .insert(record.email.clone(), record.clone());
        Ok(())
    }
}
