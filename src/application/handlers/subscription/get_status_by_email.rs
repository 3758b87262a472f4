//! GetStatusByEmailHandler - Query handler for a subscriber's status.

use std::sync::Arc;

use crate::domain::subscription::{SubscriberEmail, SubscriptionError, SubscriptionRecord};
use crate::ports::SubscriptionStore;

/// Query by raw, caller-supplied email.
#[derive(Debug, Clone, Default)]
pub struct GetStatusByEmailQuery {
    pub email: Option<String>,
}

/// `None` means the email was never recorded, which reads as inactive.
pub type GetStatusByEmailResult = Option<SubscriptionRecord>;

/// Handler for status lookups by email.
pub struct GetStatusByEmailHandler {
    store: Arc<dyn SubscriptionStore>,
}

impl GetStatusByEmailHandler {
    pub fn new(store: Arc<dyn SubscriptionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: GetStatusByEmailQuery,
    ) -> Result<GetStatusByEmailResult, SubscriptionError> {
        let email = SubscriberEmail::from_optional(query.email.as_deref())
            .ok_or(SubscriptionError::MissingParameter("email"))?;

        self.store
            .get(&email)
            .await
            .map_err(|e| SubscriptionError::storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::InMemorySubscriptionStore;
    use crate::domain::foundation::Timestamp;
    use crate::domain::subscription::SubscriptionLifecycle;
    use crate::ports::StoreError;
    use async_trait::async_trait;

    struct FailingStore;

    #[async_trait]
    impl SubscriptionStore for FailingStore {
        async fn get(
            &self,
            _email: &SubscriberEmail,
        ) -> Result<Option<SubscriptionRecord>, StoreError> {
            Err(StoreError::Io("permission denied".to_string()))
        }

        async fn set(&self, _record: &SubscriptionRecord) -> Result<(), StoreError> {
            Err(StoreError::Io("permission denied".to_string()))
        }
    }

    fn query(email: Option<&str>) -> GetStatusByEmailQuery {
        GetStatusByEmailQuery {
            email: email.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn missing_or_blank_email_is_rejected() {
        let handler = GetStatusByEmailHandler::new(Arc::new(InMemorySubscriptionStore::new()));

        assert_eq!(
            handler.handle(query(None)).await,
            Err(SubscriptionError::MissingParameter("email"))
        );
        assert_eq!(
            handler.handle(query(Some("   "))).await,
            Err(SubscriptionError::MissingParameter("email"))
        );
    }

    #[tokio::test]
    async fn never_seen_email_has_no_record() {
        let handler = GetStatusByEmailHandler::new(Arc::new(InMemorySubscriptionStore::new()));

        assert_eq!(handler.handle(query(Some("new@example.com"))).await, Ok(None));
    }

    #[tokio::test]
    async fn lookup_is_case_insensitive() {
        let store = Arc::new(InMemorySubscriptionStore::new());
        let record = SubscriptionRecord::from_lifecycle(
            SubscriberEmail::parse("a@b.com").unwrap(),
            &SubscriptionLifecycle::Active,
            Timestamp::now(),
        );
        store.set(&record).await.unwrap();
        let handler = GetStatusByEmailHandler::new(store);

        let result = handler.handle(query(Some("  A@B.COM "))).await.unwrap();

        assert_eq!(result, Some(record));
    }

    #[tokio::test]
    async fn store_failure_is_storage_error() {
        let handler = GetStatusByEmailHandler::new(Arc::new(FailingStore));

        let result = handler.handle(query(Some("a@b.com"))).await;

        assert_eq!(
            result,
            Err(SubscriptionError::Storage("IO error: permission denied".to_string()))
        );
    }
}
