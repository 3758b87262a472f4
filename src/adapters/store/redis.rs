//! Redis-backed Subscription Store Adapter for shared deployments.
//!
//! Each record is a JSON string at `<namespace>:<email>`.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::subscription::{SubscriberEmail, SubscriptionRecord};
use crate::ports::{StoreError, SubscriptionStore};

/// Default key namespace.
pub const DEFAULT_NAMESPACE: &str = "subs";

/// Redis-backed subscription store.
#[derive(Clone)]
pub struct RedisSubscriptionStore {
    conn: MultiplexedConnection,
    namespace: String,
}

impl RedisSubscriptionStore {
    /// Create a new store using the default namespace.
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self {
            conn,
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }

    /// Opens a multiplexed connection to `redis_url`.
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let conn = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self::new(conn))
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    fn key(&self, email: &SubscriberEmail) -> String {
        record_key(&self.namespace, email)
    }
}

fn record_key(namespace: &str, email: &SubscriberEmail) -> String {
    format!("{}:{}", namespace, email)
}

#[async_trait]
impl SubscriptionStore for RedisSubscriptionStore {
    async fn get(&self, email: &SubscriberEmail) -> Result<Option<SubscriptionRecord>, StoreError> {
        let mut conn = self.conn.clone();

        let raw: Option<String> = conn
            .get(self.key(email))
            .await
            .map_err(|e: redis::RedisError| StoreError::Unavailable(e.to_string()))?;

        raw.map(|json| {
            serde_json::from_str(&json).map_err(|e| StoreError::Deserialization(e.to_string()))
        })
        .transpose()
    }

    async fn set(&self, record: &SubscriptionRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string(record)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(self.key(&record.email), json)
            .await
            .map_err(|e: redis::RedisError| StoreError::Unavailable(e.to_string()))?;

        Ok(())
    }
}
