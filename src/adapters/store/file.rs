//! File-based Subscription Store Adapter
//!
//! One JSON document per subscriber. File names are the hex SHA-256 of the
//! normalized email, so the directory never leaks addresses and every email
//! maps to a valid file name. Each write lands in its own uniquely named temp
//! file in the same directory and is renamed into place, so concurrent writers
//! for one email never share a temp path and readers never see a half-written
//! record.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;

use crate::domain::subscription::{SubscriberEmail, SubscriptionRecord};
use crate::ports::{StoreError, SubscriptionStore};

/// File-based storage for subscription records.
#[derive(Debug, Clone)]
pub struct FileSubscriptionStore {
    base_path: PathBuf,
}

impl FileSubscriptionStore {
    /// Create a new file store rooted at `base_path`.
    ///
    /// The directory is created on first write.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn record_path(&self, email: &SubscriberEmail) -> PathBuf {
        let digest = Sha256::digest(email.as_str().as_bytes());
        self.base_path.join(format!("{}.json", hex::encode(digest)))
    }
}

#[async_trait]
impl SubscriptionStore for FileSubscriptionStore {
    async fn get(&self, email: &SubscriberEmail) -> Result<Option<SubscriptionRecord>, StoreError> {
        let path = self.record_path(email);

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Deserialization(e.to_string()))?;
        Ok(Some(record))
    }

    async fn set(&self, record: &SubscriptionRecord) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base_path).await?;

        let json = serde_json::to_vec(record)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let path = self.record_path(&record.email);
        let dir = self.base_path.clone();

        tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
            let mut tmp = NamedTempFile::new_in(&dir)?;
            tmp.write_all(&json)?;
            tmp.as_file().sync_all()?;
            tmp.persist(&path).map_err(|e| StoreError::from(e.error))?;
            Ok(())
        })
        .await
        .map_err(|e| StoreError::Io(e.to_string()))?
    }
}
