//! External image storage contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::StorageKey;

use crate::error::StorageError;

/// Opaque blob store for asset bytes.
///
/// Storage is not transaction-aware: an upload is durable the moment it
/// returns. Delete is idempotent (deleting an absent key is success),
/// which is what makes the saga's compensation and the reconciliation
/// sweep safe to overlap without locking.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Uploads bytes under the given key.
    async fn upload(
        &self,
        key: &StorageKey,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Deletes the object under the given key. Deleting an absent key
    /// succeeds.
    async fn delete(&self, key: &StorageKey) -> Result<(), StorageError>;
}

#[derive(Debug, Clone)]
struct StoredObject {
    content_type: String,
    length: usize,
}

#[derive(Debug, Default)]
struct InMemoryStorageState {
    objects: HashMap<StorageKey, StoredObject>,
    uploads: usize,
    delete_attempts: usize,
    fail_on_upload: bool,
    fail_on_delete: bool,
    fail_delete_for: Option<StorageKey>,
}

/// In-memory image storage for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryImageStorage {
    state: Arc<RwLock<InMemoryStorageState>>,
}

impl InMemoryImageStorage {
    /// Creates a new empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures upload calls to fail.
    pub fn set_fail_on_upload(&self, fail: bool) {
        self.state.write().unwrap().fail_on_upload = fail;
    }

    /// Configures all delete calls to fail.
    pub fn set_fail_on_delete(&self, fail: bool) {
        self.state.write().unwrap().fail_on_delete = fail;
    }

    /// Configures delete calls for one specific key to fail.
    pub fn set_fail_delete_for(&self, key: Option<StorageKey>) {
        self.state.write().unwrap().fail_delete_for = key;
    }

    /// Returns the number of stored objects.
    pub fn object_count(&self) -> usize {
        self.state.read().unwrap().objects.len()
    }

    /// Returns true if an object exists under the key.
    pub fn contains(&self, key: &StorageKey) -> bool {
        self.state.read().unwrap().objects.contains_key(key)
    }

    /// Returns the declared content type of a stored object.
    pub fn content_type_of(&self, key: &StorageKey) -> Option<String> {
        self.state
            .read()
            .unwrap()
            .objects
            .get(key)
            .map(|object| object.content_type.clone())
    }

    /// Returns the stored byte length of an object.
    pub fn length_of(&self, key: &StorageKey) -> Option<usize> {
        self.state
            .read()
            .unwrap()
            .objects
            .get(key)
            .map(|object| object.length)
    }

    /// Returns the number of successful uploads.
    pub fn upload_count(&self) -> usize {
        self.state.read().unwrap().uploads
    }

    /// Returns the number of delete attempts, successful or not,
    /// including deletes of absent keys.
    pub fn delete_attempts(&self) -> usize {
        self.state.read().unwrap().delete_attempts
    }
}

#[async_trait]
impl ImageStorage for InMemoryImageStorage {
    async fn upload(
        &self,
        key: &StorageKey,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<(), StorageError> {
        let mut state = self.state.write().unwrap();
        if state.fail_on_upload {
            return Err(StorageError::UploadFailed {
                key: key.clone(),
                reason: "storage backend unavailable".to_string(),
            });
        }
        state.objects.insert(
            key.clone(),
            StoredObject {
                content_type: content_type.to_string(),
                length: bytes.len(),
            },
        );
        state.uploads += 1;
        Ok(())
    }

    async fn delete(&self, key: &StorageKey) -> Result<(), StorageError> {
        let mut state = self.state.write().unwrap();
        state.delete_attempts += 1;
        if state.fail_on_delete || state.fail_delete_for.as_ref() == Some(key) {
            return Err(StorageError::DeleteFailed {
                key: key.clone(),
                reason: "storage backend unavailable".to_string(),
            });
        }
        // Absent key: nothing to do, still success.
        state.objects.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_then_delete() {
        let storage = InMemoryImageStorage::new();
        let key = StorageKey::new("a.png");

        storage.upload(&key, b"pixels", "image/png").await.unwrap();
        assert!(storage.contains(&key));
        assert_eq!(storage.content_type_of(&key).as_deref(), Some("image/png"));
        assert_eq!(storage.length_of(&key), Some(6));

        storage.delete(&key).await.unwrap();
        assert!(!storage.contains(&key));
    }

    #[tokio::test]
    async fn delete_of_absent_key_is_success() {
        let storage = InMemoryImageStorage::new();
        let key = StorageKey::new("missing.png");

        storage.delete(&key).await.unwrap();
        storage.delete(&key).await.unwrap();
        assert_eq!(storage.delete_attempts(), 2);
    }

    #[tokio::test]
    async fn per_key_delete_failure() {
        let storage = InMemoryImageStorage::new();
        let poisoned = StorageKey::new("poisoned.png");
        let fine = StorageKey::new("fine.png");
        storage.upload(&poisoned, b"x", "image/png").await.unwrap();
        storage.upload(&fine, b"y", "image/png").await.unwrap();

        storage.set_fail_delete_for(Some(poisoned.clone()));
        assert!(storage.delete(&poisoned).await.is_err());
        storage.delete(&fine).await.unwrap();

        assert!(storage.contains(&poisoned));
        assert!(!storage.contains(&fine));
    }

    #[tokio::test]
    async fn failed_upload_stores_nothing() {
        let storage = InMemoryImageStorage::new();
        storage.set_fail_on_upload(true);
        let key = StorageKey::new("a.png");

        assert!(storage.upload(&key, b"pixels", "image/png").await.is_err());
        assert_eq!(storage.object_count(), 0);
        assert_eq!(storage.upload_count(), 0);
    }
}
