//! Compensation event and its storage-deletion handler.

use chrono::{DateTime, Utc};
use common::{AssetId, StorageKey};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::services::ImageStorage;

/// Request to delete a stored asset that no committed transaction
/// accounts for.
///
/// Published by the provisioning saga when a step after a successful
/// upload fails; the saga never calls storage delete from its own
/// failure path. Delivery is at-least-once, so handling must be
/// idempotent (storage deletes are).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetCleanupRequested {
    /// The asset record the upload belonged to.
    pub asset_id: AssetId,
    /// The storage key to delete.
    pub storage_key: StorageKey,
    /// When the cleanup was requested.
    pub requested_at: DateTime<Utc>,
}

impl AssetCleanupRequested {
    /// The event type identifier.
    pub const EVENT_TYPE: &'static str = "AssetCleanupRequested";

    /// Creates a cleanup request stamped with the current time.
    pub fn new(asset_id: AssetId, storage_key: StorageKey) -> Self {
        Self {
            asset_id,
            storage_key,
            requested_at: Utc::now(),
        }
    }
}

/// Consumes [`AssetCleanupRequested`] events by issuing the idempotent
/// storage delete.
///
/// This is the downstream half of the saga's compensation: wired to the
/// event publisher by the host, and reusable by operator tooling that
/// needs to force-delete a key.
pub struct AssetCleanupHandler<S: ImageStorage> {
    storage: S,
}

impl<S: ImageStorage> AssetCleanupHandler<S> {
    /// Creates a handler over the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Deletes the event's storage key. Deleting an already-absent key
    /// succeeds, so redelivery is harmless.
    #[tracing::instrument(skip(self), fields(key = %event.storage_key))]
    pub async fn handle(&self, event: &AssetCleanupRequested) -> Result<(), StorageError> {
        self.storage.delete(&event.storage_key).await?;
        tracing::info!(asset_id = %event.asset_id, "compensation delete applied");
        metrics::counter!("provisioning_compensation_deletes_total").increment(1);
        Ok(())
    }
}
