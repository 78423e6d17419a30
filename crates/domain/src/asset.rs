//! Image asset record.

use chrono::{DateTime, Utc};
use common::{AssetId, StorageKey, TenantId};
use serde::{Deserialize, Serialize};
use specification::{FieldValue, FilterRecord, Identified, MaybeTenantScoped};
use uuid::Uuid;

/// Metadata for a binary asset whose bytes live in external storage.
///
/// The record and the external object are allowed to drift transiently:
/// the record's marked-for-deletion state is a signal, and convergence
/// (actually removing the bytes) belongs to the reconciliation sweep or
/// the provisioning saga's compensation path. Nothing here touches
/// storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAsset {
    id: AssetId,
    file_name: String,
    extension: String,
    content_type: String,
    length: u64,
    tenant_id: Option<TenantId>,
    marked_for_deletion: bool,
    deletion_marked_at: Option<DateTime<Utc>>,
}

impl ImageAsset {
    /// Creates an asset record for an uploaded binary.
    ///
    /// The extension is derived from the original file name (text after
    /// the last dot, lower-cased; empty if the name has no dot).
    pub fn new(
        id: AssetId,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        length: u64,
        tenant_id: Option<TenantId>,
    ) -> Self {
        let file_name = file_name.into();
        let extension = extension_of(&file_name);
        Self {
            id,
            file_name,
            extension,
            content_type: content_type.into(),
            length,
            tenant_id,
            marked_for_deletion: false,
            deletion_marked_at: None,
        }
    }

    /// Returns the asset identifier.
    pub fn id(&self) -> AssetId {
        self.id
    }

    /// Returns the original file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the derived extension (may be empty).
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Returns the declared content type.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the byte length.
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Returns the owning tenant, if the asset is tenant-owned.
    pub fn tenant_id(&self) -> Option<TenantId> {
        self.tenant_id
    }

    /// Returns true once the asset has been marked for deletion.
    pub fn is_marked_for_deletion(&self) -> bool {
        self.marked_for_deletion
    }

    /// Returns when the asset was marked for deletion, if it has been.
    pub fn deletion_marked_at(&self) -> Option<DateTime<Utc>> {
        self.deletion_marked_at
    }

    /// Marks the asset as no longer referenced by any aggregate.
    ///
    /// An explicit domain operation, not a destructor. Idempotent: the
    /// first mark's timestamp is kept.
    pub fn mark_for_deletion(&mut self, now: DateTime<Utc>) {
        if !self.marked_for_deletion {
            self.marked_for_deletion = true;
            self.deletion_marked_at = Some(now);
        }
    }

    /// Returns the storage key the asset's bytes live under.
    pub fn storage_key(&self) -> StorageKey {
        StorageKey::for_asset(self.id, &self.extension)
    }
}

fn extension_of(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((prefix, ext)) if !prefix.is_empty() && !ext.is_empty() => {
            ext.to_ascii_lowercase()
        }
        _ => String::new(),
    }
}

impl Identified for ImageAsset {
    fn id(&self) -> Uuid {
        self.id.as_uuid()
    }
}

impl MaybeTenantScoped for ImageAsset {
    fn tenant_id(&self) -> Option<TenantId> {
        self.tenant_id
    }
}

impl FilterRecord for ImageAsset {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => FieldValue::Uuid(self.id.as_uuid()),
            "file_name" => FieldValue::Text(self.file_name.clone()),
            "tenant_id" => FieldValue::OptionalUuid(self.tenant_id.map(TenantId::into)),
            "marked_for_deletion" => FieldValue::Bool(self.marked_for_deletion),
            _ => FieldValue::Missing,
        }
    }
}
