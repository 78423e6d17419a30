//! Provisioning error types.

use common::{CategoryId, StorageKey, TenantId};
use domain::DomainError;
use thiserror::Error;

/// Errors from the repository / unit-of-work collaborator.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The persistence backend rejected or failed the operation.
    #[error("persistence error: {0}")]
    Backend(String),
}

/// Errors from the external image storage collaborator.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Upload of an object failed.
    #[error("upload failed for key '{key}': {reason}")]
    UploadFailed {
        /// The key the upload targeted.
        key: StorageKey,
        /// Backend-reported reason.
        reason: String,
    },

    /// Deletion of an object failed. Deleting an absent key is success,
    /// never this error.
    #[error("delete failed for key '{key}': {reason}")]
    DeleteFailed {
        /// The key the delete targeted.
        key: StorageKey,
        /// Backend-reported reason.
        reason: String,
    },
}

/// Errors from the in-process event publisher.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The publish call itself failed.
    #[error("event publish failed: {0}")]
    Failed(String),
}

/// Errors surfaced by a provisioning saga invocation.
///
/// Every terminal condition is re-raised to the caller after rollback
/// (and compensation, where an asset was uploaded) completes.
#[derive(Debug, Error)]
pub enum ProvisioningError {
    /// The referenced category does not exist for the requesting tenant.
    /// Recoverable by the caller; rollback only, no compensation.
    #[error("category {category_id} not found for tenant {tenant_id}")]
    CategoryNotFound {
        /// The category the request referenced.
        category_id: CategoryId,
        /// The tenant scope of the lookup.
        tenant_id: TenantId,
    },

    /// External storage failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Persistence failure (asset or aggregate write, or commit).
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Aggregate invariant violation.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A cancellation signal was observed; treated as a failure at the
    /// step where it was seen, with the same rollback/compensation rules.
    #[error("operation cancelled during step '{step}'")]
    Cancelled {
        /// The step at which cancellation was observed.
        step: &'static str,
    },
}

/// Convenience type alias for provisioning results.
pub type Result<T> = std::result::Result<T, ProvisioningError>;
