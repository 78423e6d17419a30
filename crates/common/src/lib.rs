//! Shared types for the catalog provisioning core.
//!
//! Identifier newtypes wrap UUIDs to prevent mixing up the different
//! id spaces (tenants, categories, products, assets), and [`CancelToken`]
//! is the cancellation seam observed at every I/O suspend point.

pub mod cancel;
pub mod types;

pub use cancel::CancelToken;
pub use types::{AssetId, CategoryId, ProductId, StorageKey, TenantId};
