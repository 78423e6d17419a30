//! Saga pattern implementation for product provisioning.
//!
//! Creating a catalog product spans a relational transaction and a
//! non-transactional external resource (binary image storage). This crate
//! orchestrates that creation as a linear saga:
//!
//! 1. Verify the referenced category exists for the requesting tenant
//! 2. Upload the binary asset to external storage (if the request has one)
//! 3. Persist the asset record within the open transaction
//! 4. Persist the product aggregate
//! 5. Commit
//!
//! If any step after a successful upload fails, the saga publishes a
//! single [`AssetCleanupRequested`] compensation event so the uploaded
//! bytes get deleted, then rolls the transaction back and re-raises the
//! original failure.

pub mod coordinator;
pub mod error;
pub mod events;
pub mod services;
pub mod state;
pub mod steps;

pub use coordinator::{CreateProductRequest, ImagePayload, ProvisionedProduct, ProvisioningSaga};
pub use error::{ProvisioningError, PublishError, RepositoryError, StorageError};
pub use events::{AssetCleanupHandler, AssetCleanupRequested};
pub use services::{
    CatalogRepository, EventPublisher, ImageStorage, InMemoryCatalogRepository,
    InMemoryEventPublisher, InMemoryImageStorage, InMemoryUnitOfWork, UnitOfWork,
};
pub use state::SagaState;
