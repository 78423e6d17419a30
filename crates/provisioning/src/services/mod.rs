//! Collaborator contracts consumed by the saga and the reconciliation
//! sweep, with in-memory implementations for tests.

pub mod publisher;
pub mod repository;
pub mod storage;
pub mod unit_of_work;

pub use publisher::{EventPublisher, InMemoryEventPublisher};
pub use repository::{CatalogRepository, InMemoryCatalogRepository};
pub use storage::{ImageStorage, InMemoryImageStorage};
pub use unit_of_work::{InMemoryUnitOfWork, UnitOfWork};
