//! Periodic reconciliation of external image storage.
//!
//! The provisioning saga keeps a relational store and a blob store
//! consistent transactionally where it can, and by compensation where it
//! can't. Whatever drift survives (compensation publish lost, process
//! death between upload and commit, assets explicitly marked for
//! deletion) is repaired here: a periodic sweep deletes the storage
//! objects of asset records nobody references anymore.
//!
//! The sweep is continue-on-error and idempotent (deleting an
//! already-absent key counts as success), so it is safe to overlap with
//! in-flight sagas and with itself.

pub mod config;
pub mod error;
pub mod job;
pub mod scheduler;
pub mod summary;

pub use config::ReconcilerConfig;
pub use error::ReconciliationError;
pub use job::ReconciliationJob;
pub use scheduler::run_periodically;
pub use summary::SweepSummary;
