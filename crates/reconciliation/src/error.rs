//! Reconciliation error types.

use provisioning::RepositoryError;
use thiserror::Error;

/// Errors a sweep surfaces to its scheduler.
///
/// Per-item storage failures are never surfaced; they are logged,
/// counted in the summary, and retried implicitly by the next run.
#[derive(Debug, Error)]
pub enum ReconciliationError {
    /// The unreferenced-asset listing itself failed; no sweep happened.
    #[error("failed to list unreferenced assets: {0}")]
    Listing(#[from] RepositoryError),
}
