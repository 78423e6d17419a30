//! The reconciliation sweep.

use common::CancelToken;
use provisioning::{CatalogRepository, ImageStorage};

use crate::error::ReconciliationError;
use crate::summary::SweepSummary;

/// Deletes the storage objects of unreferenced asset records.
///
/// The repository owns the "unreferenced" decision (including any grace
/// window); this job owns only the mechanics. It never removes the
/// database record (record lifecycle belongs to the repository) and
/// it never aborts the sweep on a per-item failure.
pub struct ReconciliationJob<R, S>
where
    R: CatalogRepository,
    S: ImageStorage,
{
    repository: R,
    storage: S,
    batch_limit: usize,
}

impl<R, S> ReconciliationJob<R, S>
where
    R: CatalogRepository,
    S: ImageStorage,
{
    /// Creates an unbounded sweep job.
    pub fn new(repository: R, storage: S) -> Self {
        Self {
            repository,
            storage,
            batch_limit: 0,
        }
    }

    /// Caps the number of deletes attempted per run. Zero means
    /// unbounded.
    pub fn with_batch_limit(mut self, batch_limit: usize) -> Self {
        self.batch_limit = batch_limit;
        self
    }

    /// Runs one sweep.
    ///
    /// Per-item delete failures are logged with the offending key and
    /// counted; the sweep continues. A cancelled token ends the sweep
    /// early, and items not attempted are not counted. Only a failure
    /// of the listing itself is surfaced.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn run(&self, cancel: &CancelToken) -> Result<SweepSummary, ReconciliationError> {
        metrics::counter!("reconciliation_runs_total").increment(1);
        let sweep_start = std::time::Instant::now();

        let assets = self.repository.list_unreferenced_assets().await?;
        tracing::debug!(candidates = assets.len(), "sweep starting");

        let mut summary = SweepSummary::new();
        for asset in &assets {
            if cancel.is_cancelled() {
                tracing::info!(summary = %summary, "sweep cancelled early");
                break;
            }
            if self.batch_limit != 0 && summary.attempted >= self.batch_limit {
                tracing::debug!(batch_limit = self.batch_limit, "batch limit reached");
                break;
            }

            let key = asset.storage_key();
            match self.storage.delete(&key).await {
                Ok(()) => {
                    summary.note_success();
                    metrics::counter!("reconciliation_deletes_succeeded").increment(1);
                    tracing::debug!(key = %key, asset_id = %asset.id(), "orphaned object deleted");
                }
                Err(err) => {
                    summary.note_failure();
                    metrics::counter!("reconciliation_deletes_failed").increment(1);
                    tracing::warn!(
                        key = %key,
                        asset_id = %asset.id(),
                        error = %err,
                        "orphaned object delete failed, continuing"
                    );
                }
            }
        }

        metrics::histogram!("reconciliation_duration_seconds")
            .record(sweep_start.elapsed().as_secs_f64());
        tracing::info!(summary = %summary, "sweep complete");
        Ok(summary)
    }
}
