//! Periodic trigger for the reconciliation job.
//!
//! The host owns scheduling; this loop is the thinnest possible trigger:
//! it only ever invokes [`ReconciliationJob::run`] and stops when the
//! token is cancelled. The sweep algorithm knows nothing about it.

use common::CancelToken;
use provisioning::{CatalogRepository, ImageStorage};
use tokio::time::MissedTickBehavior;

use crate::config::ReconcilerConfig;
use crate::job::ReconciliationJob;

/// Runs the job on the configured interval until the token is cancelled.
///
/// The first run happens immediately. Run errors are logged and do not
/// stop the loop; the next tick retries. Cancellation is observed at
/// tick boundaries and inside a running sweep (the job checks the same
/// token between items).
pub async fn run_periodically<R, S>(
    job: ReconciliationJob<R, S>,
    config: ReconcilerConfig,
    cancel: CancelToken,
) where
    R: CatalogRepository,
    S: ImageStorage,
{
    let mut ticker = tokio::time::interval(config.interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if cancel.is_cancelled() {
            tracing::info!("reconciliation scheduler stopping");
            break;
        }

        match job.run(&cancel).await {
            Ok(summary) => {
                tracing::info!(summary = %summary, "scheduled sweep finished");
            }
            Err(err) => {
                tracing::error!(error = %err, "scheduled sweep failed");
            }
        }
    }
}
