//! Reconciler configuration loaded from environment variables.

use std::time::Duration;

/// Scheduler configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RECONCILE_INTERVAL_SECS`: seconds between sweeps (default: `300`)
/// - `RECONCILE_BATCH_LIMIT`: max deletes per run, `0` = unbounded
///   (default: `0`)
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    pub interval_secs: u64,
    pub batch_limit: usize,
}

impl ReconcilerConfig {
    /// Loads configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        Self {
            interval_secs: std::env::var("RECONCILE_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            batch_limit: std::env::var("RECONCILE_BATCH_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }

    /// Returns the sweep interval as a `Duration`.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            interval_secs: 300,
            batch_limit: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ReconcilerConfig::default();
        assert_eq!(config.interval_secs, 300);
        assert_eq!(config.batch_limit, 0);
    }

    #[test]
    fn test_interval_conversion() {
        let config = ReconcilerConfig {
            interval_secs: 60,
            batch_limit: 10,
        };
        assert_eq!(config.interval(), Duration::from_secs(60));
    }
}
