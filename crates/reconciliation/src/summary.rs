//! Sweep run summary.

/// Outcome counts for one reconciliation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    /// Deletes attempted this run.
    pub attempted: usize,
    /// Deletes that succeeded (an already-absent key counts here).
    pub succeeded: usize,
    /// Deletes that failed and were left for the next run.
    pub failed: usize,
}

impl SweepSummary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one successful delete.
    pub fn note_success(&mut self) {
        self.attempted += 1;
        self.succeeded += 1;
    }

    /// Records one failed delete.
    pub fn note_failure(&mut self) {
        self.attempted += 1;
        self.failed += 1;
    }

    /// Returns true if nothing failed this run.
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

impl std::fmt::Display for SweepSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "attempted={} succeeded={} failed={}",
            self.attempted, self.succeeded, self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notes_keep_attempted_consistent() {
        let mut summary = SweepSummary::new();
        summary.note_success();
        summary.note_success();
        summary.note_failure();

        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert!(!summary.is_clean());
    }

    #[test]
    fn empty_summary_is_clean() {
        assert!(SweepSummary::new().is_clean());
    }

    #[test]
    fn display_lists_all_counts() {
        let mut summary = SweepSummary::new();
        summary.note_failure();
        assert_eq!(summary.to_string(), "attempted=1 succeeded=0 failed=1");
    }
}
