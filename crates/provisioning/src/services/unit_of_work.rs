//! Unit-of-work contract and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::RepositoryError;

/// Transaction boundary operations.
///
/// One transaction is exclusively owned by one saga invocation for its
/// lifetime; it is never shared across invocations. `save_changes`
/// flushes staged writes into the open transaction without making them
/// durable; only `commit` does that.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Opens a transaction.
    async fn begin(&self) -> Result<(), RepositoryError>;

    /// Flushes staged writes into the open transaction.
    async fn save_changes(&self) -> Result<(), RepositoryError>;

    /// Commits the open transaction.
    async fn commit(&self) -> Result<(), RepositoryError>;

    /// Rolls the open transaction back.
    async fn rollback(&self) -> Result<(), RepositoryError>;
}

#[derive(Debug, Default)]
struct InMemoryUnitOfWorkState {
    begun: usize,
    saved: usize,
    committed: usize,
    rolled_back: usize,
    fail_on_save_changes: bool,
    fail_on_commit: bool,
}

/// In-memory unit of work for testing.
///
/// Records every call so tests can assert the saga's guarantees: at most
/// one commit per invocation, rollback on every failure path.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUnitOfWork {
    state: Arc<RwLock<InMemoryUnitOfWorkState>>,
}

impl InMemoryUnitOfWork {
    /// Creates a new in-memory unit of work.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures save_changes calls to fail.
    pub fn set_fail_on_save_changes(&self, fail: bool) {
        self.state.write().unwrap().fail_on_save_changes = fail;
    }

    /// Configures commit calls to fail.
    pub fn set_fail_on_commit(&self, fail: bool) {
        self.state.write().unwrap().fail_on_commit = fail;
    }

    /// Returns the number of begun transactions.
    pub fn begun_count(&self) -> usize {
        self.state.read().unwrap().begun
    }

    /// Returns the number of successful commits.
    pub fn commit_count(&self) -> usize {
        self.state.read().unwrap().committed
    }

    /// Returns the number of rollbacks.
    pub fn rollback_count(&self) -> usize {
        self.state.read().unwrap().rolled_back
    }

    /// Returns the number of successful save_changes calls.
    pub fn save_count(&self) -> usize {
        self.state.read().unwrap().saved
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn begin(&self) -> Result<(), RepositoryError> {
        self.state.write().unwrap().begun += 1;
        Ok(())
    }

    async fn save_changes(&self) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();
        if state.fail_on_save_changes {
            return Err(RepositoryError::Backend("save_changes failed".to_string()));
        }
        state.saved += 1;
        Ok(())
    }

    async fn commit(&self) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();
        if state.fail_on_commit {
            return Err(RepositoryError::Backend("commit failed".to_string()));
        }
        state.committed += 1;
        Ok(())
    }

    async fn rollback(&self) -> Result<(), RepositoryError> {
        self.state.write().unwrap().rolled_back += 1;
        Ok(())
    }
}
