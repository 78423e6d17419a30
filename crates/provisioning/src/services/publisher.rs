//! In-process event publisher contract and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::PublishError;
use crate::events::AssetCleanupRequested;

/// At-least-once, in-process event dispatch.
///
/// Fire-and-continue: the saga requires the publish call itself to
/// succeed, but never awaits downstream compensation handlers before
/// terminating.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes a cleanup request to downstream handlers.
    async fn publish(&self, event: AssetCleanupRequested) -> Result<(), PublishError>;
}

#[derive(Debug, Default)]
struct InMemoryPublisherState {
    published: Vec<AssetCleanupRequested>,
    fail_on_publish: bool,
}

/// In-memory event publisher for testing; records every published event.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventPublisher {
    state: Arc<RwLock<InMemoryPublisherState>>,
}

impl InMemoryEventPublisher {
    /// Creates a new in-memory publisher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures publish calls to fail.
    pub fn set_fail_on_publish(&self, fail: bool) {
        self.state.write().unwrap().fail_on_publish = fail;
    }

    /// Returns every event published so far.
    pub fn published(&self) -> Vec<AssetCleanupRequested> {
        self.state.read().unwrap().published.clone()
    }

    /// Returns the number of published events.
    pub fn published_count(&self) -> usize {
        self.state.read().unwrap().published.len()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, event: AssetCleanupRequested) -> Result<(), PublishError> {
        let mut state = self.state.write().unwrap();
        if state.fail_on_publish {
            return Err(PublishError::Failed("publisher unavailable".to_string()));
        }
        state.published.push(event);
        Ok(())
    }
}
