//! Provisioning saga state machine.

use serde::{Deserialize, Serialize};

/// The state of a provisioning saga invocation.
///
/// State transitions (the upload states are skipped when the request
/// carries no image):
/// ```text
/// Start ──► CategoryVerified ──► AssetUploaded ──► AssetPersisted
///   │              │                   │                 │
///   │              │                   │                 ▼
///   │              │                   │        AggregatePersisted ──► Committed
///   │              ▼                   ▼                 │
///   └───────► RolledBack     RolledBackWithCompensation ◄┘ (on failure
///                                                           after upload)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SagaState {
    /// Invocation created, nothing executed yet.
    #[default]
    Start,

    /// The referenced category exists for the requesting tenant.
    CategoryVerified,

    /// The binary asset has been uploaded to external storage.
    /// The compensation boundary: every failure from here on must
    /// publish a cleanup event for the uploaded key.
    AssetUploaded,

    /// The asset record is staged in the open transaction.
    AssetPersisted,

    /// The product aggregate is staged in the open transaction.
    AggregatePersisted,

    /// The transaction committed (terminal success state).
    Committed,

    /// The transaction was rolled back; nothing external survived
    /// (terminal failure state).
    RolledBack,

    /// The transaction was rolled back and a cleanup event was published
    /// for the uploaded asset (terminal failure state).
    RolledBackWithCompensation,
}

impl SagaState {
    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SagaState::Committed | SagaState::RolledBack | SagaState::RolledBackWithCompensation
        )
    }

    /// Returns true if this is a terminal failure state.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            SagaState::RolledBack | SagaState::RolledBackWithCompensation
        )
    }

    /// Returns true while the invocation holds the upload obligation:
    /// an asset exists in storage that no committed transaction accounts
    /// for yet.
    pub fn owes_compensation(&self) -> bool {
        matches!(
            self,
            SagaState::AssetUploaded | SagaState::AssetPersisted | SagaState::AggregatePersisted
        )
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SagaState::Start => "Start",
            SagaState::CategoryVerified => "CategoryVerified",
            SagaState::AssetUploaded => "AssetUploaded",
            SagaState::AssetPersisted => "AssetPersisted",
            SagaState::AggregatePersisted => "AggregatePersisted",
            SagaState::Committed => "Committed",
            SagaState::RolledBack => "RolledBack",
            SagaState::RolledBackWithCompensation => "RolledBackWithCompensation",
        }
    }
}

impl std::fmt::Display for SagaState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_start() {
        assert_eq!(SagaState::default(), SagaState::Start);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!SagaState::Start.is_terminal());
        assert!(!SagaState::CategoryVerified.is_terminal());
        assert!(!SagaState::AssetUploaded.is_terminal());
        assert!(!SagaState::AssetPersisted.is_terminal());
        assert!(!SagaState::AggregatePersisted.is_terminal());
        assert!(SagaState::Committed.is_terminal());
        assert!(SagaState::RolledBack.is_terminal());
        assert!(SagaState::RolledBackWithCompensation.is_terminal());
    }

    #[test]
    fn test_failure_states() {
        assert!(SagaState::RolledBack.is_failure());
        assert!(SagaState::RolledBackWithCompensation.is_failure());
        assert!(!SagaState::Committed.is_failure());
        assert!(!SagaState::Start.is_failure());
    }

    #[test]
    fn test_compensation_obligation_starts_at_upload() {
        assert!(!SagaState::Start.owes_compensation());
        assert!(!SagaState::CategoryVerified.owes_compensation());
        assert!(SagaState::AssetUploaded.owes_compensation());
        assert!(SagaState::AssetPersisted.owes_compensation());
        assert!(SagaState::AggregatePersisted.owes_compensation());
        assert!(!SagaState::Committed.owes_compensation());
    }

    #[test]
    fn test_display() {
        assert_eq!(SagaState::Start.to_string(), "Start");
        assert_eq!(
            SagaState::RolledBackWithCompensation.to_string(),
            "RolledBackWithCompensation"
        );
    }

    #[test]
    fn test_serialization() {
        let state = SagaState::AssetUploaded;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: SagaState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
