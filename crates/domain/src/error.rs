//! Domain error types.

use thiserror::Error;

/// Errors raised while constructing or mutating domain entities.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// A required textual field was empty after trimming.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A required reference carried the nil identifier.
    #[error("{field} must not be the nil identifier")]
    NilReference {
        /// Name of the offending reference.
        field: &'static str,
    },

    /// A price was negative.
    #[error("price must not be negative, got {cents} cents")]
    NegativePrice {
        /// The offending amount in cents.
        cents: i64,
    },
}
