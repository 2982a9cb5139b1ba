//! Error types for the shared crate
//!
//! Record validation errors raised when a listing arrives from the API in a
//! shape the admin screens cannot key on, or when a new listing is rejected
//! before it is sent.

use thiserror::Error;

/// Listing validation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Record has no usable identifier
    #[error("{collection} record is missing an id")]
    MissingId { collection: &'static str },

    /// Identifier appears more than once in one collection
    #[error("duplicate {collection} id: {id}")]
    DuplicateId { collection: &'static str, id: String },

    /// Creation payload field out of its allowed range
    #[error("invalid {field} in new {collection} listing: {reason}")]
    InvalidDraft {
        collection: &'static str,
        field: &'static str,
        reason: String,
    },
}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;
