//! Client error types

use crate::phase::{ReorderEvent, ReorderPhase};
use shared::ValidationError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connect, timeout, body)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Server-side failure
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// List management error
///
/// Every variant is recoverable: the manager has already raised a notice (where
/// one applies) and left the view in a usable state by the time it returns.
#[derive(Debug, Error)]
pub enum ListError {
    /// Reordering is disabled while a search filter narrows the view
    #[error("cannot reorder while a filter is active")]
    ReorderBlocked,

    /// Another reorder on this collection is still in flight
    #[error("a reorder is already in progress")]
    ReorderBusy,

    /// Index outside the view
    #[error("index {index} out of range for {len} items")]
    InvalidIndex { index: usize, len: usize },

    /// One or more rank writes failed; the view was reloaded
    #[error("failed to persist new order")]
    ReorderPersistFailed(#[source] ClientError),

    /// Collection fetch failed; the view keeps its previous contents
    #[error("failed to load collection")]
    LoadFailed(#[source] ClientError),

    /// A record could not be keyed (missing or duplicate id), or a draft
    /// was refused before sending
    #[error("invalid record: {0}")]
    InvalidRecord(#[from] ValidationError),

    /// Listing creation rejected by the backend
    #[error("failed to create listing")]
    CreateFailed(#[source] ClientError),

    /// Record update rejected
    #[error("failed to update {id}")]
    UpdateFailed {
        id: String,
        #[source]
        source: ClientError,
    },

    /// Record delete rejected
    #[error("failed to delete {id}")]
    RemoveFailed {
        id: String,
        #[source]
        source: ClientError,
    },
}

/// Unrecognised `CLUTCH_RANK_STRATEGY` value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rank strategy: {0}")]
pub struct UnknownRankStrategy(pub String);

/// Result type for list operations
pub type ListResult<T> = Result<T, ListError>;

/// Event not accepted in the current reorder phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid reorder transition: {event:?} while {phase:?}")]
pub struct InvalidTransition {
    pub phase: ReorderPhase,
    pub event: ReorderEvent,
}
