//! Rank capability

use crate::error::{ValidationError, ValidationResult};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;

/// A record with a stable id and a persisted display order
///
/// Ranks are neither unique nor contiguous. Lower ranks sort first and a
/// record without a stored rank reads as 0.
pub trait Ranked {
    fn id(&self) -> &str;
    fn rank(&self) -> i64;
    fn set_rank(&mut self, rank: i64);
}

/// A REST collection of ranked records
pub trait Collection:
    Ranked + Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Partial update body accepted by `PUT /{PATH}/{id}`
    type Patch: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static;
    /// Creation body accepted by `POST /{PATH}`
    type Draft: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Path segment of the collection (`cars`, `properties`)
    const PATH: &'static str;
    /// Id field name in reorder request bodies
    const REORDER_ID_FIELD: &'static str;
    /// Human-readable singular name used in notices
    const DISPLAY_NAME: &'static str;

    /// Search match against an already lowercased, non-empty needle
    fn matches_lowercase(&self, needle: &str) -> bool;

    /// Apply a partial update in place
    fn apply_patch(&mut self, patch: Self::Patch);

    /// Record stored for an accepted draft. No rank is assigned.
    fn from_draft(id: String, draft: Self::Draft) -> Self;

    /// Reject drafts the backend would refuse
    fn validate_draft(draft: &Self::Draft) -> ValidationResult<()>;

    /// Admin search predicate: case-insensitive substring over the
    /// collection's text fields. An empty query matches everything.
    fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        self.matches_lowercase(&query.to_lowercase())
    }

    /// Reject records the list screens cannot key on. Field contents are
    /// not checked here: listings are shown as the backend returns them.
    fn validate(&self) -> ValidationResult<()> {
        ensure_id(Self::PATH, self.id())
    }
}

pub(crate) fn ensure_id(collection: &'static str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::MissingId { collection });
    }
    Ok(())
}

/// Case-insensitive substring test on an optional text field
pub(crate) fn field_contains(field: &Option<String>, needle: &str) -> bool {
    field
        .as_deref()
        .is_some_and(|value| value.to_lowercase().contains(needle))
}

/// Reject negative amounts (prices, areas, mileage) in a draft
pub(crate) fn ensure_non_negative(
    collection: &'static str,
    field: &'static str,
    value: Option<f64>,
) -> ValidationResult<()> {
    match value {
        Some(v) if v < 0.0 => Err(ValidationError::InvalidDraft {
            collection,
            field,
            reason: format!("must not be negative, got {v}"),
        }),
        _ => Ok(()),
    }
}
