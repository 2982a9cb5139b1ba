//! Ordered view of a collection
//!
//! The client's best-known ordering. Built by a stable sort on rank so that
//! records sharing a rank keep the order the server sent them in, which makes
//! two reloads of unchanged data produce the same view.

use shared::{Collection, ValidationError, ValidationResult};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderedView<T> {
    items: Vec<T>,
}

impl<T> Default for OrderedView<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Collection> OrderedView<T> {
    /// Validate records and sort them by rank (stable)
    pub fn from_records(mut records: Vec<T>) -> ValidationResult<Self> {
        {
            let mut seen = HashSet::with_capacity(records.len());
            for record in &records {
                record.validate()?;
                if !seen.insert(record.id()) {
                    return Err(ValidationError::DuplicateId {
                        collection: T::PATH,
                        id: record.id().to_string(),
                    });
                }
            }
        }

        records.sort_by_key(|r| r.rank());
        Ok(Self { items: records })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.id()).collect()
    }

    /// Swap two positions; out-of-range indices panic like `slice::swap`
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
    }

    /// Write a rank into the record with `id`. Returns false if absent.
    pub(crate) fn set_rank(&mut self, id: &str, rank: i64) -> bool {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                item.set_rank(rank);
                true
            }
            None => false,
        }
    }

    /// Replace a record in place, keeping its position
    pub(crate) fn replace(&mut self, record: T) -> bool {
        match self.position(record.id()) {
            Some(index) => {
                self.items[index] = record;
                true
            }
            None => false,
        }
    }

    /// Insert a new record ahead of every record with the same or a higher
    /// rank; an unranked listing lands at the top. Returns its index.
    pub(crate) fn insert(&mut self, record: T) -> ValidationResult<usize> {
        record.validate()?;
        if self.position(record.id()).is_some() {
            return Err(ValidationError::DuplicateId {
                collection: T::PATH,
                id: record.id().to_string(),
            });
        }
        let rank = record.rank();
        let index = self.items.partition_point(|item| item.rank() < rank);
        self.items.insert(index, record);
        Ok(index)
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<T> {
        self.position(id).map(|index| self.items.remove(index))
    }

    /// Records matching `query`, paired with their index in the full view
    pub fn visible(&self, query: &str) -> Vec<(usize, &T)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.matches(query))
            .collect()
    }
}
