//! # List View Module
//!
//! Client-side derived views over fetched lists: single-key sorting with a
//! direction toggle, case-insensitive substring search, and boolean filters.
//! None of this ever round-trips to the backend; the pages sort and filter
//! whatever the last fetch returned, in memory.
//!
//! ## Sort Semantics
//! - Clicking a column toggles ascending → descending → ascending
//! - Clicking a different column resets to ascending on that column
//! - Equal keys keep their prior relative order (stable sort), so the
//!   backend's insertion order is the tie-break

use std::cmp::Ordering;

// =============================================================================
// Sorting
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The sort configuration of one table: which column, which direction.
///
/// `K` is a page-specific column enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: Copy + PartialEq> SortState<K> {
    /// Initial state: ascending on the given column.
    pub fn new(key: K) -> Self {
        SortState {
            key,
            direction: SortDirection::Ascending,
        }
    }

    /// Column-header click: same column flips direction, a new column
    /// starts ascending.
    pub fn toggle(&mut self, key: K) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Sorts a slice by the configured column.
    ///
    /// `compare` orders two rows by a column ascending; descending is the
    /// reversed comparison. `sort_by` is stable either way, so equal keys
    /// keep their fetched order.
    pub fn sort_slice<T, F>(&self, items: &mut [T], compare: F)
    where
        F: Fn(&T, &T, K) -> Ordering,
    {
        match self.direction {
            SortDirection::Ascending => items.sort_by(|a, b| compare(a, b, self.key)),
            SortDirection::Descending => items.sort_by(|a, b| compare(b, a, self.key)),
        }
    }
}

// =============================================================================
// Search
// =============================================================================

/// Case-insensitive substring match over any of the given fields.
///
/// An empty (or whitespace) needle matches everything, so a cleared search
/// box shows the full list.
pub fn matches_search(needle: &str, fields: &[&str]) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

// =============================================================================
// Unit Tests
// =============================================================================
