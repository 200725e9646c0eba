// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Suggestion merging: id dedup and the overall result cap.
//!
//! Aggregation pushes suggestions in priority order (intent before
//! results; recent before popular before filters before shortcuts), so
//! the merge policy is keep-first: the first suggestion to claim an id
//! wins and later duplicates are dropped. The cap is enforced at the
//! same point, which means low-priority producers simply stop landing
//! rows once the list is full.

use std::collections::HashSet;

use crate::types::Suggestion;

/// Accumulates suggestions with keep-first id dedup and a hard cap.
pub struct SuggestionMerger {
    seen: HashSet<String>,
    merged: Vec<Suggestion>,
    limit: usize,
}

impl SuggestionMerger {
    /// Create a merger that will keep at most `limit` suggestions.
    pub fn new(limit: usize) -> Self {
        SuggestionMerger {
            seen: HashSet::new(),
            merged: Vec::with_capacity(limit.min(32)),
            limit,
        }
    }

    /// Add one suggestion. Returns `true` if it was kept.
    ///
    /// Dropped when the list is already full or the id was claimed by an
    /// earlier push.
    pub fn push(&mut self, suggestion: Suggestion) -> bool {
        if self.merged.len() >= self.limit {
            return false;
        }
        if !self.seen.insert(suggestion.id.clone()) {
            return false;
        }
        self.merged.push(suggestion);
        true
    }

    /// Add suggestions in order until the cap is hit.
    pub fn extend(&mut self, suggestions: impl IntoIterator<Item = Suggestion>) {
        for suggestion in suggestions {
            if self.is_full() {
                break;
            }
            self.push(suggestion);
        }
    }

    /// Has an id already been merged?
    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// True once the cap is reached.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.merged.len() >= self.limit
    }

    /// Number of kept suggestions.
    pub fn len(&self) -> usize {
        self.merged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.merged.is_empty()
    }

    /// Finish merging and hand back the kept suggestions, in push order.
    pub fn into_suggestions(self) -> Vec<Suggestion> {
        self.merged
    }
}
