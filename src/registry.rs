// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Live registry of searchable items.
//!
//! Dashboard modules register their entities here at startup and keep
//! them current as data changes. The registry is an upsert map with one
//! extra invariant: iteration order is insertion order. Each id gets a
//! [`Rank`] on first arrival and keeps it across upserts, so re-pushing
//! a changed item never shuffles tie-broken result ordering.
//!
//! Unknown ids are ordinary: `update` and `remove` on an id that was
//! never registered do nothing. Modules register and unregister
//! independently, so racing a patch against a removal must not panic or
//! error.

use std::collections::{BTreeMap, HashMap};

use crate::types::{ItemPatch, Rank, SearchableItem};

/// Insertion-ordered item registry keyed by id.
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    /// Items in rank order. BTreeMap keeps iteration sorted by rank.
    by_rank: BTreeMap<Rank, SearchableItem>,
    /// Id to rank lookup for upserts and point reads.
    ranks: HashMap<String, Rank>,
    /// Next rank to hand out. Never reused, even after removals.
    next_rank: u64,
}

impl ItemRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a batch of items, in order.
    pub fn from_items(items: impl IntoIterator<Item = SearchableItem>) -> Self {
        let mut registry = Self::new();
        registry.extend(items);
        registry
    }

    /// Insert or replace an item, returning its rank.
    ///
    /// A new id is appended at the end of the iteration order. An
    /// existing id keeps its original rank and has its item replaced
    /// wholesale. Tags are folded to trimmed lowercase on the way in.
    pub fn insert(&mut self, mut item: SearchableItem) -> Rank {
        item.tags = fold_tags(&item.tags);
        match self.ranks.get(&item.id) {
            Some(&rank) => {
                self.by_rank.insert(rank, item);
                rank
            }
            None => {
                let rank = Rank::new(self.next_rank);
                self.next_rank += 1;
                self.ranks.insert(item.id.clone(), rank);
                self.by_rank.insert(rank, item);
                rank
            }
        }
    }

    /// Insert a batch of items, in order.
    pub fn extend(&mut self, items: impl IntoIterator<Item = SearchableItem>) {
        for item in items {
            self.insert(item);
        }
    }

    /// Merge a patch into the item with this id.
    ///
    /// Returns `true` if an item was patched. An unknown id is a no-op
    /// and returns `false`; the caller may have raced a removal.
    pub fn update(&mut self, id: &str, patch: ItemPatch) -> bool {
        let Some(&rank) = self.ranks.get(id) else {
            tracing::debug!(id, "update for unregistered item ignored");
            return false;
        };
        if let Some(item) = self.by_rank.get_mut(&rank) {
            let tags = patch.tags.as_ref().map(|tags| fold_tags(tags));
            patch.apply_to(item);
            if let Some(tags) = tags {
                item.tags = tags;
            }
            true
        } else {
            false
        }
    }

    /// Remove an item, returning it if it was registered.
    ///
    /// The rank is retired with the item: re-inserting the same id later
    /// counts as a fresh arrival and lands at the end of the order.
    pub fn remove(&mut self, id: &str) -> Option<SearchableItem> {
        let rank = self.ranks.remove(id)?;
        self.by_rank.remove(&rank)
    }

    /// Look up an item by id.
    #[inline]
    pub fn get(&self, id: &str) -> Option<&SearchableItem> {
        let rank = self.ranks.get(id)?;
        self.by_rank.get(rank)
    }

    /// Rank of an item, if registered.
    #[inline]
    pub fn rank_of(&self, id: &str) -> Option<Rank> {
        self.ranks.get(id).copied()
    }

    /// Items with their ranks, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Rank, &SearchableItem)> {
        self.by_rank.iter().map(|(rank, item)| (*rank, item))
    }

    /// Items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &SearchableItem> {
        self.by_rank.values()
    }

    /// Number of registered items.
    #[inline]
    pub fn len(&self) -> usize {
        self.by_rank.len()
    }

    /// True when nothing is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_rank.is_empty()
    }
}

/// Trim tags and fold them to lowercase, dropping ones that end up empty.
fn fold_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}
