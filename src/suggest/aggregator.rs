// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The suggestion engine: one aggregation pass per query.
//!
//! A pass composes suggestions from fixed sources in a fixed order and
//! feeds them through the keep-first [`SuggestionMerger`]:
//!
//! - Non-empty query: intent rows (capped), then ranked registry
//!   matches. Recent and popular never appear next to a live query.
//! - Empty query: the defaults view. Top recent queries, top popular
//!   queries, then filter toggles and shortcut entries when enabled.
//!   Never intent or result rows; there is nothing to match yet.
//!
//! Composition order is priority order, so the merger's keep-first
//! policy and cap fall out of iteration with no ranking pass over the
//! merged list.
//!
//! The engine is internally locked (`parking_lot`) and shared behind an
//! `Arc` between the host, the controller task, and any CLI frontend.

use std::collections::HashSet;

use parking_lot::{Mutex, RwLock};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::fuzzy::{search_items, MatchOptions};
use crate::history::{MemoryQueryStore, PopularQueries, QueryStore, RecentQueries};
use crate::registry::ItemRegistry;
use crate::suggest::intent::intent_suggestions;
use crate::suggest::merger::SuggestionMerger;
use crate::types::{
    ItemKind, ItemPatch, Rank, ScoredMatch, SearchableItem, Suggestion, SuggestionAction,
    SuggestionKind,
};
use crate::utils::slug;

/// Per-call context for one aggregation pass.
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    /// Override the configured overall cap for this pass.
    pub max_results: Option<usize>,
    /// Active filter ids. Non-empty restricts result suggestions to the
    /// item kinds those filters admit; ids with no matching filter
    /// definition are ignored.
    pub active_filters: Vec<String>,
}

impl QueryContext {
    /// Context with an explicit cap.
    pub fn with_limit(max_results: usize) -> Self {
        QueryContext {
            max_results: Some(max_results),
            ..QueryContext::default()
        }
    }
}

/// Aggregates registry matches, history, intent rules, and config-driven
/// entries into one suggestion list.
pub struct SuggestionEngine {
    config: EngineConfig,
    registry: RwLock<ItemRegistry>,
    recent: Mutex<RecentQueries>,
    popular: PopularQueries,
}

impl SuggestionEngine {
    /// Create an engine with the given history store.
    pub fn new(config: EngineConfig, store: Box<dyn QueryStore>) -> Self {
        let recent = RecentQueries::new(store, config.recent_limit);
        let popular = PopularQueries::new(config.popular_queries.clone());
        SuggestionEngine {
            registry: RwLock::new(ItemRegistry::new()),
            recent: Mutex::new(recent),
            popular,
            config,
        }
    }

    /// Engine with memory-only history, mostly for tests and demos.
    pub fn in_memory(config: EngineConfig) -> Self {
        Self::new(config, Box::new(MemoryQueryStore::new()))
    }

    /// Builder-style batch registration.
    pub fn with_items(self, items: impl IntoIterator<Item = SearchableItem>) -> Self {
        self.registry.write().extend(items);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Registry passthroughs
    // ------------------------------------------------------------------

    /// Insert or replace an item. See [`ItemRegistry::insert`].
    pub fn insert_item(&self, item: SearchableItem) -> Rank {
        self.registry.write().insert(item)
    }

    /// Register a batch of items, in order.
    pub fn insert_items(&self, items: impl IntoIterator<Item = SearchableItem>) {
        self.registry.write().extend(items);
    }

    /// Patch an item; no-op on unknown ids.
    pub fn update_item(&self, id: &str, patch: ItemPatch) -> bool {
        self.registry.write().update(id, patch)
    }

    /// Remove an item; no-op on unknown ids.
    pub fn remove_item(&self, id: &str) -> Option<SearchableItem> {
        self.registry.write().remove(id)
    }

    /// Point read of one item.
    pub fn get_item(&self, id: &str) -> Option<SearchableItem> {
        self.registry.read().get(id).cloned()
    }

    /// Number of registered items.
    pub fn item_count(&self) -> usize {
        self.registry.read().len()
    }

    // ------------------------------------------------------------------
    // History passthroughs
    // ------------------------------------------------------------------

    /// Record a submitted query into recent history.
    pub fn record_query(&self, query: &str) {
        self.recent.lock().record(query);
    }

    /// Snapshot of recent queries, newest first.
    pub fn recent_queries(&self) -> Vec<String> {
        self.recent.lock().snapshot()
    }

    /// Drop all recent history.
    pub fn clear_recent(&self) {
        self.recent.lock().clear();
    }

    /// True once history persistence has failed this session.
    pub fn history_degraded(&self) -> bool {
        self.recent.lock().is_degraded()
    }

    /// The seeded popular queries.
    pub fn popular(&self) -> &PopularQueries {
        &self.popular
    }

    // ------------------------------------------------------------------
    // The pipeline
    // ------------------------------------------------------------------

    /// Raw matcher pass over the registry, with no intent rows and no
    /// suggestion wrapping.
    pub fn search(&self, query: &str, limit: usize) -> Vec<ScoredMatch> {
        let options = MatchOptions {
            limit,
            max_edit_distance: self.config.max_edit_distance,
            kinds: None,
        };
        search_items(&self.registry.read(), query, &options)
    }

    /// One full aggregation pass.
    ///
    /// Infallible for the built-in sources; the `Result` is the shared
    /// boundary shape so remote
    /// [`SuggestionSource`](crate::controller::SuggestionSource)
    /// implementations can fail.
    pub fn suggest(&self, query: &str, context: &QueryContext) -> Result<Vec<Suggestion>> {
        let limit = context.max_results.unwrap_or(self.config.max_results);
        let mut merger = SuggestionMerger::new(limit);

        let trimmed = query.trim();
        if trimmed.is_empty() {
            self.default_suggestions(&mut merger);
        } else {
            self.query_suggestions(trimmed, context, &mut merger);
        }

        Ok(merger.into_suggestions())
    }

    /// The empty-query defaults view.
    fn default_suggestions(&self, merger: &mut SuggestionMerger) {
        {
            let recent = self.recent.lock();
            // Ids carry the list position: distinct queries can share a
            // slug ("a b" and "a-b"), and the dedup pass must not eat one.
            for (position, query) in recent.top(self.config.recent_shown).enumerate() {
                merger.push(Suggestion {
                    id: format!("recent-{position}-{}", slug(query)),
                    kind: SuggestionKind::Recent,
                    text: query.to_string(),
                    description: None,
                    category: Some("Recent".to_string()),
                    action: SuggestionAction::FillQuery {
                        text: query.to_string(),
                    },
                });
            }
        }

        for (position, query) in self.popular.top(self.config.popular_shown).enumerate() {
            merger.push(Suggestion {
                id: format!("popular-{position}-{}", slug(query)),
                kind: SuggestionKind::Popular,
                text: query.to_string(),
                description: None,
                category: Some("Popular".to_string()),
                action: SuggestionAction::FillQuery {
                    text: query.to_string(),
                },
            });
        }

        if self.config.filter_suggestions {
            for filter in &self.config.filters {
                merger.push(Suggestion {
                    id: format!("filter-{}", filter.id),
                    kind: SuggestionKind::Filter,
                    text: filter.label.clone(),
                    description: None,
                    category: Some("Filters".to_string()),
                    action: SuggestionAction::ToggleFilter {
                        filter_id: filter.id.clone(),
                    },
                });
            }
        }

        if self.config.shortcut_suggestions {
            for shortcut in &self.config.shortcuts {
                merger.push(Suggestion {
                    id: format!("shortcut-{}", shortcut.id),
                    kind: SuggestionKind::Shortcut,
                    text: shortcut.label.clone(),
                    description: Some(shortcut.keys.clone()),
                    category: Some("Shortcuts".to_string()),
                    action: SuggestionAction::Navigate {
                        href: shortcut.href.clone(),
                    },
                });
            }
        }
    }

    /// Intent rows, then ranked matches, for a live query.
    fn query_suggestions(
        &self,
        query: &str,
        context: &QueryContext,
        merger: &mut SuggestionMerger,
    ) {
        merger.extend(intent_suggestions(query, self.config.intent_limit));

        // The kind restriction rides inside the matcher pass, so filtered
        // items compete for the limit among themselves instead of being
        // crowded out by higher-ranked items the filters would drop.
        let options = MatchOptions {
            limit: context.max_results.unwrap_or(self.config.max_results),
            max_edit_distance: self.config.max_edit_distance,
            kinds: self.allowed_kinds(context),
        };
        let matches = {
            let registry = self.registry.read();
            search_items(&registry, query, &options)
        };

        for matched in matches {
            if merger.is_full() {
                break;
            }
            merger.push(result_suggestion(matched));
        }
    }

    /// Kinds admitted by the active filters, or `None` when unfiltered.
    ///
    /// Filter ids that match no definition are ignored; if none are
    /// left, the pass runs unfiltered rather than returning nothing.
    fn allowed_kinds(&self, context: &QueryContext) -> Option<HashSet<ItemKind>> {
        if context.active_filters.is_empty() {
            return None;
        }
        let kinds: HashSet<ItemKind> = context
            .active_filters
            .iter()
            .filter_map(|id| self.config.filter(id))
            .map(|filter| filter.kind)
            .collect();
        if kinds.is_empty() {
            None
        } else {
            Some(kinds)
        }
    }
}

/// Wrap one ranked match as a result suggestion.
fn result_suggestion(matched: ScoredMatch) -> Suggestion {
    let href = matched.item.resolved_href();
    let item = matched.item;
    Suggestion {
        id: item.id.clone(),
        kind: SuggestionKind::Result,
        text: item.title,
        description: item.description,
        category: Some(item.category),
        action: SuggestionAction::Navigate { href },
    }
}
