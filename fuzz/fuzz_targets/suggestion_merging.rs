// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for suggestion aggregation.
//!
//! Throws arbitrary catalogs, history, queries, and filter sets at the
//! engine and checks the output contract: capped length, unique ids, and
//! kinds that agree with whether the query is empty.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use omnibar::{
    EngineConfig, ItemKind, QueryContext, SearchableItem, SuggestionAction, SuggestionEngine,
    SuggestionKind,
};
use std::collections::{BTreeMap, HashSet};

/// Fuzz input for one aggregation pass
#[derive(Debug, Arbitrary)]
struct MergeInput {
    /// Query string (capped to avoid timeouts)
    query: String,
    /// Overall cap knob
    max_results: u8,
    /// Intent cap knob
    intent_limit: u8,
    /// History entries recorded before the pass
    recorded: Vec<String>,
    /// Item titles for the generated catalog
    titles: Vec<String>,
    /// Filter ids activated for the pass
    filters: Vec<String>,
}

fuzz_target!(|input: MergeInput| {
    let query: String = input.query.chars().take(120).collect();

    let config = EngineConfig {
        max_results: (input.max_results % 24) as usize + 1,
        intent_limit: (input.intent_limit % 6) as usize,
        ..EngineConfig::default()
    };
    let cap = config.max_results;

    let items = input.titles.iter().take(24).enumerate().map(|(n, title)| {
        let title: String = title.chars().take(40).collect();
        SearchableItem {
            id: format!("item-{}", n),
            title,
            kind: ItemKind::Campaign,
            category: "fuzz".to_string(),
            description: None,
            tags: Vec::new(),
            meta: BTreeMap::new(),
        }
    });

    let engine = SuggestionEngine::in_memory(config).with_items(items);
    for entry in input.recorded.iter().take(12) {
        let entry: String = entry.chars().take(60).collect();
        engine.record_query(&entry);
    }

    let context = QueryContext {
        max_results: None,
        active_filters: input.filters.into_iter().take(4).collect(),
    };

    let suggestions = engine
        .suggest(&query, &context)
        .expect("in-memory aggregation cannot fail");

    // INVARIANT 1: The pass respects the configured cap
    assert!(
        suggestions.len() <= cap,
        "{} suggestions exceed cap {}",
        suggestions.len(),
        cap
    );

    // INVARIANT 2: No duplicate ids survive the merge
    let mut seen = HashSet::new();
    for suggestion in &suggestions {
        assert!(
            seen.insert(suggestion.id.clone()),
            "duplicate suggestion id '{}'",
            suggestion.id
        );
    }

    // INVARIANT 3: Kinds agree with query emptiness
    let empty = query.trim().is_empty();
    for suggestion in &suggestions {
        let live = matches!(
            suggestion.kind,
            SuggestionKind::Intent | SuggestionKind::Result
        );
        assert_eq!(
            live,
            !empty,
            "kind {:?} on the wrong side of the query split",
            suggestion.kind
        );
    }

    // INVARIANT 4: Every action shape matches its kind
    for suggestion in &suggestions {
        let fits = match suggestion.kind {
            SuggestionKind::Recent | SuggestionKind::Popular => {
                matches!(suggestion.action, SuggestionAction::FillQuery { .. })
            }
            SuggestionKind::Filter => {
                matches!(suggestion.action, SuggestionAction::ToggleFilter { .. })
            }
            SuggestionKind::Shortcut | SuggestionKind::Intent | SuggestionKind::Result => {
                matches!(suggestion.action, SuggestionAction::Navigate { .. })
            }
        };
        assert!(fits, "kind {:?} carries the wrong action", suggestion.kind);
    }
});
