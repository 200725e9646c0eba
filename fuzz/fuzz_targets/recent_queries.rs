// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the recency store.
//!
//! Replays arbitrary record/clear sequences and checks the list stays
//! bounded, trimmed, and free of case-insensitive duplicates after every
//! step.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use omnibar::RecentQueries;
use std::collections::HashSet;

/// One mutation against the store
#[derive(Debug, Arbitrary)]
enum HistoryOp {
    Record(String),
    Clear,
}

/// Fuzz input for a history session
#[derive(Debug, Arbitrary)]
struct HistoryInput {
    /// Retention cap (capped at 16)
    limit: u8,
    /// Mutation sequence
    ops: Vec<HistoryOp>,
}

fuzz_target!(|input: HistoryInput| {
    let limit = (input.limit % 16) as usize;
    let mut recent = RecentQueries::in_memory(limit);

    for op in input.ops.into_iter().take(64) {
        match op {
            HistoryOp::Record(query) => {
                let query: String = query.chars().take(80).collect();
                recent.record(&query);

                // INVARIANT 1: A non-blank record lands trimmed at the front
                if !query.trim().is_empty() && limit > 0 {
                    assert_eq!(
                        recent.iter().next(),
                        Some(query.trim()),
                        "recorded query missing from the front"
                    );
                }
            }
            HistoryOp::Clear => {
                recent.clear();
                assert!(recent.is_empty(), "clear left entries behind");
            }
        }

        // INVARIANT 2: The list never exceeds its cap
        assert!(
            recent.len() <= limit,
            "{} entries exceed cap {}",
            recent.len(),
            limit
        );

        // INVARIANT 3: Entries are trimmed and never blank
        for entry in recent.iter() {
            assert_eq!(entry, entry.trim(), "entry '{}' kept whitespace", entry);
            assert!(!entry.is_empty(), "blank entry survived");
        }

        // INVARIANT 4: No two entries collide case-insensitively
        let mut seen = HashSet::new();
        for entry in recent.iter() {
            assert!(
                seen.insert(entry.to_lowercase()),
                "case-insensitive duplicate '{}'",
                entry
            );
        }
    }
});
