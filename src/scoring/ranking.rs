// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Match ranking: how matcher results get sorted.
//!
//! The ranking is bucketed by match field, not by raw score. A title match
//! with score 21 beats a tag match with score 40. Numeric scores only
//! matter as tiebreakers within each bucket, and two further tiebreakers
//! (shorter title, then insertion rank) make the order fully deterministic.
//!
//! Bucket hierarchy: Title > Tag > Category > Description

use crate::types::ScoredMatch;
use std::cmp::Ordering;

/// Compare two matches for ranking.
///
/// Sort order:
/// 1. **Match field** - bucket hierarchy dominates (Title > Tag > Category > Description)
/// 2. **Score** - only within the same bucket (higher wins)
/// 3. **Title length** - shorter titles first; the query covers more of them
/// 4. **Insertion rank** - final tiebreaker, so order is stable run to run
///
/// The key insight: a fuzzy title match beats an exact tag match. Buckets
/// are impermeable - scores can't cross bucket boundaries.
pub fn compare_matches(a: &ScoredMatch, b: &ScoredMatch) -> Ordering {
    // Primary: field (smaller enum value = better rank)
    // Enum ordering: Title(0) < Tag(1) < Category(2) < Description(3)
    match a.field.cmp(&b.field) {
        Ordering::Equal => {
            // Secondary: score (descending - higher score wins)
            match b.score.partial_cmp(&a.score) {
                Some(ord) if ord != Ordering::Equal => ord,
                _ => {
                    // Tertiary: shorter title first (chars, not bytes)
                    let a_len = a.item.title.chars().count();
                    let b_len = b.item.title.chars().count();
                    match a_len.cmp(&b_len) {
                        Ordering::Equal => {
                            // Final tie-breaker: insertion rank for absolute determinism
                            a.rank.cmp(&b.rank)
                        }
                        ord => ord,
                    }
                }
            }
        }
        ord => ord, // field order determines ranking
    }
}
