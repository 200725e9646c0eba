// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The fuzzy matcher: a ranked scan over the item registry.
//!
//! The registry mutates constantly and holds dashboard-scale data
//! (hundreds of items, short strings), so matching is a straight scan
//! with normalized comparisons rather than a prebuilt index. Each item is
//! scored independently, which also makes the scan trivially parallel
//! under the `parallel` feature.
//!
//! # Per-term ladder
//!
//! Within one field, a term matches at the best tier that applies:
//! exact, prefix, word prefix, substring, then bounded edit distance
//! against individual words. Tier quality times field weight gives the
//! term's score for that field; the term keeps its best field.
//!
//! # Multi-term queries
//!
//! Terms combine with AND semantics: an item only matches if *every*
//! term lands somewhere. Scores sum across terms, and the item's ranking
//! bucket is the best field any term hit.

use std::collections::HashSet;

use crate::fuzzy::levenshtein_within;
use crate::registry::ItemRegistry;
use crate::scoring::{self, compare_matches};
use crate::types::{ItemKind, MatchField, Rank, ScoredMatch, SearchableItem};
use crate::utils::{normalize, tokenize, words};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Options for one matcher pass.
#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// Maximum results returned after ranking.
    pub limit: usize,
    /// Edit budget for the typo tier.
    pub max_edit_distance: usize,
    /// Restrict matching to these kinds; `None` admits everything.
    ///
    /// Restriction happens before ranking, so the limit is spent on
    /// admitted items rather than on matches that would be dropped.
    pub kinds: Option<HashSet<ItemKind>>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        MatchOptions {
            limit: 50,
            max_edit_distance: 2,
            kinds: None,
        }
    }
}

impl MatchOptions {
    fn admits(&self, kind: ItemKind) -> bool {
        self.kinds.as_ref().map_or(true, |kinds| kinds.contains(&kind))
    }
}

/// Search the registry for items matching `query`, ranked best-first.
///
/// An empty or all-whitespace query returns no results; showing defaults
/// for an empty omnibar is the aggregator's job, not the matcher's.
pub fn search_items(
    registry: &ItemRegistry,
    query: &str,
    options: &MatchOptions,
) -> Vec<ScoredMatch> {
    let terms = tokenize(query);
    if terms.is_empty() || options.limit == 0 {
        return Vec::new();
    }

    let candidates: Vec<(Rank, &SearchableItem)> = registry
        .iter()
        .filter(|(_, item)| options.admits(item.kind))
        .collect();

    #[cfg(feature = "rayon")]
    let mut matches: Vec<ScoredMatch> = candidates
        .par_iter()
        .filter_map(|(rank, item)| score_item(item, *rank, &terms, options.max_edit_distance))
        .collect();

    #[cfg(not(feature = "rayon"))]
    let mut matches: Vec<ScoredMatch> = candidates
        .iter()
        .filter_map(|(rank, item)| score_item(item, *rank, &terms, options.max_edit_distance))
        .collect();

    matches.sort_by(compare_matches);
    matches.truncate(options.limit);
    matches
}

/// Score one item against all query terms, or `None` if any term misses.
fn score_item(
    item: &SearchableItem,
    rank: Rank,
    terms: &[String],
    max_distance: usize,
) -> Option<ScoredMatch> {
    let fields = FieldText::extract(item);

    let mut total = 0.0;
    let mut best_field: Option<MatchField> = None;
    for term in terms {
        // AND semantics: every term must land somewhere.
        let (field, score) = fields.best_for_term(term, max_distance)?;
        total += score;
        best_field = Some(match best_field {
            Some(current) if current <= field => current,
            _ => field,
        });
    }

    Some(ScoredMatch {
        item: item.clone(),
        field: best_field?,
        score: total,
        rank,
    })
}

/// Normalized field text for one item, computed once per query.
struct FieldText {
    title: String,
    tags: Vec<String>,
    category: String,
    description: Option<String>,
}

impl FieldText {
    fn extract(item: &SearchableItem) -> Self {
        FieldText {
            title: normalize(&item.title),
            // Tags are stored folded, but normalize again for diacritics.
            tags: item.tags.iter().map(|tag| normalize(tag)).collect(),
            category: normalize(&item.category),
            description: item.description.as_deref().map(normalize),
        }
    }

    /// Best hit for one term across all fields.
    ///
    /// Returns the best (lowest) field the term matched in and the
    /// highest weighted score it earned anywhere. Bucket and score are
    /// tracked separately: a term that grazes the title fuzzily and
    /// nails a tag exactly claims the title bucket at the tag's score.
    fn best_for_term(&self, term: &str, max_distance: usize) -> Option<(MatchField, f64)> {
        let mut best_field: Option<MatchField> = None;
        let mut best_score = 0.0_f64;
        let mut record = |field: MatchField, quality: f64| {
            let score = scoring::term_score(field, quality);
            if score > best_score {
                best_score = score;
            }
            best_field = Some(match best_field {
                Some(current) if current <= field => current,
                _ => field,
            });
        };

        if let Some(quality) = term_quality(&self.title, term, max_distance) {
            record(MatchField::Title, quality);
        }
        for tag in &self.tags {
            if let Some(quality) = term_quality(tag, term, max_distance) {
                record(MatchField::Tag, quality);
            }
        }
        if let Some(quality) = term_quality(&self.category, term, max_distance) {
            record(MatchField::Category, quality);
        }
        if let Some(description) = &self.description {
            if let Some(quality) = term_quality(description, term, max_distance) {
                record(MatchField::Description, quality);
            }
        }

        best_field.map(|field| (field, best_score))
    }
}

/// Match quality of `term` against one normalized field text.
///
/// Walks the tier ladder top down and returns the first tier that
/// applies. The typo tier compares the term against each word of the
/// field and keeps the smallest edit distance within budget.
fn term_quality(text: &str, term: &str, max_distance: usize) -> Option<f64> {
    if text.is_empty() || term.is_empty() {
        return None;
    }
    if text == term {
        return Some(scoring::EXACT_QUALITY);
    }
    if text.starts_with(term) {
        return Some(scoring::PREFIX_QUALITY);
    }
    // words() splits the same way tokenize() splits the query, so a
    // hyphenated title still exposes its parts to the word tiers.
    if words(text).any(|word| word.starts_with(term)) {
        return Some(scoring::WORD_PREFIX_QUALITY);
    }
    if text.contains(term) {
        return Some(scoring::SUBSTRING_QUALITY);
    }

    let mut best: Option<usize> = None;
    for word in words(text) {
        if let Some(distance) = levenshtein_within(word, term, max_distance) {
            best = Some(best.map_or(distance, |current| current.min(distance)));
            if best == Some(1) {
                // Distance 0 would have hit an earlier tier.
                break;
            }
        }
    }
    best.map(scoring::fuzzy_quality)
}
