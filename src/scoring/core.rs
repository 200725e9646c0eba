// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind match scoring.
//!
//! Per term, a field hit earns `field weight x match quality`. Weight says
//! where the hit landed (title beats tag beats category beats description);
//! quality says how cleanly the term matched (exact beats prefix beats
//! substring beats typo). An item's score sums the best per-term hits, so
//! multi-term queries reward items that satisfy every term strongly.
//!
//! # Weights do not decide cross-field order
//!
//! Ranking buckets results by [`MatchField`](crate::types::MatchField)
//! before it ever looks at scores, so a fuzzy title hit still sorts ahead
//! of an exact tag hit. The weights only shape ordering *within* a bucket
//! and the relative pull of secondary fields in multi-term sums. That
//! keeps the constants low-stakes: they tune, they do not gatekeep.
//!
//! # Constants
//!
//! | Constant               | Value | Role                                  |
//! |------------------------|-------|---------------------------------------|
//! | `TITLE_WEIGHT`         | 100.0 | Title is the primary display text     |
//! | `TAG_WEIGHT`           | 40.0  | Tags are curated keywords             |
//! | `CATEGORY_WEIGHT`      | 15.0  | Categories are broad labels           |
//! | `DESCRIPTION_WEIGHT`   | 5.0   | Descriptions are noisy prose          |
//! | `EXACT_QUALITY`        | 1.0   | Term equals the field text            |
//! | `PREFIX_QUALITY`       | 0.8   | Field text starts with the term       |
//! | `WORD_PREFIX_QUALITY`  | 0.65  | Some word starts with the term        |
//! | `SUBSTRING_QUALITY`    | 0.5   | Term appears mid-text                 |
//! | `FUZZY_BASE_QUALITY`   | 0.35  | Typo tier before distance penalty     |
//! | `EDIT_DISTANCE_PENALTY`| 0.2   | 20% off per edit                      |

use crate::types::MatchField;

// =============================================================================
// FIELD WEIGHTS
// =============================================================================

/// Weight for title matches.
pub const TITLE_WEIGHT: f64 = 100.0;

/// Weight for tag matches.
pub const TAG_WEIGHT: f64 = 40.0;

/// Weight for category matches.
pub const CATEGORY_WEIGHT: f64 = 15.0;

/// Weight for description matches.
pub const DESCRIPTION_WEIGHT: f64 = 5.0;

// =============================================================================
// MATCH QUALITY LADDER
// =============================================================================
// Per-term quality within a single field, best tier wins:
// exact > prefix > word prefix > substring > bounded edit distance.

/// Term equals the whole field text.
pub const EXACT_QUALITY: f64 = 1.0;

/// Field text starts with the term.
pub const PREFIX_QUALITY: f64 = 0.8;

/// Some whitespace-separated word in the field starts with the term.
pub const WORD_PREFIX_QUALITY: f64 = 0.65;

/// Term appears somewhere inside the field text.
pub const SUBSTRING_QUALITY: f64 = 0.5;

/// Base quality for the typo tier, before the per-edit penalty.
pub const FUZZY_BASE_QUALITY: f64 = 0.35;

/// Penalty per edit of distance (20% per edit).
pub const EDIT_DISTANCE_PENALTY: f64 = 0.2;

/// Weight of the field a term hit.
#[inline]
pub fn field_weight(field: MatchField) -> f64 {
    match field {
        MatchField::Title => TITLE_WEIGHT,
        MatchField::Tag => TAG_WEIGHT,
        MatchField::Category => CATEGORY_WEIGHT,
        MatchField::Description => DESCRIPTION_WEIGHT,
    }
}

/// Quality of a typo-tier hit at this edit distance.
///
/// Distance 1 → 0.28, distance 2 → 0.21. Stays positive for any distance
/// the matcher's default budget allows, and below every cleaner tier.
#[inline]
pub fn fuzzy_quality(distance: usize) -> f64 {
    FUZZY_BASE_QUALITY * (1.0 - distance as f64 * EDIT_DISTANCE_PENALTY)
}

/// Weighted score of one term hitting one field at some quality.
#[inline]
pub fn term_score(field: MatchField, quality: f64) -> f64 {
    field_weight(field) * quality
}
