// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Core data model: searchable items, suggestions, and match results.
//!
//! Everything the engine hands across its boundary is defined here and
//! serializes with serde. Wire names follow the dashboard's JSON
//! conventions: camelCase keys, `type` for kind discriminators, and the
//! literal string `"ai"` for intent suggestions.
//!
//! # Suggestion provenance
//!
//! Every [`Suggestion`] carries the [`SuggestionKind`] it was produced by
//! (recent history, popular seed, intent rule, filter, shortcut, or a
//! fuzzy match over the registry). Consumers render and route on that
//! kind, so aggregation never erases where a row came from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// ITEMS: What the registry holds
// =============================================================================

/// Insertion rank of an item in the registry.
///
/// Ranks are handed out once, in arrival order, and survive upserts: an
/// item re-inserted under an existing id keeps the rank of the original.
/// The match ranker uses this as its final tie-break so equal-quality
/// results come back in a stable, registration-ordered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Rank(pub u64);

impl Rank {
    /// Create a rank from a raw counter value.
    #[inline]
    pub fn new(value: u64) -> Self {
        Rank(value)
    }

    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for Rank {
    fn from(value: u64) -> Self {
        Rank(value)
    }
}

impl From<Rank> for u64 {
    fn from(rank: Rank) -> Self {
        rank.0
    }
}

/// What kind of dashboard entity an item represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Audience,
    Campaign,
    Client,
    Page,
    Report,
}

impl ItemKind {
    /// String name matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Audience => "audience",
            ItemKind::Campaign => "campaign",
            ItemKind::Client => "client",
            ItemKind::Page => "page",
            ItemKind::Report => "report",
        }
    }

    /// Plural path segment used when an item carries no explicit href.
    ///
    /// A `campaign` item with id `campaign-7` and no `meta.href` resolves
    /// to `/campaigns/campaign-7`.
    pub fn route_segment(&self) -> &'static str {
        match self {
            ItemKind::Audience => "audiences",
            ItemKind::Campaign => "campaigns",
            ItemKind::Client => "clients",
            ItemKind::Page => "pages",
            ItemKind::Report => "reports",
        }
    }
}

/// One searchable entity in the registry.
///
/// `tags` are stored lowercase; the registry normalizes them on insert so
/// the matcher can compare without re-folding case on every query. `meta`
/// is an open key/value bag for anything the host dashboard wants to
/// carry along; the engine itself only reads the `href` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchableItem {
    /// Unique id, stable across upserts (e.g. "audience-1").
    pub id: String,
    /// Display title shown in suggestion rows.
    pub title: String,
    /// Entity kind.
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Grouping label ("Audiences", "Campaigns", ...).
    pub category: String,
    /// Optional longer description, also searched (at the lowest weight).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Lowercase keywords, searched just below the title.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Open metadata bag. `href` is the only key the engine interprets.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
}

impl SearchableItem {
    /// Navigation target carried in `meta`, if any.
    #[inline]
    pub fn href(&self) -> Option<&str> {
        self.meta.get("href").map(String::as_str)
    }

    /// Href to use when this item becomes a result suggestion: the
    /// explicit `meta.href` if present, otherwise a route derived from
    /// the kind and id.
    pub fn resolved_href(&self) -> String {
        match self.href() {
            Some(href) => href.to_string(),
            None => format!("/{}/{}", self.kind.route_segment(), self.id),
        }
    }
}

/// Partial update for a registered item.
///
/// A populated field replaces the stored value; absent fields are left
/// untouched. `tags` and `meta` replace wholesale, not element-wise.
/// Clearing a description back to `None` requires re-inserting the item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub kind: Option<ItemKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<BTreeMap<String, String>>,
}

impl ItemPatch {
    /// Merge this patch into an existing item, field by field.
    pub fn apply_to(self, item: &mut SearchableItem) {
        if let Some(title) = self.title {
            item.title = title;
        }
        if let Some(kind) = self.kind {
            item.kind = kind;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(description) = self.description {
            item.description = Some(description);
        }
        if let Some(tags) = self.tags {
            item.tags = tags;
        }
        if let Some(meta) = self.meta {
            item.meta = meta;
        }
    }

    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.kind.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.tags.is_none()
            && self.meta.is_none()
    }
}

// =============================================================================
// MATCH RESULTS: What the fuzzy matcher returns
// =============================================================================

/// Which item field produced the best match for a query.
///
/// # Gotcha
///
/// The derived ordering doubles as match ranking: `Title < Tag` means a
/// title hit outranks a tag hit, so sorting ascending by field puts the
/// strongest bucket first. New fields must be added in rank position,
/// not appended at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    /// Matched in the item title (strongest signal).
    Title,
    /// Matched in a tag.
    Tag,
    /// Matched in the category label.
    Category,
    /// Matched in the description (weakest signal).
    Description,
}

impl MatchField {
    /// String name matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchField::Title => "title",
            MatchField::Tag => "tag",
            MatchField::Category => "category",
            MatchField::Description => "description",
        }
    }
}

/// One registry item that matched a query, with ranking metadata.
///
/// `field` is the best field any term hit (the item's ranking bucket)
/// and `score` sums the weighted per-term scores across all fields. The
/// full item rides along so callers can render without a second registry
/// lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredMatch {
    /// The matched item, cloned out of the registry.
    pub item: SearchableItem,
    /// Best field bucket across all query terms.
    pub field: MatchField,
    /// Summed weighted score (higher is better).
    pub score: f64,
    /// Insertion rank of the item, the final tie-break.
    pub rank: Rank,
}

// =============================================================================
// SUGGESTIONS: What the aggregator produces
// =============================================================================

/// Where a suggestion came from.
///
/// Serialized names match the dashboard wire format, which spells the
/// intent kind `"ai"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    /// A recently submitted query.
    Recent,
    /// A seeded popular query.
    Popular,
    /// Produced by the keyword intent rules.
    #[serde(rename = "ai")]
    Intent,
    /// Toggles a result filter.
    Filter,
    /// A keyboard shortcut entry.
    Shortcut,
    /// A fuzzy match from the item registry.
    Result,
}

impl SuggestionKind {
    /// String name matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionKind::Recent => "recent",
            SuggestionKind::Popular => "popular",
            SuggestionKind::Intent => "ai",
            SuggestionKind::Filter => "filter",
            SuggestionKind::Shortcut => "shortcut",
            SuggestionKind::Result => "result",
        }
    }
}

/// What activating a suggestion does.
///
/// Closed set: the controller matches exhaustively on this, so every
/// producer states its effect in a form the controller already knows how
/// to execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum SuggestionAction {
    /// Navigate the host app to `href`.
    Navigate { href: String },
    /// Replace the query text with `text` and submit it.
    #[serde(rename_all = "camelCase")]
    FillQuery { text: String },
    /// Toggle `filter_id` in the active-filter set.
    #[serde(rename_all = "camelCase")]
    ToggleFilter { filter_id: String },
}

/// One row in the suggestion list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Unique id within one aggregation pass; duplicates are dropped
    /// keep-first during merging.
    pub id: String,
    /// Provenance kind.
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    /// Primary display text.
    pub text: String,
    /// Secondary display line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Grouping label for sectioned rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// What happens on activation.
    pub action: SuggestionAction,
}
