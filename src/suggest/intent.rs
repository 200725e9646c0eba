// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Intent suggestions from a keyword rule table.
//!
//! This is a deterministic keyword classifier, nothing more: each rule
//! lists trigger substrings, and a rule fires when any of them appears
//! in the normalized query. Rules are checked in table order and the
//! first `limit` that fire become suggestions. Same query in, same
//! suggestions out, no network, no model.
//!
//! The rows are tagged [`SuggestionKind::Intent`], which serializes as
//! `"ai"` because that is what the dashboard calls this slot in its
//! wire format.

use crate::types::{Suggestion, SuggestionAction, SuggestionKind};
use crate::utils::normalize;

/// How a rule renders its display text.
enum Template {
    /// Fixed text, query ignored.
    Fixed(&'static str),
    /// Prefix followed by the normalized query in quotes.
    WithQuery(&'static str),
}

/// One keyword rule.
struct IntentRule {
    /// Stable rule id; the suggestion id is `ai-` + this.
    id: &'static str,
    /// Any of these substrings in the normalized query fires the rule.
    keywords: &'static [&'static str],
    text: Template,
    description: &'static str,
    category: &'static str,
    /// Where activating the suggestion navigates.
    href: &'static str,
}

/// The rule table, in priority order.
const RULES: &[IntentRule] = &[
    IntentRule {
        id: "audience-builder",
        keywords: &[
            "millennial",
            "gen z",
            "boomer",
            "gen x",
            "teen",
            "senior",
            "demographic",
        ],
        text: Template::WithQuery("Create audience for"),
        description: "Demographic keywords detected in your query",
        category: "Audiences",
        href: "/audiences/new",
    },
    IntentRule {
        id: "create",
        keywords: &["create", "new", "build", "draft"],
        text: Template::Fixed("Start a new campaign"),
        description: "Open the campaign builder",
        category: "Campaigns",
        href: "/campaigns/new",
    },
    IntentRule {
        id: "analyze",
        keywords: &["analyze", "analysis", "performance", "metrics", "report"],
        text: Template::Fixed("Open performance overview"),
        description: "Review performance across channels",
        category: "Reports",
        href: "/reports/performance",
    },
    IntentRule {
        id: "optimize",
        keywords: &["optimize", "improve", "budget", "spend"],
        text: Template::Fixed("Review budget allocation"),
        description: "Find underperforming spend",
        category: "Campaigns",
        href: "/campaigns/budget",
    },
    IntentRule {
        id: "compare",
        keywords: &["compare", "versus", " vs "],
        text: Template::Fixed("Compare campaigns side by side"),
        description: "Pick two campaigns to compare",
        category: "Reports",
        href: "/reports/compare",
    },
    IntentRule {
        id: "audiences",
        keywords: &["audience", "segment"],
        text: Template::Fixed("Browse all audiences"),
        description: "Open the audience list",
        category: "Audiences",
        href: "/audiences",
    },
];

/// Intent suggestions for a query: the first `limit` rules that fire.
///
/// An empty or all-whitespace query fires nothing; intent rows only
/// appear alongside search results.
pub fn intent_suggestions(query: &str, limit: usize) -> Vec<Suggestion> {
    let normalized = normalize(query);
    if normalized.is_empty() || limit == 0 {
        return Vec::new();
    }

    RULES
        .iter()
        .filter(|rule| rule.keywords.iter().any(|keyword| normalized.contains(keyword)))
        .take(limit)
        .map(|rule| render(rule, &normalized))
        .collect()
}

fn render(rule: &IntentRule, normalized_query: &str) -> Suggestion {
    let text = match rule.text {
        Template::Fixed(text) => text.to_string(),
        Template::WithQuery(prefix) => format!("{prefix} \"{normalized_query}\""),
    };
    Suggestion {
        id: format!("ai-{}", rule.id),
        kind: SuggestionKind::Intent,
        text,
        description: Some(rule.description.to_string()),
        category: Some(rule.category.to_string()),
        action: SuggestionAction::Navigate {
            href: rule.href.to_string(),
        },
    }
}
