//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use std::collections::BTreeMap;

use crate::types::{ItemKind, SearchableItem, Suggestion, SuggestionAction, SuggestionKind};

/// Create a simple test item with default fields.
///
/// This is the canonical implementation used across all tests.
pub fn make_item(id: &str, title: &str) -> SearchableItem {
    SearchableItem {
        id: id.to_string(),
        title: title.to_string(),
        kind: ItemKind::Page,
        category: "Pages".to_string(),
        description: None,
        tags: vec![],
        meta: BTreeMap::new(),
    }
}

/// Create a test item with tags.
pub fn make_tagged_item(id: &str, title: &str, tags: &[&str]) -> SearchableItem {
    SearchableItem {
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..make_item(id, title)
    }
}

/// Create a test item with an explicit kind and category.
pub fn make_kind_item(id: &str, title: &str, kind: ItemKind, category: &str) -> SearchableItem {
    SearchableItem {
        kind,
        category: category.to_string(),
        ..make_item(id, title)
    }
}

/// Create a fill-query suggestion, the shape recent/popular rows take.
pub fn make_fill_suggestion(id: &str, kind: SuggestionKind, text: &str) -> Suggestion {
    Suggestion {
        id: id.to_string(),
        kind,
        text: text.to_string(),
        description: None,
        category: None,
        action: SuggestionAction::FillQuery {
            text: text.to_string(),
        },
    }
}

/// A small marketing-dashboard catalog with every item kind represented.
///
/// Ids and titles are stable; several tests assert against them by name.
pub fn demo_catalog() -> Vec<SearchableItem> {
    vec![
        SearchableItem {
            description: Some("Customers with lifetime spend above $500".to_string()),
            meta: BTreeMap::from([("href".to_string(), "/audiences/1".to_string())]),
            ..make_kind_item("audience-1", "High-Value Customers", ItemKind::Audience, "Audiences")
        },
        SearchableItem {
            tags: vec!["audience".to_string(), "millennial".to_string()],
            ..make_kind_item("audience-2", "Millennial Shoppers", ItemKind::Audience, "Audiences")
        },
        SearchableItem {
            tags: vec!["campaign".to_string(), "sale".to_string(), "summer".to_string()],
            description: Some("Seasonal push across email and social".to_string()),
            ..make_kind_item("campaign-1", "Summer Sale Launch", ItemKind::Campaign, "Campaigns")
        },
        SearchableItem {
            tags: vec!["campaign".to_string(), "holiday".to_string()],
            ..make_kind_item("campaign-2", "Holiday Gift Guide", ItemKind::Campaign, "Campaigns")
        },
        SearchableItem {
            tags: vec!["client".to_string(), "retail".to_string()],
            ..make_kind_item("client-1", "Acme Retail Group", ItemKind::Client, "Clients")
        },
        make_kind_item("page-1", "Settings", ItemKind::Page, "Pages"),
        make_kind_item("page-2", "Billing", ItemKind::Page, "Pages"),
        SearchableItem {
            tags: vec!["report".to_string(), "performance".to_string(), "q4".to_string()],
            description: Some("Conversion and spend by channel".to_string()),
            ..make_kind_item("report-1", "Q4 Performance", ItemKind::Report, "Reports")
        },
    ]
}

/// Look up one [`demo_catalog`] item by id, panicking on a bad id.
pub fn demo_item(id: &str) -> SearchableItem {
    demo_catalog()
        .into_iter()
        .find(|item| item.id == id)
        .unwrap_or_else(|| panic!("no demo item with id {id:?}"))
}
