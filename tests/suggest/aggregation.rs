//! Merge-order, dedup, cap, and filter behavior for live queries.

use omnibar::{EngineConfig, ItemKind, QueryContext, SuggestionAction, SuggestionKind};

use super::common::{
    assert_pass_well_formed, context_with_filters, demo_engine, demo_engine_with, ids_of, kinds_of,
    make_item, make_kind_item,
};

#[test]
fn intent_rows_lead_and_are_capped() {
    let engine = demo_engine();

    // Fires four keyword rules; only the first three survive the cap.
    let suggestions = engine
        .suggest("create millennial performance audience", &QueryContext::default())
        .unwrap();

    assert_eq!(
        ids_of(&suggestions),
        vec!["ai-audience-builder", "ai-create", "ai-analyze"]
    );
    assert!(suggestions.iter().all(|s| s.kind == SuggestionKind::Intent));
}

#[test]
fn results_follow_intent_rows() {
    let engine = demo_engine();

    let suggestions = engine
        .suggest("millennial shoppers", &QueryContext::default())
        .unwrap();

    assert_eq!(ids_of(&suggestions), vec!["ai-audience-builder", "audience-2"]);
    assert_eq!(
        kinds_of(&suggestions),
        vec![SuggestionKind::Intent, SuggestionKind::Result]
    );
}

/// An intent row and a registry item can share an id; the intent row
/// is pushed first and wins.
#[test]
fn duplicate_ids_keep_the_first_source() {
    let engine = demo_engine();
    engine.insert_item(make_item("ai-create", "Create Campaign Checklist"));
    engine.insert_item(make_item("page-9", "Create Guide"));

    let suggestions = engine.suggest("create", &QueryContext::default()).unwrap();

    let created: Vec<_> = suggestions.iter().filter(|s| s.id == "ai-create").collect();
    assert_eq!(created.len(), 1, "colliding id must appear exactly once");
    assert_eq!(created[0].kind, SuggestionKind::Intent);
    assert_eq!(created[0].text, "Start a new campaign");
    assert!(suggestions.iter().any(|s| s.id == "page-9"));
    assert_pass_well_formed(&suggestions, engine.config().max_results);
}

#[test]
fn merged_list_respects_the_config_cap() {
    let engine = demo_engine_with(EngineConfig {
        max_results: 4,
        ..EngineConfig::default()
    });
    for n in ["One", "Two", "Three", "Four", "Five", "Six"] {
        engine.insert_item(make_item(&format!("alpha-{n}"), &format!("Alpha {n}")));
    }

    let suggestions = engine.suggest("alpha", &QueryContext::default()).unwrap();

    assert_eq!(suggestions.len(), 4);
    assert!(suggestions.iter().all(|s| s.kind == SuggestionKind::Result));
    assert_pass_well_formed(&suggestions, 4);
}

/// A context limit replaces the config cap in both directions.
#[test]
fn context_limit_replaces_the_config_cap() {
    let engine = demo_engine_with(EngineConfig {
        max_results: 4,
        ..EngineConfig::default()
    });
    for n in ["One", "Two", "Three", "Four", "Five", "Six"] {
        engine.insert_item(make_item(&format!("alpha-{n}"), &format!("Alpha {n}")));
    }

    let narrowed = engine.suggest("alpha", &QueryContext::with_limit(2)).unwrap();
    assert_eq!(narrowed.len(), 2);

    let widened = engine.suggest("alpha", &QueryContext::with_limit(6)).unwrap();
    assert_eq!(widened.len(), 6);
}

#[test]
fn filters_admit_a_union_of_kinds() {
    let engine = demo_engine();

    let unfiltered = engine
        .suggest("q4 performance", &QueryContext::default())
        .unwrap();
    assert!(ids_of(&unfiltered).contains(&"ai-analyze"));
    assert!(ids_of(&unfiltered).contains(&"report-1"));

    // An audiences-only filter drops the report row but never the
    // intent row.
    let narrowed = engine
        .suggest("q4 performance", &context_with_filters(&["audiences"]))
        .unwrap();
    assert!(ids_of(&narrowed).contains(&"ai-analyze"));
    assert!(!ids_of(&narrowed).contains(&"report-1"));

    let widened = engine
        .suggest("q4 performance", &context_with_filters(&["audiences", "reports"]))
        .unwrap();
    assert!(ids_of(&widened).contains(&"report-1"));
}

/// An active filter reaches items the unfiltered ranking would crowd
/// out: the cap is spent on admitted kinds, not on dropped rows.
#[test]
fn filters_surface_items_crowded_out_of_the_cap() {
    let engine = demo_engine_with(EngineConfig {
        max_results: 4,
        ..EngineConfig::default()
    });
    for n in ["One", "Two", "Three", "Four", "Five", "Six"] {
        engine.insert_item(make_kind_item(
            &format!("campaign-{n}"),
            "Launch Checklist",
            ItemKind::Campaign,
            "Campaigns",
        ));
    }
    engine.insert_item(make_kind_item(
        "audience-9",
        "Big Launch Party",
        ItemKind::Audience,
        "Audiences",
    ));

    // Unfiltered, the prefix-matching campaigns fill the whole cap.
    let crowded = engine.suggest("launch", &QueryContext::default()).unwrap();
    assert_eq!(crowded.len(), 4);
    assert!(!ids_of(&crowded).contains(&"audience-9"));

    // Filtered, the audience is admitted instead of vanishing.
    let narrowed = engine
        .suggest("launch", &context_with_filters(&["audiences"]))
        .unwrap();
    assert_eq!(ids_of(&narrowed), vec!["audience-9"]);
}

#[test]
fn unknown_filter_ids_are_ignored_next_to_known_ones() {
    let engine = demo_engine();

    let suggestions = engine
        .suggest("millennial shoppers", &context_with_filters(&["ghost", "audiences"]))
        .unwrap();

    assert!(ids_of(&suggestions).contains(&"audience-2"));
}

/// Result rows navigate to the item's `href` meta when present, and to
/// a kind-derived route otherwise.
#[test]
fn result_rows_resolve_hrefs() {
    let engine = demo_engine();

    let seasonal = engine.suggest("summer", &QueryContext::default()).unwrap();
    let campaign = seasonal.iter().find(|s| s.id == "campaign-1").unwrap();
    assert_eq!(
        campaign.action,
        SuggestionAction::Navigate {
            href: "/campaigns/campaign-1".to_string()
        }
    );

    let valued = engine.suggest("high value", &QueryContext::default()).unwrap();
    let audience = valued.iter().find(|s| s.id == "audience-1").unwrap();
    assert_eq!(
        audience.action,
        SuggestionAction::Navigate {
            href: "/audiences/1".to_string()
        }
    );
}
