//! Registry mutations as seen through the suggestion pipeline.

use omnibar::{ItemPatch, QueryContext, SearchableItem};

use super::common::{demo_engine, ids_of, make_item, make_tagged_item};

/// Re-inserting an id keeps its slot in tie-breaking; only the fields
/// change.
#[test]
fn upsert_keeps_the_original_slot() {
    let engine = demo_engine();
    engine.insert_item(make_item("slot-1", "Metrics"));
    engine.insert_item(make_item("slot-2", "Metrics"));

    engine.insert_item(SearchableItem {
        description: Some("Refreshed nightly".to_string()),
        ..make_item("slot-1", "Metrics")
    });

    let suggestions = engine.suggest("metrics", &QueryContext::default()).unwrap();
    assert_eq!(ids_of(&suggestions), vec!["ai-analyze", "slot-1", "slot-2"]);

    let refreshed = suggestions.iter().find(|s| s.id == "slot-1").unwrap();
    assert_eq!(refreshed.description.as_deref(), Some("Refreshed nightly"));
}

#[test]
fn patch_updates_only_named_fields() {
    let engine = demo_engine();
    engine.insert_item(SearchableItem {
        description: Some("Spend split by channel".to_string()),
        ..make_item("rev-1", "Spend Breakdown")
    });

    let changed = engine.update_item(
        "rev-1",
        ItemPatch {
            title: Some("Revenue Explorer".to_string()),
            ..ItemPatch::default()
        },
    );
    assert!(changed);

    let renamed = engine.suggest("revenue", &QueryContext::default()).unwrap();
    let row = renamed.iter().find(|s| s.id == "rev-1").unwrap();
    assert_eq!(row.text, "Revenue Explorer");
    assert_eq!(row.description.as_deref(), Some("Spend split by channel"));

    let stale = engine.suggest("breakdown", &QueryContext::default()).unwrap();
    assert!(!ids_of(&stale).contains(&"rev-1"));
}

#[test]
fn patch_on_missing_id_is_a_quiet_no_op() {
    let engine = demo_engine();
    let before = engine.item_count();

    let changed = engine.update_item(
        "ghost",
        ItemPatch {
            title: Some("Haunted".to_string()),
            ..ItemPatch::default()
        },
    );

    assert!(!changed);
    assert_eq!(engine.item_count(), before);
    let haunted = engine.suggest("haunted", &QueryContext::default()).unwrap();
    assert!(haunted.is_empty());
}

#[test]
fn remove_retires_an_item_from_results() {
    let engine = demo_engine();
    engine.insert_item(make_item("tmp-1", "Sandbox Experiments"));

    let visible = engine.suggest("sandbox", &QueryContext::default()).unwrap();
    assert!(ids_of(&visible).contains(&"tmp-1"));

    let removed = engine.remove_item("tmp-1").unwrap();
    assert_eq!(removed.title, "Sandbox Experiments");

    let gone = engine.suggest("sandbox", &QueryContext::default()).unwrap();
    assert!(gone.is_empty());

    assert!(engine.remove_item("tmp-1").is_none(), "second remove is a no-op");
}

#[test]
fn tags_fold_to_lowercase_on_insert() {
    let engine = demo_engine();
    engine.insert_item(make_tagged_item("vip-1", "Key Accounts", &["VIP"]));

    assert_eq!(engine.get_item("vip-1").unwrap().tags, vec!["vip"]);

    let found = engine.suggest("vip", &QueryContext::default()).unwrap();
    assert!(ids_of(&found).contains(&"vip-1"));
}

#[test]
fn patch_replaces_tags_wholesale() {
    let engine = demo_engine();
    engine.insert_item(make_tagged_item("seg-1", "Loyal Buyers", &["legacy", "vip"]));

    engine.update_item(
        "seg-1",
        ItemPatch {
            tags: Some(vec!["premium".to_string()]),
            ..ItemPatch::default()
        },
    );

    let stale = engine.suggest("legacy", &QueryContext::default()).unwrap();
    assert!(!ids_of(&stale).contains(&"seg-1"));

    let fresh = engine.suggest("premium", &QueryContext::default()).unwrap();
    assert!(ids_of(&fresh).contains(&"seg-1"));
}
