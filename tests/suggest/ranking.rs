//! End-to-end ranking: how result rows order themselves in a pass.

use omnibar::QueryContext;

use super::common::{demo_engine, ids_of, make_item, make_tagged_item};

/// A fuzzy title hit outranks an exact tag hit; buckets are
/// impermeable to score.
#[test]
fn title_bucket_outranks_richer_tag_scores() {
    let engine = demo_engine();
    // "budget" reaches "bucket" at edit distance two.
    engine.insert_item(make_item("idea-1", "Bucket List"));
    engine.insert_item(make_tagged_item("spend-1", "Spend Review", &["budget"]));

    let suggestions = engine.suggest("budget", &QueryContext::default()).unwrap();

    assert_eq!(ids_of(&suggestions), vec!["ai-optimize", "idea-1", "spend-1"]);
}

#[test]
fn every_term_must_match_somewhere() {
    let engine = demo_engine();

    let both = engine.suggest("summer sale", &QueryContext::default()).unwrap();
    assert!(ids_of(&both).contains(&"campaign-1"));

    // "billing" appears only on another item, so the conjunction fails.
    let neither = engine
        .suggest("summer billing", &QueryContext::default())
        .unwrap();
    assert!(neither.is_empty());
}

#[test]
fn higher_quality_wins_within_the_title_bucket() {
    let engine = demo_engine();
    engine.insert_item(make_item("r-exact", "Report"));
    engine.insert_item(make_item("r-prefix", "Reports Hub"));

    let suggestions = engine.suggest("report", &QueryContext::default()).unwrap();

    // Exact title beats word-prefix title beats the demo catalog's tag
    // hit; the intent keyword row leads the pass.
    assert_eq!(
        ids_of(&suggestions),
        vec!["ai-analyze", "r-exact", "r-prefix", "report-1"]
    );
}

#[test]
fn shorter_title_wins_on_equal_scores() {
    let engine = demo_engine();
    // Both land in the word-prefix tier, so the scores tie exactly;
    // the longer title is inserted first to rule out insertion order.
    engine.insert_item(make_item("v-long", "Sprint Velocity Overview"));
    engine.insert_item(make_item("v-short", "Team Velocity"));

    let suggestions = engine.suggest("velocity", &QueryContext::default()).unwrap();

    assert_eq!(ids_of(&suggestions), vec!["v-short", "v-long"]);
}

#[test]
fn insertion_rank_breaks_full_ties() {
    let engine = demo_engine();
    engine.insert_item(make_item("tie-1", "Metrics"));
    engine.insert_item(make_item("tie-2", "Metrics"));

    let first_pass = engine.suggest("metrics", &QueryContext::default()).unwrap();
    assert_eq!(ids_of(&first_pass), vec!["ai-analyze", "tie-1", "tie-2"]);

    // Removing and re-inserting sends the item to the back of the tie.
    engine.remove_item("tie-1");
    engine.insert_item(make_item("tie-1", "Metrics"));

    let second_pass = engine.suggest("metrics", &QueryContext::default()).unwrap();
    assert_eq!(ids_of(&second_pass), vec!["ai-analyze", "tie-2", "tie-1"]);
}

#[test]
fn matching_folds_case_and_diacritics() {
    let engine = demo_engine();
    engine.insert_item(make_item("venue-1", "Café Paris"));

    let plain = engine.suggest("cafe paris", &QueryContext::default()).unwrap();
    assert!(ids_of(&plain).contains(&"venue-1"));

    let shouted = engine.suggest("CAFÉ", &QueryContext::default()).unwrap();
    assert!(ids_of(&shouted).contains(&"venue-1"));
}
