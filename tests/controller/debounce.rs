//! Debounce timing: window resets, stale fetches, and phase stepping.
//!
//! All tests run on the paused tokio clock, so every sleep is virtual
//! and the schedules below are exact.

use std::sync::Arc;
use std::time::Duration;

use omnibar::QueryPhase;
use tokio::time::{sleep, Instant};

use super::common::{scripted_controller, snapshots_until, wait_until, ScriptedSource};

#[tokio::test(start_paused = true)]
async fn rapid_keystrokes_collapse_to_one_search() {
    let source = ScriptedSource::instant();
    let controller = scripted_controller(Arc::clone(&source), 250);
    let mut state = controller.watch();

    controller.set_query("a");
    controller.set_query("ab");
    controller.set_query("abc");

    let settled = wait_until(&mut state, |s| s.phase == QueryPhase::Ready).await;
    assert_eq!(settled.query, "abc");
    assert_eq!(settled.suggestions[0].text, "abc");
    assert_eq!(source.calls(), vec!["abc"], "only the settled text may fetch");

    controller.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn window_restarts_on_each_keystroke() {
    let source = ScriptedSource::instant();
    let controller = scripted_controller(Arc::clone(&source), 100);
    let mut state = controller.watch();

    controller.set_query("budge");
    // Half the window passes, then typing continues.
    sleep(Duration::from_millis(50)).await;
    controller.set_query("budget");

    let settled = wait_until(&mut state, |s| s.phase == QueryPhase::Ready).await;
    assert_eq!(settled.query, "budget");
    assert_eq!(source.calls(), vec!["budget"], "the first window must reset, not fire");

    controller.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn empty_query_skips_the_window() {
    let source = ScriptedSource::instant();
    let controller = scripted_controller(Arc::clone(&source), 250);
    let mut state = controller.watch();

    let started = Instant::now();
    controller.set_query("");

    let settled = wait_until(&mut state, |s| s.phase == QueryPhase::Ready).await;
    assert_eq!(settled.query, "");
    assert_eq!(source.calls(), vec![""]);
    assert_eq!(
        started.elapsed(),
        Duration::ZERO,
        "the defaults view must not wait out a debounce window"
    );

    controller.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn submit_bypasses_the_window_and_records() {
    let source = ScriptedSource::instant();
    let controller = scripted_controller(Arc::clone(&source), 250);
    let mut state = controller.watch();

    let started = Instant::now();
    controller.submit("fitness gear");

    let settled = wait_until(&mut state, |s| s.phase == QueryPhase::Ready).await;
    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(settled.last_submitted.as_deref(), Some("fitness gear"));
    assert_eq!(source.recorded(), vec!["fitness gear"]);
    assert_eq!(source.calls(), vec!["fitness gear"]);

    controller.shutdown().await;
}

/// A fetch that completes after the input moved on is dropped without
/// touching the snapshot.
#[tokio::test(start_paused = true)]
async fn stale_results_never_render() {
    let source = ScriptedSource::delayed(50);
    let controller = scripted_controller(Arc::clone(&source), 100);
    let mut state = controller.watch();

    // Submit starts a slow fetch; more typing lands before it returns.
    controller.submit("budge");
    controller.set_query("budget");

    let seen = snapshots_until(&mut state, |s| s.phase == QueryPhase::Ready).await;
    let settled = seen.last().unwrap();
    assert_eq!(settled.query, "budget");
    assert_eq!(settled.suggestions[0].text, "budget");
    assert_eq!(source.calls(), vec!["budge", "budget"]);
    // The superseded submission never reached history.
    assert_eq!(source.recorded(), Vec::<String>::new());
    assert!(
        seen.iter()
            .all(|s| s.suggestions.iter().all(|row| row.text != "budge")),
        "INVARIANT VIOLATED: stale fetch results leaked into the snapshot"
    );

    controller.shutdown().await;
}

/// A newer submission replaces the in-flight future outright; the older
/// fetch is cancelled mid-sleep and never completes.
#[tokio::test(start_paused = true)]
async fn superseding_cancels_the_running_fetch() {
    let source = ScriptedSource::delayed(200);
    let controller = scripted_controller(Arc::clone(&source), 50);
    let mut state = controller.watch();

    controller.submit("first");
    // Give the task one turn so the first fetch actually starts.
    sleep(Duration::from_millis(10)).await;
    controller.submit("second");

    let settled = wait_until(&mut state, |s| s.phase == QueryPhase::Ready).await;
    assert_eq!(settled.query, "second");
    assert_eq!(settled.suggestions[0].text, "second");
    assert_eq!(source.calls(), vec!["first", "second"]);
    // Only the submission that completed reaches history.
    assert_eq!(source.recorded(), vec!["second"]);

    controller.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn failed_fetch_surfaces_the_error_and_recovers() {
    let source = ScriptedSource::failing_on("boom");
    let controller = scripted_controller(Arc::clone(&source), 50);
    let mut state = controller.watch();

    controller.submit("boom");
    let failed = wait_until(&mut state, |s| s.phase == QueryPhase::Failed).await;
    assert!(failed.error.as_deref().unwrap().contains("scripted failure"));
    assert!(failed.suggestions.is_empty());
    assert!(!failed.is_loading());

    controller.submit("fine");
    let recovered = wait_until(&mut state, |s| s.phase == QueryPhase::Ready).await;
    assert_eq!(recovered.suggestions[0].text, "fine");
    assert_eq!(recovered.error, None);

    controller.shutdown().await;
}

/// Recency history only learns queries whose fetch actually landed.
#[tokio::test(start_paused = true)]
async fn only_successful_submissions_reach_history() {
    let source = ScriptedSource::failing_on("doomed query");
    let controller = scripted_controller(Arc::clone(&source), 50);
    let mut state = controller.watch();

    controller.submit("doomed query");
    wait_until(&mut state, |s| s.phase == QueryPhase::Failed).await;
    assert_eq!(source.recorded(), Vec::<String>::new());

    controller.submit("landed query");
    wait_until(&mut state, |s| s.phase == QueryPhase::Ready).await;
    assert_eq!(source.recorded(), vec!["landed query"]);

    controller.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn phases_step_through_debounce_search_ready() {
    let source = ScriptedSource::delayed(30);
    let controller = scripted_controller(Arc::clone(&source), 100);
    let mut state = controller.watch();

    controller.set_query("budget");
    let seen = snapshots_until(&mut state, |s| s.phase == QueryPhase::Ready).await;

    let phases: Vec<QueryPhase> = seen.iter().map(|s| s.phase).collect();
    assert_eq!(
        phases,
        vec![
            QueryPhase::Idle,
            QueryPhase::Debouncing,
            QueryPhase::Searching,
            QueryPhase::Ready,
        ]
    );
    assert!(
        seen.iter()
            .all(|s| s.is_loading() == (s.phase == QueryPhase::Searching)),
        "INVARIANT VIOLATED: loading must track the Searching phase exactly"
    );

    controller.shutdown().await;
}
