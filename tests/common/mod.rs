//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use omnibar::{
    ControllerOptions, EngineConfig, Error, Navigator, NoopNavigator, QueryContext,
    QueryController, Result, SearchSnapshot, Suggestion, SuggestionAction, SuggestionEngine,
    SuggestionKind, SuggestionSource,
};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::time::timeout;

// Re-export canonical fixtures from omnibar::testing. Each harness
// compiles its own copy of this module and uses a different subset.
#[allow(unused_imports)]
pub use omnibar::testing::{
    demo_catalog, demo_item, make_fill_suggestion, make_item, make_kind_item, make_tagged_item,
};

// ============================================================================
// ENGINE BUILDERS
// ============================================================================

/// Engine over the demo catalog with memory-only history.
pub fn demo_engine() -> SuggestionEngine {
    SuggestionEngine::in_memory(EngineConfig::default()).with_items(demo_catalog())
}

/// Like [`demo_engine`], but with a caller-tuned config.
pub fn demo_engine_with(config: EngineConfig) -> SuggestionEngine {
    SuggestionEngine::in_memory(config).with_items(demo_catalog())
}

/// Context with the given filters active and no limit override.
pub fn context_with_filters(ids: &[&str]) -> QueryContext {
    QueryContext {
        active_filters: ids.iter().map(|id| id.to_string()).collect(),
        ..QueryContext::default()
    }
}

// ============================================================================
// SUGGESTION LITERALS
// ============================================================================
//
// The controller only inspects `kind` and `action`; display fields are
// filled with plausible stand-ins.

/// A result row pointing at `href`, as the aggregator would emit.
pub fn result_suggestion(id: &str, title: &str, href: &str) -> Suggestion {
    Suggestion {
        id: id.to_string(),
        kind: SuggestionKind::Result,
        text: title.to_string(),
        description: None,
        category: None,
        action: SuggestionAction::Navigate {
            href: href.to_string(),
        },
    }
}

/// A filter toggle row, the defaults-view shape for filters.
pub fn toggle_suggestion(filter_id: &str) -> Suggestion {
    Suggestion {
        id: format!("filter-{filter_id}"),
        kind: SuggestionKind::Filter,
        text: format!("Only {filter_id}"),
        description: None,
        category: Some("Filters".to_string()),
        action: SuggestionAction::ToggleFilter {
            filter_id: filter_id.to_string(),
        },
    }
}

/// A shortcut row, the defaults-view shape for keyboard shortcuts.
pub fn shortcut_suggestion(id: &str, label: &str, href: &str) -> Suggestion {
    Suggestion {
        id: format!("shortcut-{id}"),
        kind: SuggestionKind::Shortcut,
        text: label.to_string(),
        description: None,
        category: Some("Shortcuts".to_string()),
        action: SuggestionAction::Navigate {
            href: href.to_string(),
        },
    }
}

// ============================================================================
// SCRIPTED SOURCES AND NAVIGATORS
// ============================================================================

/// Suggestion source that logs every call, for controller tests.
///
/// Each fetch answers with a single result row echoing the query,
/// after an optional delay on the virtual clock. Queries matching
/// `fail_on` error instead.
pub struct ScriptedSource {
    calls: Mutex<Vec<String>>,
    recorded: Mutex<Vec<String>>,
    contexts: Mutex<Vec<Vec<String>>>,
    delay: Duration,
    fail_on: Option<String>,
}

impl ScriptedSource {
    /// Source that answers immediately.
    pub fn instant() -> Arc<Self> {
        Self::build(Duration::ZERO, None)
    }

    /// Source that answers after `ms` of virtual time.
    pub fn delayed(ms: u64) -> Arc<Self> {
        Self::build(Duration::from_millis(ms), None)
    }

    /// Source that fails whenever `query` is fetched.
    pub fn failing_on(query: &str) -> Arc<Self> {
        Self::build(Duration::ZERO, Some(query.to_string()))
    }

    fn build(delay: Duration, fail_on: Option<String>) -> Arc<Self> {
        Arc::new(ScriptedSource {
            calls: Mutex::new(Vec::new()),
            recorded: Mutex::new(Vec::new()),
            contexts: Mutex::new(Vec::new()),
            delay,
            fail_on,
        })
    }

    /// Queries fetched so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Queries recorded into history so far, in call order.
    pub fn recorded(&self) -> Vec<String> {
        self.recorded.lock().clone()
    }

    /// Active-filter sets observed per fetch, in call order.
    pub fn contexts(&self) -> Vec<Vec<String>> {
        self.contexts.lock().clone()
    }
}

#[async_trait]
impl SuggestionSource for ScriptedSource {
    async fn fetch(&self, query: &str, context: &QueryContext) -> Result<Vec<Suggestion>> {
        self.calls.lock().push(query.to_string());
        self.contexts.lock().push(context.active_filters.clone());
        if self.delay > Duration::ZERO {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail_on.as_deref() == Some(query) {
            return Err(Error::source_failure("scripted failure"));
        }
        Ok(vec![result_suggestion(
            &format!("echo-{query}"),
            query,
            "/echo",
        )])
    }

    fn record(&self, query: &str) {
        self.recorded.lock().push(query.to_string());
    }
}

/// Navigator that appends every href it is asked to visit.
#[derive(Default)]
pub struct RecordingNavigator {
    hrefs: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn hrefs(&self) -> Vec<String> {
        self.hrefs.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, href: &str) {
        self.hrefs.lock().push(href.to_string());
    }
}

/// Controller over a scripted source with a millisecond debounce window.
pub fn scripted_controller(source: Arc<ScriptedSource>, debounce_ms: u64) -> QueryController {
    scripted_controller_with_nav(source, Arc::new(NoopNavigator), debounce_ms)
}

/// Like [`scripted_controller`] with a caller-supplied navigator.
pub fn scripted_controller_with_nav(
    source: Arc<ScriptedSource>,
    navigator: Arc<dyn Navigator>,
    debounce_ms: u64,
) -> QueryController {
    let typed: Arc<dyn SuggestionSource> = source;
    QueryController::spawn(
        typed,
        navigator,
        ControllerOptions {
            debounce: Duration::from_millis(debounce_ms),
            max_results: None,
        },
    )
}

// ============================================================================
// SNAPSHOT HELPERS
// ============================================================================

/// Wait until the controller snapshot satisfies `predicate`.
///
/// Panics after two seconds of virtual time so a hung controller fails
/// the test instead of wedging the suite.
pub async fn wait_until(
    rx: &mut watch::Receiver<SearchSnapshot>,
    predicate: impl Fn(&SearchSnapshot) -> bool,
) -> SearchSnapshot {
    let waited = timeout(Duration::from_secs(2), async {
        loop {
            {
                let snapshot = rx.borrow_and_update();
                if predicate(&snapshot) {
                    return snapshot.clone();
                }
            }
            if rx.changed().await.is_err() {
                panic!("INVARIANT VIOLATED: controller dropped its state channel");
            }
        }
    })
    .await;
    waited.unwrap_or_else(|_| {
        panic!("INVARIANT VIOLATED: controller never reached the expected state")
    })
}

/// Every snapshot observed until one satisfies `predicate`, inclusive.
pub async fn snapshots_until(
    rx: &mut watch::Receiver<SearchSnapshot>,
    predicate: impl Fn(&SearchSnapshot) -> bool,
) -> Vec<SearchSnapshot> {
    let collected = timeout(Duration::from_secs(2), async {
        let mut seen = Vec::new();
        loop {
            {
                let snapshot = rx.borrow_and_update();
                seen.push(snapshot.clone());
                if predicate(&snapshot) {
                    return seen;
                }
            }
            if rx.changed().await.is_err() {
                panic!("INVARIANT VIOLATED: controller dropped its state channel");
            }
        }
    })
    .await;
    collected.unwrap_or_else(|_| {
        panic!("INVARIANT VIOLATED: controller never reached the expected state")
    })
}

// ============================================================================
// INVARIANT ASSERTS
// ============================================================================

/// Assert a pass stays within the cap and never repeats an id.
pub fn assert_pass_well_formed(suggestions: &[Suggestion], cap: usize) {
    assert!(
        suggestions.len() <= cap,
        "INVARIANT VIOLATED: {} suggestions exceed the cap of {cap}",
        suggestions.len()
    );
    let mut ids: Vec<&str> = suggestions.iter().map(|s| s.id.as_str()).collect();
    let before = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(
        before,
        ids.len(),
        "INVARIANT VIOLATED: duplicate suggestion ids in one pass"
    );
}

/// Assert none of `kinds` appears in the pass.
pub fn assert_kinds_absent(suggestions: &[Suggestion], kinds: &[SuggestionKind]) {
    for suggestion in suggestions {
        assert!(
            !kinds.contains(&suggestion.kind),
            "INVARIANT VIOLATED: kind {:?} must not appear here (id {})",
            suggestion.kind,
            suggestion.id
        );
    }
}

/// Suggestion ids of a pass, in order.
pub fn ids_of(suggestions: &[Suggestion]) -> Vec<&str> {
    suggestions.iter().map(|s| s.id.as_str()).collect()
}

/// Suggestion kinds of a pass, in order.
pub fn kinds_of(suggestions: &[Suggestion]) -> Vec<SuggestionKind> {
    suggestions.iter().map(|s| s.kind).collect()
}
