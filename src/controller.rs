// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The debounced query controller.
//!
//! Hosts feed raw keystrokes in and render snapshots out; the controller
//! owns the timing story in between:
//!
//! - keystrokes restart a debounce window instead of searching directly
//! - at most one fetch is in flight, and newer input supersedes it
//! - a finished fetch is compared against the latest input and dropped
//!   when stale, so results for an abandoned query never render
//! - explicit submits and suggestion activation skip the window
//! - a committed query reaches recency history only once its fetch
//!   comes back successful; failed or superseded fetches record nothing
//!
//! State is published through a `tokio::sync::watch` channel as whole
//! [`SearchSnapshot`] values. Hosts re-render from each snapshot rather
//! than diffing events, which keeps them correct under dropped frames.
//!
//! The controller runs as one spawned task; [`QueryController`] is the
//! cheap handle the host keeps. Dropping the handle stops the task.

use std::collections::BTreeSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Sleep};
use tracing::{trace, warn};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::suggest::{QueryContext, SuggestionEngine};
use crate::types::{Suggestion, SuggestionAction, SuggestionKind};

// ======================================================================
// Phases and snapshots
// ======================================================================

/// Where a query currently is in its lifecycle.
///
/// # Gotcha
///
/// `Debouncing` is not a loading state. The UI keeps showing the
/// previous suggestions while the window runs; only `Searching` means a
/// fetch is actually executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryPhase {
    /// No input yet.
    #[default]
    Idle,
    /// Input arrived; the debounce window is running.
    Debouncing,
    /// A fetch is in flight.
    Searching,
    /// The latest fetch finished and its suggestions are current.
    Ready,
    /// The latest fetch failed.
    Failed,
}

impl QueryPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryPhase::Idle => "idle",
            QueryPhase::Debouncing => "debouncing",
            QueryPhase::Searching => "searching",
            QueryPhase::Ready => "ready",
            QueryPhase::Failed => "failed",
        }
    }
}

/// The full controller state at one point in time.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnapshot {
    /// The latest input text, exactly as typed.
    pub query: String,
    pub phase: QueryPhase,
    /// Suggestions for `query`, or the previous list while debouncing.
    pub suggestions: Vec<Suggestion>,
    /// Human-readable failure, set only in [`QueryPhase::Failed`].
    pub error: Option<String>,
    /// Active filter ids, sorted.
    pub active_filters: Vec<String>,
    /// The last query committed via submit or a fill-in suggestion.
    pub last_submitted: Option<String>,
}

impl SearchSnapshot {
    /// True only while a fetch is executing; debouncing does not count.
    #[inline]
    pub fn is_loading(&self) -> bool {
        self.phase == QueryPhase::Searching
    }
}

/// Tunables the controller takes at spawn time.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Quiet period after the last keystroke before a fetch starts.
    pub debounce: Duration,
    /// Per-fetch cap override; `None` uses the source's own cap.
    pub max_results: Option<usize>,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        ControllerOptions {
            debounce: Duration::from_millis(250),
            max_results: None,
        }
    }
}

impl ControllerOptions {
    /// Options matching an engine config's debounce window.
    pub fn from_config(config: &EngineConfig) -> Self {
        ControllerOptions {
            debounce: config.debounce(),
            ..ControllerOptions::default()
        }
    }
}

// ======================================================================
// Sources and navigation
// ======================================================================

/// Where the controller gets suggestions from.
///
/// [`SuggestionEngine`] is the in-process implementation; hosts that
/// proxy to a backend implement this over their transport instead.
#[async_trait]
pub trait SuggestionSource: Send + Sync + 'static {
    /// Produce suggestions for a query under the given context.
    async fn fetch(&self, query: &str, context: &QueryContext) -> Result<Vec<Suggestion>>;

    /// Record a committed query into recency history.
    fn record(&self, query: &str);
}

#[async_trait]
impl SuggestionSource for SuggestionEngine {
    async fn fetch(&self, query: &str, context: &QueryContext) -> Result<Vec<Suggestion>> {
        self.suggest(query, context)
    }

    fn record(&self, query: &str) {
        self.record_query(query);
    }
}

/// Side-effect sink for navigate actions.
pub trait Navigator: Send + Sync + 'static {
    fn navigate(&self, href: &str);
}

/// Navigator that goes nowhere, for tests and headless use.
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, _href: &str) {}
}

// ======================================================================
// The handle
// ======================================================================

enum Msg {
    SetQuery(String),
    Submit(String),
    Activate(Suggestion),
    Shutdown,
}

/// Handle to a running controller task.
pub struct QueryController {
    tx: mpsc::UnboundedSender<Msg>,
    state: watch::Receiver<SearchSnapshot>,
    task: Option<JoinHandle<()>>,
}

impl QueryController {
    /// Spawn the controller task over any suggestion source.
    pub fn spawn(
        source: Arc<dyn SuggestionSource>,
        navigator: Arc<dyn Navigator>,
        options: ControllerOptions,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SearchSnapshot::default());
        let task = ControllerTask {
            source,
            navigator,
            options,
            state: state_tx,
            filters: BTreeSet::new(),
            pending_record: None,
        };
        let handle = tokio::spawn(task.run(rx));
        QueryController {
            tx,
            state: state_rx,
            task: Some(handle),
        }
    }

    /// Controller over a local engine with no navigation side effects.
    pub fn for_engine(engine: Arc<SuggestionEngine>, options: ControllerOptions) -> Self {
        Self::spawn(engine, Arc::new(NoopNavigator), options)
    }

    /// Report the current input text. Starts or restarts the debounce
    /// window; an empty query fetches the defaults view immediately.
    pub fn set_query(&self, query: impl Into<String>) {
        let _ = self.tx.send(Msg::SetQuery(query.into()));
    }

    /// Commit a query right now, skipping the debounce window. The
    /// query reaches recency history once its fetch succeeds.
    pub fn submit(&self, query: impl Into<String>) {
        let _ = self.tx.send(Msg::Submit(query.into()));
    }

    /// Act on a picked suggestion according to its action kind.
    pub fn activate(&self, suggestion: Suggestion) {
        let _ = self.tx.send(Msg::Activate(suggestion));
    }

    /// The current state.
    pub fn snapshot(&self) -> SearchSnapshot {
        self.state.borrow().clone()
    }

    /// A receiver that observes every state change.
    pub fn watch(&self) -> watch::Receiver<SearchSnapshot> {
        self.state.clone()
    }

    /// Ask the task to stop and wait for it to finish.
    pub async fn shutdown(mut self) {
        let _ = self.tx.send(Msg::Shutdown);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for QueryController {
    fn drop(&mut self) {
        let _ = self.tx.send(Msg::Shutdown);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

// ======================================================================
// The task
// ======================================================================

struct FetchOutcome {
    query: String,
    result: Result<Vec<Suggestion>>,
}

type PinnedFetch = Pin<Box<dyn Future<Output = FetchOutcome> + Send>>;

struct ControllerTask {
    source: Arc<dyn SuggestionSource>,
    navigator: Arc<dyn Navigator>,
    options: ControllerOptions,
    state: watch::Sender<SearchSnapshot>,
    filters: BTreeSet<String>,
    /// Committed query waiting for its fetch to land; recency recording
    /// only happens once that fetch comes back `Ok`.
    pending_record: Option<String>,
}

impl ControllerTask {
    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Msg>) {
        let mut debounce_timer: Option<Pin<Box<Sleep>>> = None;
        let mut in_flight: Option<PinnedFetch> = None;

        loop {
            tokio::select! {
                message = rx.recv() => {
                    let Some(message) = message else { break };
                    match message {
                        Msg::SetQuery(query) => {
                            // Typing past a submission abandons its record.
                            self.pending_record = None;
                            if query.trim().is_empty() {
                                // Nothing to type-ahead for; show defaults now.
                                debounce_timer = None;
                                in_flight = Some(self.begin_search(query));
                            } else {
                                self.note_typing(query);
                                debounce_timer = Some(Box::pin(sleep(self.options.debounce)));
                            }
                        }
                        Msg::Submit(query) => {
                            debounce_timer = None;
                            self.note_submission(&query);
                            in_flight = Some(self.begin_search(query));
                        }
                        Msg::Activate(suggestion) => {
                            self.activate(suggestion, &mut debounce_timer, &mut in_flight);
                        }
                        Msg::Shutdown => break,
                    }
                }
                _ = async {
                    if let Some(timer) = &mut debounce_timer {
                        timer.await;
                    }
                }, if debounce_timer.is_some() => {
                    debounce_timer = None;
                    let query = self.state.borrow().query.clone();
                    in_flight = Some(self.begin_search(query));
                }
                outcome = async {
                    match in_flight.as_mut() {
                        Some(fetch) => fetch.await,
                        None => std::future::pending().await,
                    }
                }, if in_flight.is_some() => {
                    in_flight = None;
                    self.apply_outcome(outcome);
                }
            }
        }
    }

    /// Record a keystroke and move to `Debouncing` without fetching.
    fn note_typing(&self, query: String) {
        self.state.send_modify(|snapshot| {
            snapshot.query = query;
            snapshot.phase = QueryPhase::Debouncing;
            snapshot.error = None;
        });
    }

    /// Flip the snapshot to `Searching` and build the fetch future.
    ///
    /// The future owns everything it needs, so assigning it over an
    /// older in-flight fetch cancels that fetch outright.
    fn begin_search(&self, query: String) -> PinnedFetch {
        self.state.send_modify(|snapshot| {
            snapshot.query = query.clone();
            snapshot.phase = QueryPhase::Searching;
            snapshot.error = None;
        });
        let context = QueryContext {
            max_results: self.options.max_results,
            active_filters: self.filters.iter().cloned().collect(),
        };
        let source = Arc::clone(&self.source);
        Box::pin(async move {
            let result = source.fetch(&query, &context).await;
            FetchOutcome { query, result }
        })
    }

    /// Note a committed query: `last_submitted` updates now, while the
    /// recency record is staged until the fetch for it succeeds.
    fn note_submission(&mut self, query: &str) {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            self.pending_record = None;
            return;
        }
        self.pending_record = Some(trimmed.to_string());
        self.state.send_modify(|snapshot| {
            snapshot.last_submitted = Some(trimmed.to_string());
        });
    }

    /// Record a committed query and remember it as the last submission.
    fn commit(&self, query: &str) {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return;
        }
        self.source.record(trimmed);
        self.state.send_modify(|snapshot| {
            snapshot.last_submitted = Some(trimmed.to_string());
        });
    }

    /// Apply a finished fetch, unless the input has moved on since.
    ///
    /// A staged recency record is settled here: recorded when its fetch
    /// comes back `Ok`, dropped when that fetch failed or went stale.
    fn apply_outcome(&mut self, outcome: FetchOutcome) {
        let staged = if self.pending_record.as_deref() == Some(outcome.query.trim()) {
            self.pending_record.take()
        } else {
            None
        };
        let current = self.state.borrow().query.clone();
        if outcome.query != current {
            trace!(fetched = %outcome.query, current = %current, "discarding stale results");
            return;
        }
        match outcome.result {
            Ok(suggestions) => {
                if let Some(query) = staged {
                    self.source.record(&query);
                }
                self.state.send_modify(|snapshot| {
                    snapshot.phase = QueryPhase::Ready;
                    snapshot.suggestions = suggestions;
                    snapshot.error = None;
                });
            }
            Err(error) => {
                warn!(%error, "suggestion fetch failed");
                self.state.send_modify(|snapshot| {
                    snapshot.phase = QueryPhase::Failed;
                    snapshot.suggestions.clear();
                    snapshot.error = Some(error.to_string());
                });
            }
        }
    }

    /// Branch on a picked suggestion's action.
    fn activate(
        &mut self,
        suggestion: Suggestion,
        debounce_timer: &mut Option<Pin<Box<Sleep>>>,
        in_flight: &mut Option<PinnedFetch>,
    ) {
        match suggestion.action {
            SuggestionAction::ToggleFilter { filter_id } => {
                if !self.filters.remove(&filter_id) {
                    self.filters.insert(filter_id);
                }
                let filters: Vec<String> = self.filters.iter().cloned().collect();
                self.state.send_modify(|snapshot| snapshot.active_filters = filters);
                // A filter click is not typing; refresh without a window.
                *debounce_timer = None;
                let query = self.state.borrow().query.clone();
                *in_flight = Some(self.begin_search(query));
            }
            SuggestionAction::FillQuery { text } => {
                *debounce_timer = None;
                self.note_submission(&text);
                *in_flight = Some(self.begin_search(text));
            }
            SuggestionAction::Navigate { href } => {
                // Picking a search hit commits the query that found it.
                if matches!(suggestion.kind, SuggestionKind::Result | SuggestionKind::Intent) {
                    let query = self.state.borrow().query.clone();
                    self.commit(&query);
                }
                self.navigator.navigate(&href);
            }
        }
    }
}
