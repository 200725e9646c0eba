// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query history: recent submissions and seeded popular queries.
//!
//! [`RecentQueries`] is a bounded most-recent-first list with
//! case-insensitive dedup. Every mutation is pushed through a
//! [`QueryStore`]; if the store ever fails, the list logs one warning and
//! degrades to memory-only for the rest of the session. History is a
//! convenience, so persistence trouble must never take the search box
//! down with it.
//!
//! [`PopularQueries`] is the static counterpart: seeded once from config,
//! never written.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use crc32fast::Hasher as Crc32Hasher;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// On-disk format version for [`JsonQueryStore`].
const STORE_VERSION: u32 = 1;

// ============================================================================
// STORE TRAIT AND BACKENDS
// ============================================================================

/// Persistence backend for recent queries.
///
/// Implementations load the full list on startup and overwrite it on
/// every mutation. The lists are tiny (ten-ish short strings), so
/// wholesale rewrites beat incremental bookkeeping.
pub trait QueryStore: Send + Sync {
    /// Load the persisted queries, most recent first.
    fn load(&self) -> Result<Vec<String>>;

    /// Replace the persisted queries.
    fn save(&self, queries: &[String]) -> Result<()>;
}

/// Store that keeps queries in memory. Used by tests and by hosts that
/// do not want history to outlive the session.
#[derive(Debug, Default)]
pub struct MemoryQueryStore {
    queries: Mutex<Vec<String>>,
}

impl MemoryQueryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QueryStore for MemoryQueryStore {
    fn load(&self) -> Result<Vec<String>> {
        Ok(self.queries.lock().clone())
    }

    fn save(&self, queries: &[String]) -> Result<()> {
        *self.queries.lock() = queries.to_vec();
        Ok(())
    }
}

/// Checksummed JSON file envelope: `{ version, checksum, queries }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredHistory {
    version: u32,
    checksum: u32,
    queries: Vec<String>,
}

/// Store that persists queries to a JSON file with a CRC32 checksum.
///
/// A missing file loads as empty history. A file that fails to parse,
/// carries an unknown version, or fails the checksum is reported as
/// [`Error::StoreCorrupt`]; the caller decides whether to start fresh.
#[derive(Debug, Clone)]
pub struct JsonQueryStore {
    path: PathBuf,
}

impl JsonQueryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonQueryStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Compute CRC32 over the query list.
    fn checksum(queries: &[String]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        for query in queries {
            hasher.update(query.as_bytes());
            hasher.update(b"\n");
        }
        hasher.finalize()
    }
}

impl QueryStore for JsonQueryStore {
    fn load(&self) -> Result<Vec<String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(Error::StoreIo {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let stored: StoredHistory =
            serde_json::from_str(&raw).map_err(|err| Error::StoreCorrupt {
                path: self.path.clone(),
                reason: err.to_string(),
            })?;

        if stored.version != STORE_VERSION {
            return Err(Error::StoreCorrupt {
                path: self.path.clone(),
                reason: format!("unsupported version {}", stored.version),
            });
        }
        if Self::checksum(&stored.queries) != stored.checksum {
            return Err(Error::StoreCorrupt {
                path: self.path.clone(),
                reason: "checksum mismatch".to_string(),
            });
        }

        Ok(stored.queries)
    }

    fn save(&self, queries: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| Error::StoreIo {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        let stored = StoredHistory {
            version: STORE_VERSION,
            checksum: Self::checksum(queries),
            queries: queries.to_vec(),
        };
        let json = serde_json::to_string_pretty(&stored).map_err(|source| Error::StoreIo {
            path: self.path.clone(),
            source: source.into(),
        })?;
        fs::write(&self.path, json).map_err(|source| Error::StoreIo {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}

// ============================================================================
// RECENT QUERIES
// ============================================================================

/// Bounded most-recent-first query history.
pub struct RecentQueries {
    queries: VecDeque<String>,
    limit: usize,
    store: Box<dyn QueryStore>,
    degraded: bool,
}

impl RecentQueries {
    /// Create a history backed by `store`, loading whatever it holds.
    ///
    /// A failing load logs a warning and starts empty rather than
    /// erroring: stale history is worth less than a working search box.
    pub fn new(store: Box<dyn QueryStore>, limit: usize) -> Self {
        let queries = match store.load() {
            Ok(loaded) => {
                let mut queries: VecDeque<String> = loaded.into();
                queries.truncate(limit);
                queries
            }
            Err(error) => {
                warn!(%error, "failed to load recent queries; starting empty");
                VecDeque::new()
            }
        };
        RecentQueries {
            queries,
            limit,
            store,
            degraded: false,
        }
    }

    /// Memory-only history, mostly for tests.
    pub fn in_memory(limit: usize) -> Self {
        Self::new(Box::new(MemoryQueryStore::new()), limit)
    }

    /// Record a submitted query at the front of the history.
    ///
    /// The text is trimmed; an empty result is ignored. An existing
    /// entry equal under case folding is removed first, so re-running a
    /// query moves it to the front (with the latest spelling) instead of
    /// duplicating it. The list is then clipped to the limit and
    /// persisted.
    pub fn record(&mut self, query: &str) {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return;
        }
        let folded = trimmed.to_lowercase();
        self.queries.retain(|existing| existing.to_lowercase() != folded);
        self.queries.push_front(trimmed.to_string());
        self.queries.truncate(self.limit);
        self.persist();
    }

    /// Drop all history.
    pub fn clear(&mut self) {
        self.queries.clear();
        self.persist();
    }

    fn persist(&mut self) {
        if self.degraded {
            debug!("query store degraded earlier this session; keeping history in memory");
            return;
        }
        let snapshot = self.snapshot();
        if let Err(error) = self.store.save(&snapshot) {
            warn!(%error, "failed to persist recent queries; continuing in memory");
            self.degraded = true;
        }
    }

    /// The `n` most recent queries, newest first.
    pub fn top(&self, n: usize) -> impl Iterator<Item = &str> {
        self.queries.iter().take(n).map(String::as_str)
    }

    /// All queries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.queries.iter().map(String::as_str)
    }

    /// Owned copy of the history, newest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.queries.iter().cloned().collect()
    }

    /// True once a persist failure switched this history to memory-only.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

// ============================================================================
// POPULAR QUERIES
// ============================================================================

/// Read-only list of seeded popular queries.
///
/// Seeded from config at startup. Nothing in the engine writes to it;
/// actual popularity tracking belongs to the host's analytics, not the
/// search box.
#[derive(Debug, Clone, Default)]
pub struct PopularQueries {
    queries: Vec<String>,
}

impl PopularQueries {
    /// Seed from a list, dropping entries that trim to empty.
    pub fn new(queries: impl IntoIterator<Item = String>) -> Self {
        PopularQueries {
            queries: queries
                .into_iter()
                .map(|query| query.trim().to_string())
                .filter(|query| !query.is_empty())
                .collect(),
        }
    }

    /// The first `n` seeded queries, in seed order.
    pub fn top(&self, n: usize) -> impl Iterator<Item = &str> {
        self.queries.iter().take(n).map(String::as_str)
    }

    /// All seeded queries, in seed order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.queries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

impl From<Vec<String>> for PopularQueries {
    fn from(queries: Vec<String>) -> Self {
        PopularQueries::new(queries)
    }
}
