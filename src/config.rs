// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Engine configuration with sensible defaults.
//!
//! Everything tunable about the pipeline lives here: result caps, the
//! debounce window, the typo budget, history depth, and the seeded
//! content for the empty-query view (popular queries, filters,
//! shortcuts). Hosts usually start from [`EngineConfig::default`] and
//! override a field or two; the CLI loads the whole struct from a JSON
//! file with missing fields falling back to the defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::ItemKind;

/// One result filter the dashboard offers.
///
/// While a filter is active, result suggestions are restricted to its
/// item kind. Ids are referenced by
/// [`SuggestionAction::ToggleFilter`](crate::types::SuggestionAction)
/// and stored in the controller's active-filter set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDef {
    /// Stable id ("audiences").
    pub id: String,
    /// Display label ("Audiences only").
    pub label: String,
    /// Item kind this filter admits.
    pub kind: ItemKind,
}

/// One keyboard shortcut surfaced in the empty-query view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutDef {
    /// Stable id ("go-audiences").
    pub id: String,
    /// Display label ("Go to Audiences").
    pub label: String,
    /// Key sequence shown alongside the label ("g a").
    pub keys: String,
    /// Navigation target.
    pub href: String,
}

/// Tunables for the whole suggestion pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Cap on aggregated suggestions per pass.
    pub max_results: usize,
    /// Cap on intent suggestions per pass.
    pub intent_limit: usize,
    /// Recent queries shown in the empty-query view.
    pub recent_shown: usize,
    /// Popular queries shown in the empty-query view.
    pub popular_shown: usize,
    /// Recent queries kept in history.
    pub recent_limit: usize,
    /// Edit budget for the matcher's typo tier.
    pub max_edit_distance: usize,
    /// Debounce window for keystroke-driven searches, in milliseconds.
    pub debounce_ms: u64,
    /// Include filter toggles in the empty-query view.
    pub filter_suggestions: bool,
    /// Include shortcut entries in the empty-query view.
    pub shortcut_suggestions: bool,
    /// Seeded popular queries; read-only at runtime.
    pub popular_queries: Vec<String>,
    /// Result filters the dashboard offers.
    pub filters: Vec<FilterDef>,
    /// Keyboard shortcuts for the empty-query view.
    pub shortcuts: Vec<ShortcutDef>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_results: 8,
            intent_limit: 3,
            recent_shown: 3,
            popular_shown: 3,
            recent_limit: 10,
            max_edit_distance: 2,
            debounce_ms: 250,
            filter_suggestions: true,
            shortcut_suggestions: true,
            popular_queries: vec![
                "holiday campaigns".to_string(),
                "high-value customers".to_string(),
                "q4 performance".to_string(),
                "conversion rate".to_string(),
            ],
            filters: vec![
                FilterDef {
                    id: "audiences".to_string(),
                    label: "Audiences only".to_string(),
                    kind: ItemKind::Audience,
                },
                FilterDef {
                    id: "campaigns".to_string(),
                    label: "Campaigns only".to_string(),
                    kind: ItemKind::Campaign,
                },
                FilterDef {
                    id: "reports".to_string(),
                    label: "Reports only".to_string(),
                    kind: ItemKind::Report,
                },
            ],
            shortcuts: vec![
                ShortcutDef {
                    id: "go-audiences".to_string(),
                    label: "Go to Audiences".to_string(),
                    keys: "g a".to_string(),
                    href: "/audiences".to_string(),
                },
                ShortcutDef {
                    id: "go-campaigns".to_string(),
                    label: "Go to Campaigns".to_string(),
                    keys: "g c".to_string(),
                    href: "/campaigns".to_string(),
                },
                ShortcutDef {
                    id: "go-reports".to_string(),
                    label: "Go to Reports".to_string(),
                    keys: "g r".to_string(),
                    href: "/reports".to_string(),
                },
            ],
        }
    }
}

impl EngineConfig {
    /// Load a config from a JSON file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: EngineConfig =
            serde_json::from_str(&raw).map_err(|source| Error::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Debounce window as a [`Duration`].
    #[inline]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Look up a filter definition by id.
    pub fn filter(&self, id: &str) -> Option<&FilterDef> {
        self.filters.iter().find(|filter| filter.id == id)
    }

    /// Reject configs that would make the pipeline produce nothing.
    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(Error::ConfigInvalid("maxResults must be at least 1".to_string()));
        }
        if self.recent_limit == 0 {
            return Err(Error::ConfigInvalid("recentLimit must be at least 1".to_string()));
        }
        let mut filter_ids: Vec<&str> = self.filters.iter().map(|f| f.id.as_str()).collect();
        filter_ids.sort_unstable();
        filter_ids.dedup();
        if filter_ids.len() != self.filters.len() {
            return Err(Error::ConfigInvalid("filter ids must be unique".to_string()));
        }
        Ok(())
    }
}
