//! Fuzzy search and suggestion aggregation for dashboard command palettes.
//!
//! This crate powers the omnibar of a marketing dashboard: a registry of
//! searchable entities, a typo-tolerant fuzzy matcher over them, and an
//! aggregation pass that merges matches with history, intent shortcuts,
//! and config-driven entries into one capped suggestion list. A tokio
//! controller debounces keystrokes on top.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ registry.rs  │────▶│   fuzzy/     │────▶│   suggest/   │
//! │ (items, ranks│     │ (Levenshtein,│     │ (intent, de- │
//! │  and upserts)│     │  field scan) │     │  dup, engine)│
//! └──────────────┘     └──────────────┘     └──────┬───────┘
//!                                                  │
//!        ┌──────────────┐     ┌──────────────┐     │
//!        │  history.rs  │────▶│controller.rs │◀────┘
//!        │ (recent +    │     │ (debounce,   │
//!        │  popular)    │     │  snapshots)  │
//!        └──────────────┘     └──────────────┘
//! ```
//!
//! # Pipeline
//!
//! | Module       | Role                                                |
//! |--------------|-----------------------------------------------------|
//! | `types`      | Items, matches, suggestions, the wire format        |
//! | `registry`   | Insertion-ordered item store with upsert semantics  |
//! | `scoring`    | Field weights, quality tiers, the match comparator  |
//! | `fuzzy`      | Bounded edit distance and the per-item field scan   |
//! | `suggest`    | Intent rules, keep-first dedup, the engine          |
//! | `history`    | Recent-query persistence and seeded popular queries |
//! | `controller` | Debounced async frontend over the engine            |
//!
//! # Usage
//!
//! ```ignore
//! use omnibar::{EngineConfig, QueryContext, SuggestionEngine};
//!
//! let engine = SuggestionEngine::in_memory(EngineConfig::default())
//!     .with_items(items);
//!
//! let suggestions = engine.suggest("high value", &QueryContext::default())?;
//! ```

// Module declarations
pub mod config;
pub mod controller;
pub mod error;
pub mod fuzzy;
pub mod history;
pub mod registry;
pub mod scoring;
pub mod suggest;
pub mod testing;
pub mod types;
mod utils;

// Re-exports for public API
pub use config::{EngineConfig, FilterDef, ShortcutDef};
pub use controller::{
    ControllerOptions, Navigator, NoopNavigator, QueryController, QueryPhase, SearchSnapshot,
    SuggestionSource,
};
pub use error::{Error, Result};
pub use fuzzy::{levenshtein_within, search_items, MatchOptions};
pub use history::{JsonQueryStore, MemoryQueryStore, PopularQueries, QueryStore, RecentQueries};
pub use registry::ItemRegistry;
pub use scoring::{compare_matches, field_weight, fuzzy_quality, term_score};
pub use suggest::intent::intent_suggestions;
pub use suggest::{QueryContext, SuggestionEngine, SuggestionMerger};
pub use types::{
    ItemKind, ItemPatch, MatchField, Rank, ScoredMatch, SearchableItem, Suggestion,
    SuggestionAction, SuggestionKind,
};
pub use utils::normalize;
