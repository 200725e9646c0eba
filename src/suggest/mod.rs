// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Suggestion aggregation: many sources, one deduplicated list.
//!
//! `intent` is the keyword classifier behind the "ai" rows, `merger`
//! enforces the keep-first dedup and the overall cap, and `aggregator`
//! is the [`SuggestionEngine`] that composes a full pass from registry
//! matches, history, and config-driven entries.

mod aggregator;
pub mod intent;
mod merger;

pub use aggregator::{QueryContext, SuggestionEngine};
pub use merger::SuggestionMerger;
