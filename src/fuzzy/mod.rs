// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy matching: typo tolerance via edit distance, plus the registry
//! scan that turns items into ranked matches.
//!
//! `levenshtein` is the bounded edit-distance primitive; `matcher` walks
//! the registry and scores every item against the query terms.

mod levenshtein;
mod matcher;

pub use levenshtein::*;
pub use matcher::*;
