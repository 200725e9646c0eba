// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how matches get their numbers and their order.
//!
//! The key insight is that match field (title vs. tag vs. category vs.
//! description) dominates everything else. A typo-tier title hit beats an
//! exact tag hit. Scores are real, but they only settle ties inside a
//! field bucket.

mod core;
pub mod ranking;

pub use self::core::*;
pub use ranking::compare_matches;
