// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for bounded Levenshtein matching.
//!
//! Verifies that the early-exit distance check never disagrees with the
//! budget it was given. The typo tier leans on this function. If it lies
//! about distances, ranking hands users garbage.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use omnibar::levenshtein_within;

/// Fuzz input for bounded distance checks
#[derive(Debug, Arbitrary)]
struct DistanceInput {
    /// Left-hand string
    a: String,
    /// Right-hand string
    b: String,
    /// Edit budget (capped at 4)
    max: u8,
}

fuzz_target!(|input: DistanceInput| {
    // Cap lengths to avoid timeouts; collect keeps char boundaries intact
    let a: String = input.a.chars().take(50).collect();
    let b: String = input.b.chars().take(50).collect();
    let max = (input.max % 5) as usize;

    let result = levenshtein_within(&a, &b, max);

    if let Some(distance) = result {
        // INVARIANT 1: Reported distances never exceed the budget
        assert!(
            distance <= max,
            "distance {} exceeds budget {} for a='{}', b='{}'",
            distance,
            max,
            a,
            b
        );

        // INVARIANT 2: Length difference is a lower bound on distance
        let len_diff = a.chars().count().abs_diff(b.chars().count());
        assert!(
            len_diff <= distance,
            "length difference {} exceeds distance {} for a='{}', b='{}'",
            len_diff,
            distance,
            a,
            b
        );

        // INVARIANT 3: A bigger budget never changes a found distance
        assert_eq!(
            levenshtein_within(&a, &b, max + 1),
            Some(distance),
            "raising the budget changed the distance for a='{}', b='{}'",
            a,
            b
        );
    }

    // INVARIANT 4: The check is symmetric
    assert_eq!(
        result,
        levenshtein_within(&b, &a, max),
        "asymmetric result for a='{}', b='{}'",
        a,
        b
    );

    // INVARIANT 5: Equal strings are distance zero
    assert_eq!(
        levenshtein_within(&a, &a, max),
        Some(0),
        "self distance not zero for '{}'",
        a
    );
});
