// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Spelling out small standalone numbers

use regex::{Captures, Regex};
use std::sync::OnceLock;

const NUMBER_WORDS: [&str; 21] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty",
];

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // two-digit alternatives first so "15" is not read as "1" + "5"
    PATTERN.get_or_init(|| Regex::new(r"\b(20|1[0-9]|[0-9])\b").expect("number pattern is valid"))
}

/// Replace whole-word integers 0-20 with English words.
///
/// Digits that are part of a word (`1girl`, `v2`) are left alone.
pub fn replace_numbers(text: &str) -> String {
    number_pattern()
        .replace_all(text, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|n| NUMBER_WORDS.get(n))
                .map_or_else(|| caps[0].to_string(), |word| word.to_string())
        })
        .into_owned()
}
