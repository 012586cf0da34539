// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Regex fallbacks used when no dictionary or override matches
//!
//! Every list is ordered and evaluated first-match-wins. The non-character
//! list must be consulted before the character list: `long_hair_ornament`
//! looks like a three-part character name but is a general tag.

use regex::Regex;

const CHARACTER_PATTERNS: &[&str] = &[
    // Name (Work)
    r"^\w+\s+\(\w+\)$",
    // three-part identifiers such as first_last_work
    r"^\w+_\w+_\w+$",
];

const NON_CHARACTER_SUFFIXES: &[&str] = &[
    "hair", "eyes", "clothes", "dress", "shirt", "mouth", "pupils", "polish",
    "art", "nails", "fingernails", "eyelashes", "makeup", "uniform",
];

const ARTIST_PATTERNS: &[&str] = &[
    r"^by\s+\w+",
    r"^artist:\w+",
];

/// Compiled pattern lists, built once per classifier
#[derive(Debug, Clone)]
pub struct PatternSet {
    character: Vec<Regex>,
    non_character: Vec<Regex>,
    artist: Vec<Regex>,
}

impl PatternSet {
    pub fn compile() -> Self {
        Self {
            character: compile_all(CHARACTER_PATTERNS.iter().map(|p| p.to_string())),
            non_character: compile_all(
                NON_CHARACTER_SUFFIXES
                    .iter()
                    .map(|suffix| format!(r"^.*_{}$", regex::escape(suffix))),
            ),
            artist: compile_all(ARTIST_PATTERNS.iter().map(|p| p.to_string())),
        }
    }

    pub fn character_patterns(&self) -> &[Regex] {
        &self.character
    }

    pub fn non_character_patterns(&self) -> &[Regex] {
        &self.non_character
    }

    pub fn artist_patterns(&self) -> &[Regex] {
        &self.artist
    }

    /// Suffix patterns such as `*_hair`; callers pass the lowercase form
    pub fn is_non_character(&self, tag_lower: &str) -> bool {
        self.non_character.iter().any(|p| p.is_match(tag_lower))
    }

    /// Character-shaped tags; callers pass the tag as supplied
    pub fn is_character(&self, tag: &str) -> bool {
        self.character.iter().any(|p| p.is_match(tag))
    }

    /// `by <name>` / `artist:<name>`; callers pass the tag as supplied
    pub fn is_artist(&self, tag: &str) -> bool {
        self.artist.iter().any(|p| p.is_match(tag))
    }
}

fn compile_all(sources: impl Iterator<Item = String>) -> Vec<Regex> {
    // The sources are literals in this file; a failure is a programming error.
    sources
        .map(|src| Regex::new(&src).unwrap_or_else(|e| panic!("invalid tag pattern {}: {}", src, e)))
        .collect()
}
