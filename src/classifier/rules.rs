// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Per-tag decision procedures
//!
//! There are two procedures with deliberately different precedence: one for
//! the built-in dictionary alone and one for a merged knowledge base. Callers
//! pick one by whether a knowledge base is in play. Both are total and fall
//! back to `general`.

use crate::tags::{Category, CustomTags, PatternSet, TagDatabase};

use super::merge::MergedDatabase;

/// Classify against the built-in dictionary, overrides and patterns.
///
/// Order: dictionary, overrides, copyright keywords, non-character suffixes,
/// character shapes, artist prefixes, `general`.
pub fn classify_builtin(
    tag: &str,
    database: &TagDatabase,
    patterns: &PatternSet,
    custom: &CustomTags,
) -> Category {
    let tag_lower = tag.trim().to_lowercase();

    if let Some(category) = database.lookup(&tag_lower) {
        return category;
    }
    if let Some(category) = custom.category_of(tag) {
        return category;
    }
    if database.is_copyright_keyword(&tag_lower) {
        return Category::Copyrights;
    }
    if patterns.is_non_character(&tag_lower) {
        return Category::General;
    }
    if patterns.is_character(tag) {
        return Category::Characters;
    }
    if patterns.is_artist(tag) {
        return Category::Artists;
    }
    Category::General
}

/// Classify against a merged knowledge base.
///
/// `special` outranks the overrides; `quality`/`rating` outrank the
/// non-character suffixes, which in turn outrank the `general`,
/// `characters` and `copyrights` sets.
pub fn classify_merged(
    tag: &str,
    merged: &MergedDatabase,
    database: &TagDatabase,
    patterns: &PatternSet,
    custom: &CustomTags,
) -> Category {
    let tag_lower = tag.trim().to_lowercase();

    if merged.contains(Category::Special, &tag_lower) {
        return Category::Special;
    }
    if let Some(category) = custom.category_of(tag) {
        return category;
    }
    for category in [Category::Quality, Category::Rating] {
        if merged.contains(category, &tag_lower) {
            return category;
        }
    }
    if patterns.is_non_character(&tag_lower) {
        return Category::General;
    }
    for category in [Category::General, Category::Characters, Category::Copyrights] {
        if merged.contains(category, &tag_lower) {
            return category;
        }
    }
    if database.is_copyright_keyword(&tag_lower) {
        return Category::Copyrights;
    }
    for category in [Category::Artists, Category::Meta] {
        if merged.contains(category, &tag_lower) {
            return category;
        }
    }
    if patterns.is_character(tag) {
        return Category::Characters;
    }
    if patterns.is_artist(tag) {
        return Category::Artists;
    }
    Category::General
}
