// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! User-declared override sets

use std::collections::HashSet;

use super::{split_tags, Category};

/// Tags the user forces into `characters`, `artists` or `copyrights`.
///
/// Membership is an exact, case-sensitive match on the trimmed tag. Entries
/// are trimmed when parsed and are otherwise not normalised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomTags {
    pub characters: HashSet<String>,
    pub artists: HashSet<String>,
    pub copyrights: HashSet<String>,
}

impl CustomTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from three comma-separated lists
    pub fn parse(characters: &str, artists: &str, copyrights: &str) -> Self {
        Self {
            characters: parse_set(characters),
            artists: parse_set(artists),
            copyrights: parse_set(copyrights),
        }
    }

    pub fn with_characters<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.characters.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_artists<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.artists.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_copyrights<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.copyrights.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Override category for `tag`, checking characters, artists, copyrights in that order
    pub fn category_of(&self, tag: &str) -> Option<Category> {
        if self.characters.contains(tag) {
            Some(Category::Characters)
        } else if self.artists.contains(tag) {
            Some(Category::Artists)
        } else if self.copyrights.contains(tag) {
            Some(Category::Copyrights)
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty() && self.artists.is_empty() && self.copyrights.is_empty()
    }
}

fn parse_set(list: &str) -> HashSet<String> {
    split_tags(list).into_iter().map(str::to_string).collect()
}
