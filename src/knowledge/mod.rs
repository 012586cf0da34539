// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! File-backed knowledge bases
//!
//! A knowledge base is a folder of per-category tag lists plus an optional
//! combined `knowledge_base.csv`. Loading is forgiving: unreadable or
//! malformed files are logged and skipped, a missing folder yields an empty
//! knowledge base.

pub mod loader;
pub mod parse;
pub mod source;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::tags::Category;

pub use loader::{KnowledgeLoader, CATEGORY_FILES, COMBINED_FILE};
pub use source::{FsSource, KnowledgeSource};

/// Category -> set of lowercase tags, as read from a knowledge-base folder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    categories: BTreeMap<Category, HashSet<String>>,
    /// File names that contributed, in load order
    #[serde(default)]
    sources: Vec<String>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: Category, tag: impl Into<String>) -> bool {
        self.categories.entry(category).or_default().insert(tag.into())
    }

    pub fn extend<I>(&mut self, category: Category, tags: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.categories.entry(category).or_default().extend(tags);
    }

    /// Tags listed for a category (empty when the category was never loaded)
    pub fn tags(&self, category: Category) -> impl Iterator<Item = &String> {
        self.categories.get(&category).into_iter().flatten()
    }

    pub fn count(&self, category: Category) -> usize {
        self.categories.get(&category).map_or(0, HashSet::len)
    }

    pub fn contains(&self, category: Category, tag: &str) -> bool {
        self.categories
            .get(&category)
            .is_some_and(|set| set.contains(tag))
    }

    /// Total tags across categories (a tag listed twice counts twice)
    pub fn total(&self) -> usize {
        self.categories.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub(crate) fn record_source(&mut self, file_name: &str) {
        self.sources.push(file_name.to_string());
    }
}
