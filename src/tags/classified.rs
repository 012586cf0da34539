// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Classification output and tag-string splitting

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Category;

/// Split a comma-separated tag string into trimmed, non-empty tags.
///
/// Case and inner spacing are preserved; duplicates are kept.
pub fn split_tags(input: &str) -> Vec<&str> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Category -> ordered tag list.
///
/// All eight categories are always present (possibly empty). Tags keep their
/// input order and spelling within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Category, Vec<String>>", into = "BTreeMap<Category, Vec<String>>")]
pub struct ClassifiedTags {
    buckets: BTreeMap<Category, Vec<String>>,
}

impl ClassifiedTags {
    pub fn new() -> Self {
        Self {
            buckets: Category::ALL.into_iter().map(|c| (c, Vec::new())).collect(),
        }
    }

    pub fn push(&mut self, category: Category, tag: impl Into<String>) {
        self.buckets.entry(category).or_default().push(tag.into());
    }

    pub fn get(&self, category: Category) -> &[String] {
        self.buckets.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace the list for one category
    pub fn set(&mut self, category: Category, tags: Vec<String>) {
        self.buckets.insert(category, tags);
    }

    /// Total number of tags across all categories
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Categories in declaration order with their tags
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        self.buckets.iter().map(|(c, tags)| (*c, tags.as_slice()))
    }
}

impl Default for ClassifiedTags {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BTreeMap<Category, Vec<String>>> for ClassifiedTags {
    fn from(map: BTreeMap<Category, Vec<String>>) -> Self {
        let mut classified = Self::new();
        for (category, tags) in map {
            classified.set(category, tags);
        }
        classified
    }
}

impl From<ClassifiedTags> for BTreeMap<Category, Vec<String>> {
    fn from(classified: ClassifiedTags) -> Self {
        classified.buckets
    }
}
