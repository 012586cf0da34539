// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Merging an external knowledge base into the built-in dictionary

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::knowledge::KnowledgeBase;
use crate::tags::{Category, TagDatabase, MERGE_PRIORITY};

/// Built-in dictionary united with a knowledge base.
///
/// Knowledge-base categories are applied in [`MERGE_PRIORITY`] order and each
/// one only contributes tags no earlier knowledge-base category has claimed.
/// The deduplication runs among knowledge-base categories only: a built-in
/// tag keeps its built-in category even when the knowledge base files it
/// elsewhere, so such a tag ends up in two merged sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedDatabase {
    sets: HashMap<Category, HashSet<String>>,
}

impl MergedDatabase {
    pub fn merge(builtin: &TagDatabase, knowledge: &KnowledgeBase) -> Self {
        let mut sets: HashMap<Category, HashSet<String>> = Category::ALL
            .into_iter()
            .map(|c| (c, builtin.tags(c).clone()))
            .collect();

        let mut claimed: HashSet<&str> = HashSet::new();
        let mut suppressed = 0usize;

        // MERGE_PRIORITY lists all eight categories, so nothing is left over
        // for a second pass.
        for category in MERGE_PRIORITY {
            let external = knowledge.tags(category);
            let target = sets.entry(category).or_default();
            for tag in external {
                if claimed.insert(tag.as_str()) {
                    target.insert(tag.clone());
                } else {
                    suppressed += 1;
                }
            }
        }

        debug!(
            "Merged knowledge base: {} external tags claimed, {} duplicates suppressed",
            claimed.len(),
            suppressed
        );

        Self { sets }
    }

    /// Merged database with no external knowledge
    pub fn builtin_only(builtin: &TagDatabase) -> Self {
        Self::merge(builtin, &KnowledgeBase::new())
    }

    pub fn contains(&self, category: Category, tag_lower: &str) -> bool {
        self.sets
            .get(&category)
            .is_some_and(|set| set.contains(tag_lower))
    }

    pub fn tags(&self, category: Category) -> Option<&HashSet<String>> {
        self.sets.get(&category)
    }
}
