// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Knowledge-base folder loading

use std::path::Path;
use tracing::{debug, info, warn};

use crate::tags::Category;

use super::parse::{parse_category_file, parse_combined_file};
use super::{KnowledgeBase, KnowledgeSource};

/// Candidate file names per category; the first one present wins
pub const CATEGORY_FILES: [(Category, &[&str]); 8] = [
    (Category::Special, &["special.csv", "人数标签.csv"]),
    (Category::Characters, &["characters.csv", "角色.csv", "character.csv"]),
    (Category::Copyrights, &["copyrights.csv", "版权.csv", "copyright.csv"]),
    (Category::Artists, &["artists.csv", "画师.csv", "artist.csv"]),
    (Category::General, &["general.csv", "通用.csv"]),
    (Category::Quality, &["quality.csv", "质量.csv"]),
    (Category::Meta, &["meta.csv", "元数据.csv", "metadata.csv"]),
    (Category::Rating, &["rating.csv", "评级.csv"]),
];

/// Combined file with `tag` and `category` columns, merged on top
pub const COMBINED_FILE: &str = "knowledge_base.csv";

/// Reads a knowledge-base folder through a [`KnowledgeSource`]
pub struct KnowledgeLoader<'a> {
    source: &'a dyn KnowledgeSource,
}

impl<'a> KnowledgeLoader<'a> {
    pub fn new(source: &'a dyn KnowledgeSource) -> Self {
        Self { source }
    }

    /// Load every recognised file in `folder`.
    ///
    /// Never fails: a missing or unlistable folder gives an empty knowledge
    /// base and a bad file is skipped with a warning.
    pub fn load(&self, folder: &Path) -> KnowledgeBase {
        let mut knowledge = KnowledgeBase::new();

        if !self.source.is_dir(folder) {
            warn!("Knowledge base folder not found: {:?}", folder);
            return knowledge;
        }

        let files = match self.source.list_files(folder) {
            Ok(files) => files,
            Err(e) => {
                warn!("Cannot list knowledge base folder {:?}: {}", folder, e);
                return knowledge;
            }
        };

        for (category, candidates) in CATEGORY_FILES {
            let Some(name) = candidates.iter().find(|c| files.iter().any(|f| f == *c)) else {
                continue;
            };
            let path = folder.join(name);
            match self
                .source
                .read_to_string(&path)
                .and_then(|content| parse_category_file(&content))
            {
                Ok(tags) => {
                    debug!("Loaded {} {} tags from {}", tags.len(), category, name);
                    knowledge.extend(category, tags);
                    knowledge.record_source(name);
                }
                Err(e) => warn!("Skipping knowledge base file {:?}: {}", path, e),
            }
        }

        if files.iter().any(|f| f == COMBINED_FILE) {
            let path = folder.join(COMBINED_FILE);
            match self
                .source
                .read_to_string(&path)
                .and_then(|content| parse_combined_file(&content))
            {
                Ok(combined) => {
                    for category in Category::ALL {
                        knowledge.extend(category, combined.tags(category).cloned());
                    }
                    knowledge.record_source(COMBINED_FILE);
                }
                Err(e) => warn!("Skipping knowledge base file {:?}: {}", path, e),
            }
        }

        info!(
            "Loaded {} knowledge base files ({} tags) from {:?}: {}",
            knowledge.sources().len(),
            knowledge.total(),
            folder,
            knowledge.sources().join(", ")
        );

        knowledge
    }
}
