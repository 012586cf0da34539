// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! The eight fixed tag categories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification bucket for a single tag.
///
/// Declaration order is the output order of a classified mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Subject counts and groupings (`1girl`, `solo`, ...)
    Special,
    Characters,
    Copyrights,
    Artists,
    /// Appearance, clothing, pose, scenery; the fallback bucket
    General,
    Quality,
    Meta,
    Rating,
}

/// Order in which knowledge-base categories claim tags during a merge.
/// Earlier categories win when a tag is listed under several.
pub const MERGE_PRIORITY: [Category; 8] = [
    Category::Special,
    Category::Quality,
    Category::Rating,
    Category::Meta,
    Category::Characters,
    Category::Copyrights,
    Category::Artists,
    Category::General,
];

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Special,
        Category::Characters,
        Category::Copyrights,
        Category::Artists,
        Category::General,
        Category::Quality,
        Category::Meta,
        Category::Rating,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Special => "special",
            Category::Characters => "characters",
            Category::Copyrights => "copyrights",
            Category::Artists => "artists",
            Category::General => "general",
            Category::Quality => "quality",
            Category::Meta => "meta",
            Category::Rating => "rating",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = crate::TagwrightError;

    /// Parses a category name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> crate::Result<Self> {
        let name = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == name)
            .ok_or_else(|| crate::TagwrightError::Parse(format!("Unknown category: {}", s)))
    }
}
