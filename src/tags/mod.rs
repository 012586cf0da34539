// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Tag vocabulary: categories, the built-in dictionary, patterns and results

pub mod category;
pub mod classified;
pub mod custom;
pub mod database;
pub mod patterns;

pub use category::{Category, MERGE_PRIORITY};
pub use classified::{split_tags, ClassifiedTags};
pub use custom::CustomTags;
pub use database::{TagDatabase, COPYRIGHT_KEYWORDS};
pub use patterns::PatternSet;
