// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Tagwright: Danbooru tag classification and prompt formatting
//!
//! Splits free-form tag strings, sorts every tag into one of eight fixed
//! categories using a layered rule system (built-in dictionary, user
//! overrides, optional file-backed knowledge base, regex fallbacks) and
//! renders the result as a natural-language prompt for an image generator.

pub mod classifier;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod prompt;
pub mod tags;

pub use classifier::Classifier;
pub use config::AppConfig;
pub use error::{Result, TagwrightError};
pub use knowledge::KnowledgeBase;
pub use tags::{Category, ClassifiedTags, CustomTags};
