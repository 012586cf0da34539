// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Error types for Tagwright

use thiserror::Error;

/// Result type alias for Tagwright operations
pub type Result<T> = std::result::Result<T, TagwrightError>;

/// Tagwright error types
///
/// Classification itself never fails; these surface from configuration,
/// knowledge-base files and external LLM backends. The knowledge-base loader
/// downgrades all of them to warnings.
#[derive(Error, Debug)]
pub enum TagwrightError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("LLM backend error: {0}")]
    Llm(String),
}
