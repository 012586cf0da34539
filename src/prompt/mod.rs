// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Prompt generation from classified tags

pub mod format;
pub mod llm;
pub mod numbers;
pub mod processor;
pub mod render;

pub use format::{enhance_symbols, format_text};
pub use llm::{parse_classification_response, Enhancement, LlmBackend};
pub use numbers::replace_numbers;
pub use processor::{ProcessedPrompt, PromptProcessor, PromptRequest};
pub use render::{render_content, NameLists};
