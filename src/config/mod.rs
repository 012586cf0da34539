// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Configuration management for Tagwright

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    /// Knowledge-base folder settings
    #[serde(default)]
    pub knowledge_base: KnowledgeBaseConfig,

    /// How tags are classified
    #[serde(default)]
    pub classification: ClassificationConfig,

    /// Prompt rendering
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct KnowledgeBaseConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Folder with per-category tag files; relative paths resolve against
    /// the working directory
    #[serde(default = "default_kb_path")]
    pub path: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ClassificationConfig {
    #[serde(default)]
    pub mode: ClassificationMode,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationMode {
    /// Built-in dictionary plus knowledge base
    #[default]
    LocalKnowledge,
    /// Ask an LLM backend, falling back to local classification
    LlmClassification,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputConfig {
    /// Prefix characters with `#` and artists with `@`
    #[serde(default = "default_true")]
    pub symbol_enhancement: bool,
    /// Spell out standalone numbers 0-20
    #[serde(default = "default_true")]
    pub replace_numbers: bool,
    #[serde(default = "default_prompt_prefix")]
    pub prompt_prefix: String,
    /// General tags listed when no description is available
    #[serde(default = "default_max_general_features")]
    pub max_general_features: usize,
}

// Default value functions
fn default_true() -> bool { true }
fn default_kb_path() -> String { "Tag knowledge".to_string() }
fn default_max_general_features() -> usize { 5 }

fn default_prompt_prefix() -> String {
    "You are an assistant designed to generate anime images based on textual prompts. \
     <Prompt Start> ".to_string()
}

impl Default for KnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_kb_path(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            symbol_enhancement: true,
            replace_numbers: true,
            prompt_prefix: default_prompt_prefix(),
            max_general_features: default_max_general_features(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = serde_json::from_str(&content)
                .map_err(|e| crate::TagwrightError::Config(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            tracing::info!("Config file not found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
