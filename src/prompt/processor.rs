// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! End-to-end prompt pipeline

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::classifier::Classifier;
use crate::config::{AppConfig, ClassificationMode};
use crate::knowledge::KnowledgeBase;
use crate::tags::{split_tags, Category, ClassifiedTags, CustomTags};

use super::format::{artist_symbol, character_symbol, enhance_symbols, format_text};
use super::llm::{classification_request, parse_classification_response, Enhancement, LlmBackend, CLASSIFICATION_PROMPT};
use super::numbers::replace_numbers;
use super::render::{render_content, NameLists};

/// Input to [`PromptProcessor::process`]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PromptRequest {
    /// Comma-separated Danbooru tags
    #[serde(default)]
    pub tags: String,
    /// Free-text drawing theme for LLM enhancement
    #[serde(default)]
    pub theme: String,
    /// Ready-made description; skips LLM enhancement when non-empty
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub custom_characters: String,
    #[serde(default)]
    pub custom_artists: String,
    #[serde(default)]
    pub custom_copyrights: String,
}

/// Output of one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedPrompt {
    /// Prompt prefix followed by the rendered content
    pub final_prompt: String,
    /// Rendered content without the prefix
    pub formatted_prompt: String,
    /// Formatted LLM description, empty when none was produced
    pub enhanced_description: String,
    /// Classification after symbol enhancement
    pub classified: ClassifiedTags,
    pub processing_log: Vec<String>,
}

/// Runs number replacement, classification, enhancement and rendering
pub struct PromptProcessor {
    classifier: Classifier,
    config: AppConfig,
    backend: Option<Box<dyn LlmBackend>>,
}

impl PromptProcessor {
    pub fn new(config: AppConfig) -> Self {
        Self::with_classifier(Classifier::new(), config)
    }

    pub fn with_classifier(classifier: Classifier, config: AppConfig) -> Self {
        Self {
            classifier,
            config,
            backend: None,
        }
    }

    /// Attach an LLM backend for classification and enhancement
    pub fn with_backend(mut self, backend: impl LlmBackend + 'static) -> Self {
        self.backend = Some(Box::new(backend));
        self
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn process(&self, request: &PromptRequest) -> ProcessedPrompt {
        let mut log = PipelineLog::default();
        log.push(format!("Input tags: {}", preview(&request.tags)));
        log.push(format!("Drawing theme: {}", preview(&request.theme)));

        let tags = if self.config.output.replace_numbers {
            let replaced = replace_numbers(&request.tags);
            if replaced != request.tags {
                log.push("Replaced standalone numbers");
            }
            replaced
        } else {
            request.tags.clone()
        };

        let custom = CustomTags::parse(
            &request.custom_characters,
            &request.custom_artists,
            &request.custom_copyrights,
        );
        let mut names = NameLists {
            characters: parse_list(&request.custom_characters),
            artists: parse_list(&request.custom_artists),
            copyrights: parse_list(&request.custom_copyrights),
        };
        log.push(format!(
            "Custom tags: {} characters, {} artists, {} copyrights",
            names.characters.len(),
            names.artists.len(),
            names.copyrights.len()
        ));

        let classified = if tags.trim().is_empty() {
            log.push("No tags given, skipping classification");
            ClassifiedTags::new()
        } else {
            self.classify(&tags, &custom, &mut log)
        };

        // names already classified from the input are rendered once
        names.characters.retain(|n| !classified.get(Category::Characters).contains(n));
        names.artists.retain(|n| !classified.get(Category::Artists).contains(n));
        names.copyrights.retain(|n| !classified.get(Category::Copyrights).contains(n));

        let description = if request.description.trim().is_empty() {
            self.enhance(&tags, &request.theme, &mut log)
        } else {
            log.push("Using supplied description");
            request.description.trim().to_string()
        };

        let classified = if self.config.output.symbol_enhancement {
            names.characters = names.characters.iter().map(|n| character_symbol(n)).collect();
            names.artists = names.artists.iter().map(|n| artist_symbol(n)).collect();
            log.push("Applied symbol enhancement (#characters, @artists)");
            enhance_symbols(&classified)
        } else {
            log.push("Symbol enhancement disabled");
            classified
        };

        let description = format_text(&description);
        let content = render_content(
            &classified,
            &description,
            &names,
            self.config.output.max_general_features,
        );
        log.push("Rendered final prompt");

        ProcessedPrompt {
            final_prompt: format!("{}{}", self.config.output.prompt_prefix, content),
            formatted_prompt: content,
            enhanced_description: description,
            classified,
            processing_log: log.entries,
        }
    }

    fn classify(&self, tags: &str, custom: &CustomTags, log: &mut PipelineLog) -> ClassifiedTags {
        if self.config.classification.mode == ClassificationMode::LlmClassification {
            if let Some(backend) = &self.backend {
                let classified = self.classify_with_llm(backend.as_ref(), tags);
                log.push(format!("LLM classification: {} tags", classified.total()));
                return classified;
            }
            debug!("LLM classification requested without a backend, using local knowledge");
        }

        let knowledge = if self.config.knowledge_base.enabled {
            self.classifier.load_knowledge_base(&self.config.knowledge_base.path)
        } else {
            Arc::new(KnowledgeBase::new())
        };
        if knowledge.is_empty() {
            log.push("Knowledge base empty, classifying with the built-in dictionary");
        } else {
            log.push(format!(
                "Loaded knowledge base: {} tags from {} files",
                knowledge.total(),
                knowledge.sources().len()
            ));
        }

        let classified = self.classifier.classify_tags_with_knowledge(tags, &knowledge, custom);
        log.push(format!("Local classification: {} tags", classified.total()));
        classified
    }

    /// Ask the backend; any failure falls back to built-in classification
    /// without custom overrides
    fn classify_with_llm(&self, backend: &dyn LlmBackend, tags: &str) -> ClassifiedTags {
        match backend.complete(CLASSIFICATION_PROMPT, &classification_request(tags)) {
            Ok(reply) => {
                if let Some(classified) = parse_classification_response(&reply) {
                    info!(
                        "{} classified {} of {} tags",
                        backend.name(),
                        classified.total(),
                        split_tags(tags).len()
                    );
                    return classified;
                }
                warn!("Unusable classification reply from {}, falling back to local classification", backend.name());
            }
            Err(e) => {
                warn!("LLM classification failed, falling back to local classification: {}", e);
            }
        }
        self.classifier.classify_tags(tags, &CustomTags::new())
    }

    fn enhance(&self, tags: &str, theme: &str, log: &mut PipelineLog) -> String {
        let Some(backend) = &self.backend else {
            log.push("No LLM backend, skipping enhancement");
            return String::new();
        };
        let Some(strategy) = Enhancement::select(tags, theme) else {
            log.push("Nothing to enhance");
            return String::new();
        };

        match backend.complete(strategy.system_prompt(), &strategy.user_prompt()) {
            Ok(description) if !description.trim().is_empty() => {
                log.push(format!("LLM enhancement done ({})", backend.name()));
                description.trim().to_string()
            }
            Ok(_) => {
                log.push("LLM enhancement returned nothing");
                String::new()
            }
            Err(e) => {
                warn!("LLM enhancement failed: {}", e);
                log.push(format!("LLM enhancement failed: {}", e));
                String::new()
            }
        }
    }
}

/// Human-readable step log, mirrored to tracing
#[derive(Default)]
struct PipelineLog {
    entries: Vec<String>,
}

impl PipelineLog {
    fn push(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        debug!("{}", entry);
        self.entries.push(entry);
    }
}

const PREVIEW_CHARS: usize = 100;

fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let head: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Ordered, trimmed, non-empty entries of a comma-separated list
fn parse_list(list: &str) -> Vec<String> {
    split_tags(list).into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TagwrightError;
    use std::sync::Mutex;
    use tempfile::TempDir;

    const PREFIX: &str =
        "You are an assistant designed to generate anime images based on textual prompts. <Prompt Start> ";

    /// Backend answering classification and enhancement prompts from canned text
    struct ScriptedBackend {
        classification: crate::Result<String>,
        description: String,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl LlmBackend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        fn complete(&self, system: &str, user: &str) -> crate::Result<String> {
            self.calls.lock().unwrap().push(user.to_string());
            if system == CLASSIFICATION_PROMPT {
                match &self.classification {
                    Ok(reply) => Ok(reply.clone()),
                    Err(_) => Err(TagwrightError::Llm("connection refused".to_string())),
                }
            } else {
                Ok(self.description.clone())
            }
        }
    }

    /// Backend whose every call fails
    struct UnreachableBackend;

    impl LlmBackend for UnreachableBackend {
        fn name(&self) -> &str {
            "unreachable"
        }

        fn complete(&self, _system: &str, _user: &str) -> crate::Result<String> {
            Err(TagwrightError::Llm("connection refused".to_string()))
        }
    }

    fn logged(out: &ProcessedPrompt, entry: &str) -> bool {
        out.processing_log.iter().any(|e| e.starts_with(entry))
    }

    fn offline_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.knowledge_base.enabled = false;
        config
    }

    fn request(tags: &str) -> PromptRequest {
        PromptRequest {
            tags: tags.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_local_pipeline() {
        let processor = PromptProcessor::new(offline_config());
        let out = processor.process(&request("1girl, smile, masterpiece"));

        assert_eq!(out.formatted_prompt, "depicting 1girl. with smile. masterpiece");
        assert_eq!(out.final_prompt, format!("{}{}", PREFIX, out.formatted_prompt));
        assert!(out.enhanced_description.is_empty());
        assert_eq!(out.classified.total(), 3);
        assert!(logged(&out, "Knowledge base empty, classifying with the built-in dictionary"));
        assert!(logged(&out, "Local classification: 3 tags"));
        assert!(logged(&out, "No LLM backend, skipping enhancement"));
    }

    #[test]
    fn test_empty_tags() {
        let processor = PromptProcessor::new(offline_config());
        let out = processor.process(&request("  "));
        assert_eq!(out.formatted_prompt, "An anime-style illustration.");
        assert!(out.classified.is_empty());
        assert!(logged(&out, "No tags given, skipping classification"));
    }

    #[test]
    fn test_custom_names_with_symbols() {
        let processor = PromptProcessor::new(offline_config());
        let out = processor.process(&PromptRequest {
            tags: "1girl, Saber, by wlop".to_string(),
            custom_characters: "Saber".to_string(),
            custom_artists: "ask".to_string(),
            ..Default::default()
        });

        assert_eq!(out.classified.get(Category::Characters), ["#Saber"]);
        assert_eq!(out.classified.get(Category::Artists), ["@wlop"]);
        assert_eq!(
            out.formatted_prompt,
            "The illustration should be in the distinct style of @wlop and @ask. depicting 1girl named #Saber."
        );
    }

    #[test]
    fn test_symbol_enhancement_disabled() {
        let mut config = offline_config();
        config.output.symbol_enhancement = false;
        let out = PromptProcessor::new(config).process(&request("1girl, by wlop"));
        assert_eq!(
            out.formatted_prompt,
            "The illustration should be in the distinct style of wlop. depicting 1girl."
        );
    }

    #[test]
    fn test_number_replacement_toggle() {
        let out = PromptProcessor::new(offline_config()).process(&request("2 cats"));
        assert_eq!(out.classified.get(Category::General), ["two cats"]);

        let mut config = offline_config();
        config.output.replace_numbers = false;
        let out = PromptProcessor::new(config).process(&request("2 cats"));
        assert_eq!(out.classified.get(Category::General), ["2 cats"]);
    }

    #[test]
    fn test_configured_knowledge_base_is_used() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("characters.csv"), "tag\nhatsune_miku\n").unwrap();
        let mut config = AppConfig::default();
        config.knowledge_base.path = dir.path().to_string_lossy().into_owned();

        let out = PromptProcessor::new(config).process(&request("hatsune_miku"));
        assert_eq!(out.classified.get(Category::Characters), ["#hatsune_miku"]);
        assert_eq!(out.formatted_prompt, "depicting #hatsune_miku.");
        assert!(logged(&out, "Loaded knowledge base: 1 tags from 1 files"));
    }

    #[test]
    fn test_llm_classification_and_enhancement() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let backend = ScriptedBackend {
            classification: Ok(
                r#"{"special": ["1girl"], "characters": ["hatsune miku"], "copyrights": ["vocaloid"]}"#
                    .to_string(),
            ),
            description: "A girl smiles (softly)".to_string(),
            calls: Arc::clone(&calls),
        };
        let mut config = offline_config();
        config.classification.mode = ClassificationMode::LlmClassification;

        let out = PromptProcessor::new(config)
            .with_backend(backend)
            .process(&request("1girl, hatsune miku, vocaloid"));

        assert_eq!(out.enhanced_description, r"A girl smiles \(softly\)");
        assert_eq!(
            out.formatted_prompt,
            r"depicting 1girl named #hatsune_miku from vocaloid. A girl smiles \(softly\)."
        );
        assert!(logged(&out, "LLM classification: 3 tags"));
        assert!(logged(&out, "LLM enhancement done (scripted)"));
        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].ends_with("1girl, hatsune miku, vocaloid"));
    }

    #[test]
    fn test_llm_failure_falls_back_to_local() {
        let backend = ScriptedBackend {
            classification: Err(TagwrightError::Llm("down".to_string())),
            description: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        };
        let mut config = offline_config();
        config.classification.mode = ClassificationMode::LlmClassification;

        let out = PromptProcessor::new(config)
            .with_backend(backend)
            .process(&PromptRequest {
                tags: "1girl, Saber".to_string(),
                custom_characters: "Saber".to_string(),
                ..Default::default()
            });

        // fallback ignores custom overrides
        assert_eq!(out.classified.get(Category::General), ["Saber"]);
        assert!(out.enhanced_description.is_empty());
        assert_eq!(
            out.formatted_prompt,
            "depicting 1girl named #Saber. with Saber."
        );
    }

    #[test]
    fn test_unparseable_reply_falls_back_to_local() {
        let backend = ScriptedBackend {
            classification: Ok("I cannot help with that.".to_string()),
            description: "A quiet street".to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
        };
        let mut config = offline_config();
        config.classification.mode = ClassificationMode::LlmClassification;

        let out = PromptProcessor::new(config)
            .with_backend(backend)
            .process(&request("1girl, masterpiece"));
        assert_eq!(out.classified.get(Category::Quality), ["masterpiece"]);
        assert_eq!(out.formatted_prompt, "depicting 1girl. A quiet street. masterpiece");
    }

    #[test]
    fn test_theme_only_enhancement() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let backend = ScriptedBackend {
            classification: Ok(String::new()),
            description: "Cherry blossoms at dusk".to_string(),
            calls: Arc::clone(&calls),
        };
        let out = PromptProcessor::new(offline_config())
            .with_backend(backend)
            .process(&PromptRequest {
                theme: "spring evening".to_string(),
                ..Default::default()
            });

        assert_eq!(out.formatted_prompt, "Cherry blossoms at dusk.");
        assert_eq!(calls.lock().unwrap().as_slice(), ["spring evening"]);
    }

    #[test]
    fn test_supplied_description_skips_backend() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let backend = ScriptedBackend {
            classification: Ok(String::new()),
            description: "unused".to_string(),
            calls: Arc::clone(&calls),
        };
        let out = PromptProcessor::new(offline_config())
            .with_backend(backend)
            .process(&PromptRequest {
                tags: "solo".to_string(),
                description: "She waves at the_camera".to_string(),
                ..Default::default()
            });

        assert_eq!(out.enhanced_description, "She waves at the camera");
        assert_eq!(out.formatted_prompt, "depicting solo. She waves at the camera.");
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_enhancement_failure_is_logged() {
        let mut config = offline_config();
        config.classification.mode = ClassificationMode::LlmClassification;

        let out = PromptProcessor::new(config)
            .with_backend(UnreachableBackend)
            .process(&request("1girl, smile"));

        assert_eq!(out.classified.get(Category::Special), ["1girl"]);
        assert!(out.enhanced_description.is_empty());
        assert_eq!(out.formatted_prompt, "depicting 1girl. with smile.");
        assert!(logged(&out, "LLM classification: 2 tags"));
        assert!(logged(
            &out,
            "LLM enhancement failed: LLM backend error: connection refused"
        ));
    }

    #[test]
    fn test_padded_replies_are_trimmed() {
        let backend = ScriptedBackend {
            classification: Ok(String::new()),
            description: "\n  A quiet street at dusk.\n".to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
        };
        let out = PromptProcessor::new(offline_config())
            .with_backend(backend)
            .process(&request("solo"));
        assert_eq!(out.enhanced_description, "A quiet street at dusk.");
        assert_eq!(out.formatted_prompt, "depicting solo. A quiet street at dusk.");

        let out = PromptProcessor::new(offline_config()).process(&PromptRequest {
            tags: "solo".to_string(),
            description: "  Waving.\n".to_string(),
            ..Default::default()
        });
        assert_eq!(out.formatted_prompt, "depicting solo. Waving.");
    }

    #[test]
    fn test_preview_truncates_long_input() {
        let long = "a".repeat(150);
        assert_eq!(preview(&long).len(), 103);
        assert_eq!(preview("short"), "short");
    }
}
