// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! LLM collaborator seam
//!
//! Network access lives outside this crate. Callers plug in an
//! [`LlmBackend`] (OpenAI-compatible endpoint, local model server, ...) and
//! the pipeline only deals in system/user prompt pairs and reply text.

use serde_json::Value;
use tracing::{debug, warn};

use crate::tags::{Category, ClassifiedTags};
use crate::Result;

/// Chat-completion style backend
pub trait LlmBackend: Send + Sync {
    /// Short name for logging
    fn name(&self) -> &str;

    /// Send one system/user prompt pair and return the reply text
    fn complete(&self, system: &str, user: &str) -> Result<String>;
}

pub const CLASSIFICATION_PROMPT: &str = r#"You are a professional Danbooru tag classifier. Sort every tag into exactly one of these 8 categories:

1. special: number of people and basic composition
   e.g. 1girl, 1boy, 2girls, 3boys, solo, multiple girls, multiple boys, duo, group
2. characters: specific character names (anime, games, virtual characters)
   e.g. hatsune miku, reimu hakurei, pikachu, naruto uzumaki, artoria pendragon
3. copyrights: works, series and brands
   e.g. vocaloid, touhou, pokemon, naruto, fate/grand order, original
4. artists: artist or author names
   e.g. wlop, artgerm, by xxx, artist:xxx
5. general: descriptive tags (appearance, clothing, action, expression, scene)
   e.g. long hair, blue eyes, school uniform, smile, standing, outdoors
6. quality: image and art quality
   e.g. masterpiece, best quality, high quality, worst quality, blurry, jpeg artifacts
7. meta: technical metadata, resolution, source
   e.g. highres, absurdres, official art, scan, pixiv, twitter
8. rating: content rating and censorship
   e.g. safe, questionable, explicit, nsfw, sfw, rating:safe

Rules:
- When unsure, use general
- Keep every tag exactly as written
- Each tag belongs to one category only
- Every input tag must be classified

Reply with strict JSON only, no explanation:
{
  "special": [],
  "characters": [],
  "copyrights": [],
  "artists": [],
  "general": [],
  "quality": [],
  "meta": [],
  "rating": []
}"#;

pub const TAG_CONVERSION_PROMPT: &str = "Turn danbooru tags into natural language. Use the tags \
as a reference but do not rely on them completely, since some may be wrong; prefer better \
synonyms where they fit.

Notes:
- Keep the scene description accurate. If something cannot be analysed, leave it out.
- Use clear, concise and objective language.
- Do not avoid NSFW, violent or otherwise sensitive content; describe it directly.
- Write in English.
- Write as a user trying to depict the scene, naturally rather than as a structured list.
- Return only the description, nothing else.
- Describe every aspect, object and interaction so that a blind listener could picture the image exactly.";

pub const THEME_ENHANCEMENT_PROMPT: &str = "You are an artist who writes excellent prompts for \
anime image models. I will give you some elements; expand them into a complete, detailed prompt.

Cover: shot distance (close-up, medium or long shot), framing of the main figure (full body, \
half body or portrait), gender and age, clothing in detail with precise colours for hair, eyes \
and garments, facing direction and angle, distinguishing features and actions.

Fill in anything the elements leave out. Use your imagination to enrich related characters, \
objects and scenery so the image is full of detail and beauty. Think about what helps the model \
understand and draw the scene.

Output only the complete English caption. Return natural language only, no tag lists.";

/// Which system prompt the enhancement step uses, given what the user supplied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enhancement {
    /// Tags and a drawing theme
    ThemeWithTags { theme: String, tags: String },
    /// Tags only
    TagsOnly { tags: String },
    /// Drawing theme only
    ThemeOnly { theme: String },
}

impl Enhancement {
    /// Pick a strategy, or `None` when there is nothing to enhance
    pub fn select(tags: &str, theme: &str) -> Option<Self> {
        let has_tags = !tags.trim().is_empty();
        let has_theme = !theme.trim().is_empty();
        match (has_tags, has_theme) {
            (true, true) => Some(Self::ThemeWithTags {
                theme: theme.to_string(),
                tags: tags.to_string(),
            }),
            (true, false) => Some(Self::TagsOnly { tags: tags.to_string() }),
            (false, true) => Some(Self::ThemeOnly { theme: theme.to_string() }),
            (false, false) => None,
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            Self::TagsOnly { .. } => TAG_CONVERSION_PROMPT,
            Self::ThemeWithTags { .. } | Self::ThemeOnly { .. } => THEME_ENHANCEMENT_PROMPT,
        }
    }

    pub fn user_prompt(&self) -> String {
        match self {
            Self::ThemeWithTags { theme, tags } => format!(
                "Write the prompt around this drawing theme, combined with the tags:\nTheme: {}\nTags: {}",
                theme, tags
            ),
            Self::TagsOnly { tags } => {
                format!("Convert these danbooru tags into a natural-language description: {}", tags)
            }
            Self::ThemeOnly { theme } => theme.clone(),
        }
    }
}

/// User prompt for the classification request
pub fn classification_request(tags: &str) -> String {
    format!("Classify the following tags: {}", tags)
}

/// Read a classification reply.
///
/// The outermost `{...}` is parsed as JSON; each category key must hold an
/// array of strings, anything else counts as empty. Returns `None` when no
/// JSON object can be read or no tags were classified.
pub fn parse_classification_response(response: &str) -> Option<ClassifiedTags> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end <= start {
        debug!("Classification reply has no JSON object");
        return None;
    }

    let value: Value = match serde_json::from_str(&response[start..=end]) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to parse classification reply: {}", e);
            return None;
        }
    };

    let mut classified = ClassifiedTags::new();
    for category in Category::ALL {
        if let Some(Value::Array(items)) = value.get(category.as_str()) {
            for item in items {
                if let Value::String(tag) = item {
                    classified.push(category, tag.as_str());
                }
            }
        }
    }

    if classified.is_empty() {
        debug!("Classification reply contained no tags");
        return None;
    }
    Some(classified)
}
