// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Natural-language prompt rendering

use crate::tags::{Category, ClassifiedTags};

use super::format::{format_text, strip_artist_marker, ARTIST_SYMBOL, CHARACTER_SYMBOL};

/// Quality tags that never make it into a rendered prompt
const NEGATIVE_QUALITY: &[&str] = &[
    "worst quality", "low quality", "bad quality", "jpeg artifacts", "blurry",
];

/// A prompt may end on one of these instead of a full stop
const TERMINAL_QUALITY: &[&str] = &["masterpiece", "best quality", "high quality"];

const EMPTY_PROMPT: &str = "An anime-style illustration.";

/// Ordered user-declared names rendered alongside the classified tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameLists {
    pub characters: Vec<String>,
    pub artists: Vec<String>,
    pub copyrights: Vec<String>,
}

/// Render classified tags (and an optional description) as prompt text,
/// without any prefix.
pub fn render_content(
    classified: &ClassifiedTags,
    description: &str,
    extra: &NameLists,
    max_general_features: usize,
) -> String {
    let subject = classified.get(Category::Special).first().map(String::as_str);

    let characters = display_names(
        classified.get(Category::Characters).iter().chain(&extra.characters),
        CHARACTER_SYMBOL,
        |name| format_text(name),
    );
    let artists = display_names(
        classified.get(Category::Artists).iter().chain(&extra.artists),
        ARTIST_SYMBOL,
        |name| format_text(&strip_artist_marker(name)),
    );
    let copyrights: Vec<String> = classified
        .get(Category::Copyrights)
        .iter()
        .chain(&extra.copyrights)
        .map(|c| format_text(c))
        .collect();

    let mut parts = Vec::new();

    if !artists.is_empty() {
        parts.push(format!(
            "The illustration should be in the distinct style of {}",
            artists.join(" and ")
        ));
    }

    if let Some(part) = subject_sentence(subject, &characters, &copyrights) {
        parts.push(part);
    }

    if !description.is_empty() {
        parts.push(description.to_string());
    } else {
        let features: Vec<String> = classified
            .get(Category::General)
            .iter()
            .take(max_general_features)
            .map(|t| t.replace('_', " "))
            .collect();
        if !features.is_empty() {
            parts.push(format!("with {}", features.join(", ")));
        }
    }

    parts.extend(
        classified
            .get(Category::Quality)
            .iter()
            .filter(|q| !NEGATIVE_QUALITY.contains(&q.as_str()))
            .cloned(),
    );

    if parts.is_empty() {
        return EMPTY_PROMPT.to_string();
    }

    let mut content = parts.join(". ");
    if !content.ends_with('.') && !TERMINAL_QUALITY.iter().any(|q| content.ends_with(q)) {
        content.push('.');
    }
    content
}

/// Normal names (formatted) first, then symbol-enhanced names verbatim
fn display_names<'a>(
    names: impl Iterator<Item = &'a String>,
    symbol: char,
    format: impl Fn(&str) -> String,
) -> Vec<String> {
    let (enhanced, normal): (Vec<&String>, Vec<&String>) =
        names.partition(|name| name.starts_with(symbol));
    normal
        .into_iter()
        .map(|name| format(name.as_str()))
        .chain(enhanced.into_iter().cloned())
        .collect()
}

fn subject_sentence(
    subject: Option<&str>,
    characters: &[String],
    copyrights: &[String],
) -> Option<String> {
    let from = (!copyrights.is_empty()).then(|| format!(" from {}", copyrights.join(" and ")));

    if !characters.is_empty() {
        let names = characters.join(" and ");
        let mut sentence = match subject {
            Some(subject) => format!("depicting {} named {}", subject, names),
            None => format!("depicting {}", names),
        };
        if let Some(from) = from {
            sentence.push_str(&from);
        }
        Some(sentence)
    } else if let Some(from) = from {
        Some(match subject {
            Some(subject) => format!("depicting {}{}", subject, from),
            None => from.trim_start().to_string(),
        })
    } else {
        subject.map(|subject| format!("depicting {}", subject))
    }
}
