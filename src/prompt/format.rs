// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Tag text formatting and symbol enhancement

use regex::Regex;
use std::sync::OnceLock;

use crate::tags::{Category, ClassifiedTags};

/// Prefix marking an enhanced character name
pub const CHARACTER_SYMBOL: char = '#';
/// Prefix marking an enhanced artist name
pub const ARTIST_SYMBOL: char = '@';

fn weight_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\([^:()]+:\d*\.?\d+\)").expect("weight pattern is valid"))
}

/// Make tag text safe for a prompt: underscores become spaces and
/// parentheses are escaped, except around weights like `(smile:1.2)`.
pub fn format_text(text: &str) -> String {
    let text = text.replace('_', " ");
    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;
    for weight in weight_pattern().find_iter(&text) {
        escape_parens_into(&text[last..weight.start()], &mut out);
        out.push_str(weight.as_str());
        last = weight.end();
    }
    escape_parens_into(&text[last..], &mut out);
    out
}

fn escape_parens_into(segment: &str, out: &mut String) {
    for c in segment.chars() {
        if c == '(' || c == ')' {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Strip a leading `by ` or any `artist:` marker from an artist tag
pub fn strip_artist_marker(tag: &str) -> String {
    if let Some(rest) = tag.strip_prefix("by ") {
        rest.to_string()
    } else {
        tag.replace("artist:", "")
    }
}

/// `#name` form of a character tag
pub fn character_symbol(tag: &str) -> String {
    format!("{}{}", CHARACTER_SYMBOL, tag.replace(' ', "_"))
}

/// `@name` form of an artist tag
pub fn artist_symbol(tag: &str) -> String {
    format!("{}{}", ARTIST_SYMBOL, strip_artist_marker(tag).replace(' ', "_"))
}

/// Copy of `classified` with characters and artists in symbol form
pub fn enhance_symbols(classified: &ClassifiedTags) -> ClassifiedTags {
    let mut enhanced = classified.clone();
    enhanced.set(
        Category::Characters,
        classified.get(Category::Characters).iter().map(|t| character_symbol(t)).collect(),
    );
    enhanced.set(
        Category::Artists,
        classified.get(Category::Artists).iter().map(|t| artist_symbol(t)).collect(),
    );
    enhanced
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_text_underscores_and_parens() {
        assert_eq!(format_text("long_hair"), "long hair");
        assert_eq!(format_text("saber_(fate)"), r"saber \(fate\)");
    }

    #[test]
    fn test_format_text_keeps_weights() {
        assert_eq!(format_text("(smile:1.2), (blush)"), r"(smile:1.2), \(blush\)");
        assert_eq!(format_text("(red_eyes:.8)"), "(red eyes:.8)");
    }

    #[test]
    fn test_artist_markers() {
        assert_eq!(strip_artist_marker("by wlop"), "wlop");
        assert_eq!(strip_artist_marker("artist:ask"), "ask");
        assert_eq!(strip_artist_marker("nardack"), "nardack");
        assert_eq!(artist_symbol("by greg rutkowski"), "@greg_rutkowski");
        assert_eq!(character_symbol("hatsune miku"), "#hatsune_miku");
    }

    #[test]
    fn test_enhance_symbols_only_touches_names() {
        let mut classified = ClassifiedTags::new();
        classified.push(Category::Characters, "hatsune miku");
        classified.push(Category::Artists, "artist:ask");
        classified.push(Category::General, "long hair");

        let enhanced = enhance_symbols(&classified);
        assert_eq!(enhanced.get(Category::Characters), ["#hatsune_miku"]);
        assert_eq!(enhanced.get(Category::Artists), ["@ask"]);
        assert_eq!(enhanced.get(Category::General), ["long hair"]);
        // input untouched
        assert_eq!(classified.get(Category::Artists), ["artist:ask"]);
    }
}
