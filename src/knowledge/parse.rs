// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Parsers for knowledge-base files
//!
//! A category file is one of three layouts, chosen from its first line:
//! a CSV table with a header row, a headerless CSV (first column is the tag),
//! or plain text with one tag per line. All tags are lowercased.

use csv::{ReaderBuilder, StringRecord};
use std::collections::HashSet;

use crate::tags::Category;
use crate::{Result, TagwrightError};

use super::KnowledgeBase;

/// Tokens that mark a first line as a header row
const HEADER_TOKENS: &[&str] = &["tag", "description", "标签", "描述"];

/// Column names tried, in order, to locate the tag column
const TAG_COLUMNS: &[&str] = &["tag", "tags", "标签", "name", "名称"];

/// How a category file is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileLayout {
    HeaderedCsv,
    HeaderlessCsv,
    PlainText,
}

impl FileLayout {
    pub fn detect(content: &str) -> Self {
        let first_line = content.lines().next().unwrap_or("").trim();
        if !first_line.contains(',') {
            return FileLayout::PlainText;
        }
        let lower = first_line.to_lowercase();
        if HEADER_TOKENS.iter().any(|token| lower.contains(token)) {
            FileLayout::HeaderedCsv
        } else {
            FileLayout::HeaderlessCsv
        }
    }
}

/// Parse a single-category file into its set of lowercase tags
pub fn parse_category_file(content: &str) -> Result<HashSet<String>> {
    let content = strip_bom(content);
    match FileLayout::detect(content) {
        FileLayout::HeaderedCsv => parse_headered(content),
        FileLayout::HeaderlessCsv => parse_headerless(content),
        FileLayout::PlainText => Ok(parse_plain(content)),
    }
}

/// Parse a combined file with explicit `tag` and `category` columns.
///
/// Rows naming a category outside the fixed eight are ignored.
pub fn parse_combined_file(content: &str) -> Result<KnowledgeBase> {
    let mut reader = csv_reader(strip_bom(content), true);
    let headers = reader.headers()?.clone();
    let (Some(tag_idx), Some(category_idx)) =
        (column_index(&headers, "tag"), column_index(&headers, "category"))
    else {
        return Err(TagwrightError::Parse(
            "combined knowledge base needs 'tag' and 'category' columns".to_string(),
        ));
    };

    let mut knowledge = KnowledgeBase::new();
    for record in reader.records() {
        let record = record?;
        let tag = record.get(tag_idx).unwrap_or("").trim();
        let category = record.get(category_idx).unwrap_or("");
        if tag.is_empty() {
            continue;
        }
        if let Ok(category) = category.parse::<Category>() {
            knowledge.insert(category, tag.to_lowercase());
        }
    }
    Ok(knowledge)
}

fn parse_headered(content: &str) -> Result<HashSet<String>> {
    let mut reader = csv_reader(content, true);
    let headers = reader.headers()?.clone();
    let (idx, column) = TAG_COLUMNS
        .iter()
        .find_map(|name| column_index(&headers, name).map(|idx| (idx, *name)))
        .ok_or_else(|| {
            TagwrightError::Parse(format!(
                "no tag column among {:?} (expected one of {:?})",
                headers.iter().collect::<Vec<_>>(),
                TAG_COLUMNS
            ))
        })?;

    let mut tags = HashSet::new();
    for record in reader.records() {
        let record = record?;
        let tag = record.get(idx).unwrap_or("").trim();
        if is_entry(tag) && tag != column {
            tags.insert(tag.to_lowercase());
        }
    }
    Ok(tags)
}

fn parse_headerless(content: &str) -> Result<HashSet<String>> {
    let mut reader = csv_reader(content, false);
    let mut tags = HashSet::new();
    for record in reader.records() {
        let record = record?;
        let tag = record.get(0).unwrap_or("").trim();
        if is_entry(tag) {
            tags.insert(tag.to_lowercase());
        }
    }
    Ok(tags)
}

fn parse_plain(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| is_entry(line) && *line != "tag")
        .map(str::to_lowercase)
        .collect()
}

/// Non-empty and not a `#` comment
fn is_entry(tag: &str) -> bool {
    !tag.is_empty() && !tag.starts_with('#')
}

fn csv_reader(content: &str, has_headers: bool) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .from_reader(content.as_bytes())
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}
