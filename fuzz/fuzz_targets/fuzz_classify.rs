// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tagwright::knowledge::parse::parse_category_file;
use tagwright::prompt::{format_text, replace_numbers};
use tagwright::tags::split_tags;
use tagwright::{Classifier, CustomTags, KnowledgeBase};

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    tags: &'a str,
    characters: &'a str,
    artists: &'a str,
    knowledge_file: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    let classifier = Classifier::new();
    let custom = CustomTags::parse(input.characters, input.artists, "");

    // every non-empty tag lands in exactly one category
    let expected = split_tags(input.tags).len();
    assert_eq!(classifier.classify_tags(input.tags, &custom).total(), expected);

    let mut knowledge = KnowledgeBase::new();
    if let Ok(tags) = parse_category_file(input.knowledge_file) {
        knowledge.extend(tagwright::Category::General, tags);
    }
    let classified = classifier.classify_tags_with_knowledge(input.tags, &knowledge, &custom);
    assert_eq!(classified.total(), expected);

    let _ = format_text(input.tags);
    let _ = replace_numbers(input.tags);
});
