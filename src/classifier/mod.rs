// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Tag classification engine
//!
//! [`Classifier`] is the single context object that owns the built-in
//! dictionary, the compiled patterns and the per-folder knowledge-base cache.
//! Construct one and share it by reference; nothing here is process-global.

pub mod merge;
pub mod rules;

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use tracing::{debug, warn};

use crate::knowledge::{FsSource, KnowledgeBase, KnowledgeLoader, KnowledgeSource};
use crate::tags::{split_tags, Category, ClassifiedTags, CustomTags, PatternSet, TagDatabase};

pub use merge::MergedDatabase;

/// Classification context
pub struct Classifier {
    database: OnceLock<TagDatabase>,
    patterns: OnceLock<PatternSet>,
    knowledge_cache: Mutex<HashMap<PathBuf, Arc<KnowledgeBase>>>,
    source: Box<dyn KnowledgeSource>,
    base_dir: PathBuf,
}

impl Classifier {
    /// Classifier reading knowledge bases from the local file system,
    /// resolving relative folders against the current directory
    pub fn new() -> Self {
        Self::with_source(FsSource)
    }

    /// Classifier reading knowledge bases through a custom source
    pub fn with_source(source: impl KnowledgeSource + 'static) -> Self {
        Self {
            database: OnceLock::new(),
            patterns: OnceLock::new(),
            knowledge_cache: Mutex::new(HashMap::new()),
            source: Box::new(source),
            base_dir: PathBuf::new(),
        }
    }

    /// Directory that relative knowledge-base folders are resolved against
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// Built-in dictionary, constructed on first use
    pub fn tag_database(&self) -> &TagDatabase {
        self.database.get_or_init(|| {
            debug!("Building built-in tag database");
            TagDatabase::builtin()
        })
    }

    /// Compiled pattern lists, constructed on first use
    pub fn patterns(&self) -> &PatternSet {
        self.patterns.get_or_init(|| {
            debug!("Compiling tag patterns");
            PatternSet::compile()
        })
    }

    /// Classify one tag without a knowledge base
    pub fn classify_tag(&self, tag: &str, custom: &CustomTags) -> Category {
        rules::classify_builtin(tag, self.tag_database(), self.patterns(), custom)
    }

    /// Classify a comma-separated tag string without a knowledge base
    pub fn classify_tags(&self, tags: &str, custom: &CustomTags) -> ClassifiedTags {
        let mut classified = ClassifiedTags::new();
        for tag in split_tags(tags) {
            classified.push(self.classify_tag(tag, custom), tag);
        }
        classified
    }

    /// Built-in dictionary merged with `knowledge`
    pub fn merge_knowledge(&self, knowledge: &KnowledgeBase) -> MergedDatabase {
        MergedDatabase::merge(self.tag_database(), knowledge)
    }

    /// Classify one tag against an already merged database
    pub fn classify_tag_merged(
        &self,
        tag: &str,
        merged: &MergedDatabase,
        custom: &CustomTags,
    ) -> Category {
        rules::classify_merged(tag, merged, self.tag_database(), self.patterns(), custom)
    }

    /// Classify a comma-separated tag string against a knowledge base
    pub fn classify_tags_with_knowledge(
        &self,
        tags: &str,
        knowledge: &KnowledgeBase,
        custom: &CustomTags,
    ) -> ClassifiedTags {
        let merged = self.merge_knowledge(knowledge);
        let mut classified = ClassifiedTags::new();
        for tag in split_tags(tags) {
            classified.push(self.classify_tag_merged(tag, &merged, custom), tag);
        }
        classified
    }

    /// Load (or fetch from cache) the knowledge base in `folder`.
    ///
    /// Results are cached by resolved path, including empty results for
    /// missing folders. An empty path yields an empty knowledge base.
    pub fn load_knowledge_base(&self, folder: impl AsRef<Path>) -> Arc<KnowledgeBase> {
        let folder = folder.as_ref();
        if folder.as_os_str().to_string_lossy().trim().is_empty() {
            warn!("Empty knowledge base path, using no knowledge base");
            return Arc::new(KnowledgeBase::new());
        }
        let resolved = self.resolve(folder);

        let mut cache = self
            .knowledge_cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(hit) = cache.get(&resolved) {
            debug!("Knowledge base cache hit: {:?}", resolved);
            return Arc::clone(hit);
        }

        let knowledge = Arc::new(KnowledgeLoader::new(self.source.as_ref()).load(&resolved));
        cache.insert(resolved, Arc::clone(&knowledge));
        knowledge
    }

    /// Drop all cached knowledge bases so the next load re-reads the files
    pub fn clear_knowledge_cache(&self) {
        self.knowledge_cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    /// `folder` joined onto the base directory, with `.` dropped and `..`
    /// folded lexically so each folder maps to one cache key
    fn resolve(&self, folder: &Path) -> PathBuf {
        let joined = if folder.is_absolute() {
            folder.to_path_buf()
        } else {
            self.base_dir.join(folder)
        };

        let mut resolved = PathBuf::new();
        for component in joined.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    let last = resolved.components().next_back();
                    let at_root = matches!(last, Some(Component::RootDir | Component::Prefix(_)));
                    let can_fold = matches!(last, Some(Component::Normal(_)));
                    if can_fold {
                        resolved.pop();
                    } else if !at_root {
                        resolved.push(component);
                    }
                }
                other => resolved.push(other),
            }
        }
        if resolved.as_os_str().is_empty() {
            resolved.push(".");
        }
        resolved
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory folder that counts every file-system call
    #[derive(Default)]
    struct CountingSource {
        files: HashMap<PathBuf, String>,
        calls: Arc<AtomicUsize>,
    }

    impl CountingSource {
        fn with_file(mut self, path: &str, content: &str) -> Self {
            self.files.insert(PathBuf::from(path), content.to_string());
            self
        }
    }

    impl KnowledgeSource for CountingSource {
        fn is_dir(&self, path: &Path) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.files.keys().any(|f| f.parent() == Some(path))
        }

        fn list_files(&self, dir: &Path) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .files
                .keys()
                .filter(|f| f.parent() == Some(dir))
                .filter_map(|f| f.file_name()?.to_str().map(str::to_string))
                .collect())
        }

        fn read_to_string(&self, path: &Path) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound).into())
        }
    }

    fn counting_classifier() -> (Classifier, Arc<AtomicUsize>) {
        let source = CountingSource::default()
            .with_file("/kb/characters.csv", "hatsune_miku\nfoo\n")
            .with_file("/kb/general.csv", "foo\nsmile\n");
        let calls = Arc::clone(&source.calls);
        (Classifier::with_source(source), calls)
    }

    #[test]
    fn test_builtin_classification_samples() {
        let classifier = Classifier::new();
        let none = CustomTags::new();
        assert_eq!(classifier.classify_tag("1girl", &none), Category::Special);
        assert_eq!(classifier.classify_tag("masterpiece", &none), Category::Quality);
        assert_eq!(classifier.classify_tag("rating:safe", &none), Category::Rating);
        assert_eq!(classifier.classify_tag("long_hair", &none), Category::General);
        assert_eq!(classifier.classify_tag("zzqqxx123", &none), Category::General);
    }

    #[test]
    fn test_shared_state_is_built_once() {
        let classifier = Classifier::new();
        let first = classifier.tag_database() as *const TagDatabase;
        let second = classifier.tag_database() as *const TagDatabase;
        assert_eq!(first, second);
        assert!(std::ptr::eq(classifier.patterns(), classifier.patterns()));
    }

    #[test]
    fn test_batch_counts_and_order() {
        let classifier = Classifier::new();
        let input = "1girl, smile, , masterpiece, smile,by wlop ,zzqqxx123";
        let classified = classifier.classify_tags(input, &CustomTags::new());

        assert_eq!(classified.total(), split_tags(input).len());
        assert_eq!(classified.get(Category::General), ["smile", "smile", "zzqqxx123"]);
        assert_eq!(classified.get(Category::Artists), ["by wlop"]);
        assert_eq!(classified.get(Category::Special), ["1girl"]);
    }

    #[test]
    fn test_batch_preserves_original_case() {
        let classifier = Classifier::new();
        let classified = classifier.classify_tags("Masterpiece, SOLO", &CustomTags::new());
        assert_eq!(classified.get(Category::Quality), ["Masterpiece"]);
        assert_eq!(classified.get(Category::Special), ["SOLO"]);
    }

    #[test]
    fn test_custom_override_beats_knowledge_base() {
        let mut kb = KnowledgeBase::new();
        kb.insert(Category::General, "hatsune_miku");
        let custom = CustomTags::new().with_characters(["hatsune_miku"]);

        let classified =
            Classifier::new().classify_tags_with_knowledge("hatsune_miku", &kb, &custom);
        assert_eq!(classified.get(Category::Characters), ["hatsune_miku"]);
    }

    #[test]
    fn test_knowledge_base_loaded_once_per_path() {
        let (classifier, calls) = counting_classifier();

        let first = classifier.load_knowledge_base("/kb");
        let after_first = calls.load(Ordering::SeqCst);
        assert!(after_first > 0);

        let second = classifier.load_knowledge_base("/kb");
        assert_eq!(calls.load(Ordering::SeqCst), after_first);
        assert_eq!(first, second);

        classifier.clear_knowledge_cache();
        let third = classifier.load_knowledge_base("/kb");
        assert!(calls.load(Ordering::SeqCst) > after_first);
        assert_eq!(first, third);
    }

    #[test]
    fn test_relative_folder_resolves_against_base_dir() {
        let (classifier, calls) = counting_classifier();
        let classifier = classifier.base_dir("/");

        let relative = classifier.load_knowledge_base("kb");
        let after_relative = calls.load(Ordering::SeqCst);
        let absolute = classifier.load_knowledge_base("/kb");
        assert_eq!(calls.load(Ordering::SeqCst), after_relative);
        assert!(relative.contains(Category::Characters, "hatsune_miku"));
        assert!(Arc::ptr_eq(&relative, &absolute));
    }

    #[test]
    fn test_missing_folder_is_cached_as_empty() {
        let (classifier, calls) = counting_classifier();
        assert!(classifier.load_knowledge_base("/nowhere").is_empty());
        let after = calls.load(Ordering::SeqCst);
        assert!(classifier.load_knowledge_base("/nowhere").is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), after);
    }

    #[test]
    fn test_empty_folder_path_loads_nothing() {
        let (classifier, calls) = counting_classifier();
        let classifier = classifier.base_dir("/kb");

        assert!(classifier.load_knowledge_base("").is_empty());
        assert!(classifier.load_knowledge_base("   ").is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        // the base directory itself still loads when named explicitly
        assert!(!classifier.load_knowledge_base("/kb").is_empty());
    }

    #[test]
    fn test_equivalent_folder_spellings_share_one_entry() {
        let (classifier, calls) = counting_classifier();
        let classifier = classifier.base_dir("/");

        let first = classifier.load_knowledge_base("kb");
        let after_first = calls.load(Ordering::SeqCst);
        for spelling in ["./kb", "kb/", "/other/../kb", "/./kb"] {
            let again = classifier.load_knowledge_base(spelling);
            assert!(Arc::ptr_eq(&first, &again), "{} was loaded separately", spelling);
        }
        assert_eq!(calls.load(Ordering::SeqCst), after_first);
    }

    #[test]
    fn test_resolve_folds_parent_components() {
        let classifier = Classifier::new().base_dir("/srv/tags");
        assert_eq!(classifier.resolve(Path::new("../kb")), PathBuf::from("/srv/kb"));
        assert_eq!(classifier.resolve(Path::new("/../kb")), PathBuf::from("/kb"));

        let relative = Classifier::new();
        assert_eq!(relative.resolve(Path::new("../kb")), PathBuf::from("../kb"));
        assert_eq!(relative.resolve(Path::new(".")), PathBuf::from("."));
    }

    #[test]
    fn test_loaded_knowledge_base_merge_priority() {
        let (classifier, _) = counting_classifier();
        let kb = classifier.load_knowledge_base("/kb");
        let classified = classifier.classify_tags_with_knowledge(
            "foo, smile, hatsune_miku",
            &kb,
            &CustomTags::new(),
        );
        // characters is merged before general and claims "foo"
        assert_eq!(classified.get(Category::Characters), ["foo", "hatsune_miku"]);
        assert_eq!(classified.get(Category::General), ["smile"]);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let (classifier, _) = counting_classifier();
        let kb = classifier.load_knowledge_base("/kb");
        let custom = CustomTags::parse("Saber", "wlop", "");
        let input = "1girl, Saber, foo, wlop, long_hair, sitting_on_chair, by ask";

        let first = classifier.classify_tags_with_knowledge(input, &kb, &custom);
        for _ in 0..3 {
            assert_eq!(classifier.classify_tags_with_knowledge(input, &kb, &custom), first);
        }
        assert_eq!(first.total(), 7);
    }

    #[test]
    fn test_classifier_is_shareable_across_threads() {
        let classifier = Arc::new(Classifier::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let classifier = Arc::clone(&classifier);
                std::thread::spawn(move || {
                    classifier.classify_tags("1girl, solo, smile", &CustomTags::new())
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().total(), 3);
        }
    }
}
