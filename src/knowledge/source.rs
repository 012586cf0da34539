// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Access to knowledge-base files

use std::path::Path;

use crate::Result;

/// Where knowledge-base folders are read from
pub trait KnowledgeSource: Send + Sync {
    /// Whether `path` is an existing directory
    fn is_dir(&self, path: &Path) -> bool;

    /// File names directly inside `dir`
    fn list_files(&self, dir: &Path) -> Result<Vec<String>>;

    /// Full UTF-8 contents of a file
    fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// Local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl KnowledgeSource for FsSource {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        Ok(names)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }
}
