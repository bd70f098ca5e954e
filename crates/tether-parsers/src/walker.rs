use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use rayon::prelude::*;
use tether_core::types::{ParseWarning, Parsed, SourceUnit};

use crate::treesitter::detect_language;

pub const IGNORE_FILE_NAME: &str = ".tetherignore";

pub struct WalkEntry {
    pub path: PathBuf,
    pub language: String,
}

pub struct FileWalker {
    root: PathBuf,
    excludes: GlobSet,
}

impl FileWalker {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            excludes: GlobSet::empty(),
        }
    }

    /// Exclude files whose root-relative path matches any glob. Invalid globs
    /// are logged and ignored.
    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Self {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => tracing::warn!(pattern = %pattern, error = %e, "invalid ignore pattern"),
            }
        }
        self.excludes = builder.build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignore patterns could not be compiled");
            GlobSet::empty()
        });
        self
    }

    /// Source files under the root, sorted by path.
    pub fn walk(&self) -> Vec<WalkEntry> {
        let mut entries = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .require_git(false)
            .add_custom_ignore_filename(IGNORE_FILE_NAME)
            .filter_entry(|e| e.file_name() != "node_modules")
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(e) => {
                    tracing::debug!(error = %e, "walk error");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.into_path();
            let relative = path.strip_prefix(&self.root).unwrap_or(&path);
            if self.excludes.is_match(relative) {
                tracing::debug!(path = %relative.display(), "excluded by ignore pattern");
                continue;
            }
            if let Some(lang) = detect_language(&path) {
                entries.push(WalkEntry {
                    path,
                    language: lang.to_string(),
                });
            }
        }

        entries
    }
}

/// Read walked files into memory. Unreadable files become warnings.
pub fn load_sources(entries: &[WalkEntry]) -> Parsed<Vec<SourceUnit>> {
    let results: Vec<Result<SourceUnit, ParseWarning>> = entries
        .par_iter()
        .map(|entry| {
            let path = entry.path.display().to_string();
            std::fs::read_to_string(&entry.path)
                .map(|content| SourceUnit::new(&path, content))
                .map_err(|e| {
                    tracing::warn!(file = %path, error = %e, "cannot read source file");
                    ParseWarning::new(&path, format!("cannot read file: {e}"))
                })
        })
        .collect();

    let mut units = Vec::with_capacity(results.len());
    let mut warnings = Vec::new();
    for result in results {
        match result {
            Ok(unit) => units.push(unit),
            Err(warning) => warnings.push(warning),
        }
    }
    Parsed::new(units, warnings)
}
