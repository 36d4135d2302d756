//! Source discovery by filesystem walking.

use std::fs;
use std::path::{Path, PathBuf};

/// Markdown source found under the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceRef {
    /// Document key: relative path without extension, `/`-separated
    /// (e.g., "index", "guide/install").
    pub key: String,
    /// Path to the `.md` file.
    pub path: PathBuf,
}

/// Discovers markdown sources by walking the filesystem.
pub(crate) struct Scanner {
    source_dir: PathBuf,
}

impl Scanner {
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Scan the source directory, sorted by key.
    ///
    /// Hidden files and directories are skipped. Returns an empty Vec if the
    /// source directory doesn't exist.
    pub fn scan(&self) -> Vec<SourceRef> {
        let mut refs = Vec::new();
        if self.source_dir.exists() {
            scan_directory(&self.source_dir, "", &mut refs);
        }
        refs.sort_by(|a, b| a.key.cmp(&b.key));
        refs
    }
}

fn scan_directory(dir_path: &Path, key_prefix: &str, refs: &mut Vec<SourceRef>) {
    let Ok(entries) = fs::read_dir(dir_path) else {
        return;
    };

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            scan_directory(&path, &join_key(key_prefix, &name), refs);
        } else if path.extension().is_some_and(|e| e == "md")
            && let Some(stem) = path.file_stem()
        {
            refs.push(SourceRef {
                key: join_key(key_prefix, &stem.to_string_lossy()),
                path,
            });
        }
    }
}

fn join_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}
