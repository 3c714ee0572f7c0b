//! Document loading from tab-separated files.
//!
//! Each record is one line with exactly three fields: title, content and
//! label. There is no header row. Records are decoded individually so a
//! stray invalid byte only affects its own document; the analyzer reports
//! the replacement character as an encoding error later.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::LoadError;

const FIELD_COUNT: usize = 3;

/// A single input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub content: String,
    pub label: String,
}

impl Document {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            label: label.into(),
        }
    }
}

/// Parse TSV records from raw bytes. `path` is only used for error messages.
pub fn parse_records(bytes: &[u8], path: &Path) -> Result<Vec<Document>, LoadError> {
    let mut documents = Vec::new();

    for (idx, raw) in bytes.split(|b| *b == b'\n').enumerate() {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let line = String::from_utf8_lossy(raw);
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != FIELD_COUNT {
            return Err(LoadError::MalformedRecord {
                path: path.to_path_buf(),
                line: idx + 1,
                fields: fields.len(),
            });
        }

        documents.push(Document::new(fields[0], fields[1], fields[2]));
    }

    Ok(documents)
}

/// Load documents from a single TSV file.
pub fn load_file(path: &Path) -> Result<Vec<Document>, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let documents = parse_records(&bytes, path)?;
    tracing::debug!(path = %path.display(), documents = documents.len(), "loaded documents");
    Ok(documents)
}

/// Load documents from a file, or from every `.tsv` file under a directory.
///
/// Directory entries are visited in path order so runs are reproducible.
/// Paths matching any `excluded` glob are skipped.
pub fn load(path: &Path, excluded: &[String]) -> Result<Vec<Document>, LoadError> {
    if !path.is_dir() {
        return load_file(path);
    }

    let mut documents = Vec::new();
    for file in collect_files(path, excluded)? {
        documents.extend(load_file(&file)?);
    }
    Ok(documents)
}

fn build_excludes(excluded: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in excluded {
        // Patterns are validated with the config; a bad one here is ignored.
        if let Ok(glob) = Glob::new(pattern) {
            builder.add(glob);
        }
    }
    builder.build().unwrap_or_else(|_| GlobSet::empty())
}

/// Collect `.tsv` files under `root`, skipping hidden directories.
fn collect_files(root: &Path, excluded: &[String]) -> Result<Vec<PathBuf>, LoadError> {
    let excludes = build_excludes(excluded);
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            !(e.depth() > 0 && e.file_type().is_dir() && name.starts_with('.'))
        })
    {
        let entry = entry.map_err(|source| LoadError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let is_tsv = path.extension().and_then(|e| e.to_str()) == Some("tsv");
        if !is_tsv || excludes.is_match(path) {
            continue;
        }
        files.push(path.to_path_buf());
    }

    Ok(files)
}
