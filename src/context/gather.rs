use std::{
    fs,
    path::{Path, PathBuf},
};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use path_slash::PathExt;

use crate::constants::{BINARY_SAMPLE_BYTES, DEFAULT_MAX_FILE_SIZE};
use crate::context::types::ScannedFile;
use crate::error::{Error, Result};

/// Which files a scan keeps.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// When non-empty, a file must match one of these globs.
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    /// Files larger than this many bytes are skipped.
    pub max_file_size: u64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            include: Vec::new(),
            exclude: Vec::new(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        // Normalize Windows path separators for glob patterns
        let normalized = pattern.replace('\\', "/");
        let glob = Glob::new(&normalized).map_err(|source| Error::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map(Some)
        .map_err(|source| Error::InvalidPattern {
            pattern: patterns.join(", "),
            source,
        })
}

/// Slash-separated display path: relative to `root` when `root` is absolute,
/// otherwise as walked with any leading `./` dropped.
fn display_path(
    path: &Path,
    root: &Path,
) -> String {
    let rel = if root.is_absolute() {
        path.strip_prefix(root).unwrap_or(path)
    } else {
        path
    };
    let slash = rel.to_slash_lossy();
    let trimmed = slash.trim_start_matches("./");
    if trimmed.is_empty() {
        // `root` is the file itself
        return path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    trimmed.to_string()
}

/// Walks `root` (a directory or a single file) honouring `.gitignore`,
/// hidden-file rules and the include/exclude globs. Binary and oversized files
/// are skipped with a warning. The result is sorted by path.
pub fn scan(
    root: &Path,
    options: &ScanOptions,
) -> Result<Vec<ScannedFile>> {
    if !root.exists() {
        return Err(Error::PathNotFound(root.display().to_string()));
    }
    let include = build_globset(&options.include)?;
    let exclude = build_globset(&options.exclude)?;

    let walker = WalkBuilder::new(root)
        .follow_links(false)
        .standard_filters(true)
        .require_git(false)
        .build();

    let mut results = Vec::new();
    for entry_result in walker {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Could not process entry in {:?}: {e}", root);
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = display_path(entry.path(), root);
        if include.as_ref().is_some_and(|set| !set.is_match(&path)) {
            continue;
        }
        if exclude.as_ref().is_some_and(|set| set.is_match(&path)) {
            continue;
        }
        if let Some(file) = read_file(entry.path(), path, options.max_file_size) {
            results.push(file);
        }
    }

    results.sort_by(|a, b| a.path.cmp(&b.path));
    tracing::debug!(root = %root.display(), files = results.len(), "scan complete");
    Ok(results)
}

/// Scans every root and merges the results; the first root to produce a path
/// wins.
pub fn scan_all(
    roots: &[PathBuf],
    options: &ScanOptions,
) -> Result<Vec<ScannedFile>> {
    let mut all = Vec::new();
    for root in roots {
        all.extend(scan(root, options)?);
    }
    // stable sort keeps the first occurrence ahead of later duplicates
    all.sort_by(|a, b| a.path.cmp(&b.path));
    all.dedup_by(|later, earlier| later.path == earlier.path);
    Ok(all)
}

/// Reads one file, or `None` (with a warning) when it is too large, binary
/// or unreadable.
fn read_file(
    disk_path: &Path,
    path: String,
    max_size: u64,
) -> Option<ScannedFile> {
    let metadata = match fs::metadata(disk_path) {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!("Could not stat {path}: {e}");
            return None;
        }
    };
    if metadata.len() > max_size {
        tracing::warn!("{path} exceeds {max_size} bytes. Skipping.");
        return None;
    }
    let bytes = match fs::read(disk_path) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!("Could not read {path}: {e}");
            return None;
        }
    };
    // Binary detection: treat invalid UTF-8 in a sample as binary
    let sample = &bytes[..bytes.len().min(BINARY_SAMPLE_BYTES)];
    if looks_binary(sample) {
        tracing::warn!("{path} appears to be a binary file. Skipping.");
        return None;
    }
    let content = String::from_utf8_lossy(&bytes).into_owned();
    Some(ScannedFile::new(path, content))
}

fn looks_binary(sample: &[u8]) -> bool {
    if sample.contains(&0) {
        return true;
    }
    match std::str::from_utf8(sample) {
        Ok(_) => false,
        // a multi-byte character cut off by the sample boundary is fine
        Err(e) => e.error_len().is_some(),
    }
}
