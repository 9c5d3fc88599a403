//! Shared utility functions for channel building

use std::fs::DirEntry;
use std::path::Path;

use glob::Pattern;

use crate::error::{ChannelError, Result};

/// Split an entry name at its last `.` into base name and extension.
///
/// A name without a `.` is all base name. A trailing `.` gives an empty
/// extension, a leading one an empty base name.
pub fn split_file_name(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((base, ext)) => (base, Some(ext)),
        None => (name, None),
    }
}

/// Check if an entry name should be ignored based on ignore patterns.
pub fn should_ignore_name(name: &str, ignore_patterns: &[String]) -> bool {
    // Always ignore .git directory
    if name == ".git" {
        return true;
    }

    ignore_patterns
        .iter()
        .any(|pattern| name == pattern || glob_match(pattern, name))
}

/// Match a glob pattern against a name.
pub fn glob_match(pattern: &str, name: &str) -> bool {
    Pattern::new(pattern)
        .map(|p| p.matches(name))
        .unwrap_or(false)
}

/// Read directory entries, optionally sorted by file name.
pub fn read_entries(path: &Path, sort: bool) -> Result<Vec<DirEntry>> {
    let entries = std::fs::read_dir(path).map_err(|e| ChannelError::io(path, e))?;

    let mut entries = entries
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| ChannelError::io(path, e))?;
    if sort {
        entries.sort_by_key(|a| a.file_name());
    }
    Ok(entries)
}

/// Get the name of an entry as a string.
pub fn entry_name(entry: &DirEntry) -> String {
    entry.file_name().to_string_lossy().to_string()
}
