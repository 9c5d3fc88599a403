//! Errors raised while reading configuration files

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A line the parser could not make sense of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// 1-based line number
    pub line: usize,
    /// The line as it appeared in the file
    pub content: String,
}

impl fmt::Display for MalformedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {:2}]: {:?}", self.line, self.content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("duplicate section {name:?} at line {line}")]
    DuplicateSection { name: String, line: usize },

    #[error("option outside of any section at line {line}: {content:?}")]
    MissingSectionHeader { line: usize, content: String },

    #[error("{} malformed line(s):\n{}", .lines.len(), format_lines(.lines))]
    Malformed { lines: Vec<MalformedLine> },
}

fn format_lines(lines: &[MalformedLine]) -> String {
    lines
        .iter()
        .map(|l| format!("\t{}", l))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Failure to load a configuration file from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

impl ConfigError {
    /// Path of the file that failed to load.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ConfigError::Io { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

/// A section lacks a key its node kind requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("section [{section}] is missing required key {key:?}")]
pub struct RecordError {
    pub section: String,
    pub key: &'static str,
}
