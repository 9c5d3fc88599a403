//! Errors that stop a channel from being built

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{ConfigError, RecordError};

/// Broad classes of failure, useful for exit codes and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidConfig,
    InvalidStructure,
    UnrecognizedFileType,
    Parse,
    Io,
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("invalid path: {} does not exist or is not a directory", .path.display())]
    RootNotFound { path: PathBuf },

    #[error("missing configuration file {}", .path.display())]
    ConfigNotFound { path: PathBuf },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("channel configuration {} contains no channel sections", .path.display())]
    EmptyChannelConfig { path: PathBuf },

    #[error("channel configuration {} contains {count} channel sections, expected one", .path.display())]
    MultipleChannelSections { path: PathBuf, count: usize },

    #[error("missing root channel folder in {}", .path.display())]
    MissingRootFolder { path: PathBuf },

    #[error("multiple root channel folders in {}: {}", .path.display(), display_paths(.folders))]
    MultipleRootFolders { path: PathBuf, folders: Vec<PathBuf> },

    #[error("{}: {source}", .config.display())]
    InvalidEntry {
        config: PathBuf,
        #[source]
        source: RecordError,
    },

    #[error("{}: source id {id:?} is used by more than one entry", .config.display())]
    DuplicateSourceId { config: PathBuf, id: String },

    #[error("unrecognized file type: {}", .path.display())]
    UnrecognizedFileType { path: PathBuf },

    #[error("cannot read directory {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ChannelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChannelError::RootNotFound { .. } | ChannelError::ConfigNotFound { .. } => {
                ErrorKind::NotFound
            }
            ChannelError::Config(ConfigError::Parse { .. }) => ErrorKind::Parse,
            ChannelError::Config(ConfigError::Io { .. }) | ChannelError::Io { .. } => ErrorKind::Io,
            ChannelError::EmptyChannelConfig { .. }
            | ChannelError::MultipleChannelSections { .. }
            | ChannelError::InvalidEntry { .. }
            | ChannelError::DuplicateSourceId { .. } => ErrorKind::InvalidConfig,
            ChannelError::MissingRootFolder { .. } | ChannelError::MultipleRootFolders { .. } => {
                ErrorKind::InvalidStructure
            }
            ChannelError::UnrecognizedFileType { .. } => ErrorKind::UnrecognizedFileType,
        }
    }

    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        ChannelError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChannelError>;
