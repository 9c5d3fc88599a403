//! Test utilities for creating temporary channel folders.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::tree::{CHANNEL_CONFIG_NAME, DIR_CONFIG_NAME};

/// Channel section used by [`TestChannel::with_channel_config`].
pub const SAMPLE_CHANNEL_CONFIG: &str = "\
[channel]
domain = example.org
source_id = test-channel
title = Test Channel
description = A channel built in a temp dir
";

/// A temporary channel folder for testing.
///
/// The folder is automatically cleaned up when dropped.
pub struct TestChannel {
    dir: TempDir,
}

impl TestChannel {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Create a temporary directory with [`SAMPLE_CHANNEL_CONFIG`] at its root.
    pub fn with_channel_config() -> Self {
        let channel = Self::new();
        channel.add_file(CHANNEL_CONFIG_NAME, SAMPLE_CHANNEL_CONFIG);
        channel
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Create a directory (and its parents).
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Write the `metadata.ini` of directory `dir`.
    pub fn add_metadata(&self, dir: &str, content: &str) -> PathBuf {
        self.add_file(&format!("{}/{}", dir, DIR_CONFIG_NAME), content)
    }

    /// Create an empty media file; only its name matters to the builder.
    pub fn add_media(&self, path: &str) -> PathBuf {
        self.add_file(path, "")
    }
}

impl Default for TestChannel {
    fn default() -> Self {
        Self::new()
    }
}
