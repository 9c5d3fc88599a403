//! Configuration types for the channel builder

use crate::config::ParserOptions;

/// File holding the single channel section, directly under the root folder.
pub const CHANNEL_CONFIG_NAME: &str = "channelmetadata.ini";

/// File describing the entries of each content directory.
pub const DIR_CONFIG_NAME: &str = "metadata.ini";

/// Configuration for channel building behavior.
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    pub channel_config_name: String,
    pub dir_config_name: String,
    /// Entry names (or glob patterns) skipped without a warning
    pub ignore_patterns: Vec<String>,
    /// Visit entries sorted by name instead of raw `read_dir` order
    pub sort_entries: bool,
    /// Descend into symlinked entries. When off they are skipped with a warning.
    pub follow_symlinks: bool,
    pub parser: ParserOptions,
}

impl BuilderConfig {
    /// Extension of the per-directory configuration file. Entries with this
    /// extension are never reported as unconfigured.
    pub fn config_extension(&self) -> Option<&str> {
        self.dir_config_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            channel_config_name: CHANNEL_CONFIG_NAME.to_string(),
            dir_config_name: DIR_CONFIG_NAME.to_string(),
            ignore_patterns: Vec::new(),
            sort_entries: true,
            follow_symlinks: false,
            parser: ParserOptions::default(),
        }
    }
}
