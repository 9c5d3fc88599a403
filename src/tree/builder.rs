//! ChannelBuilder - turns a channel folder into a [`Channel`] tree

use std::collections::HashSet;
use std::fs::DirEntry;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{
    ChannelRecord, ConfigFile, ContentRecord, RecordError, Section, TopicRecord, read_config_with,
};
use crate::error::{ChannelError, Result};
use crate::node::{Channel, ContentNode, FileRef, MediaKind, Node, TopicNode};

use super::config::BuilderConfig;
use super::diagnostics::{DiagnosticSink, Warning};
use super::utils::{entry_name, read_entries, should_ignore_name, split_file_name};

/// A built channel together with everything that was skipped on the way.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub channel: Channel,
    pub warnings: Vec<Warning>,
}

/// Build a channel from `root` with the default configuration.
pub fn construct_channel(root: &Path) -> Result<BuildOutput> {
    ChannelBuilder::default().construct_collecting(root)
}

/// Walks a channel folder depth-first, one `metadata.ini` per directory.
#[derive(Debug, Clone, Default)]
pub struct ChannelBuilder {
    config: BuilderConfig,
}

impl ChannelBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Build the channel, collecting warnings into the returned output.
    pub fn construct_collecting(&self, root: &Path) -> Result<BuildOutput> {
        let mut warnings = Vec::new();
        let channel = self.construct(root, &mut warnings)?;
        Ok(BuildOutput { channel, warnings })
    }

    /// Build the channel rooted at `root`.
    ///
    /// `root` must hold the channel configuration with exactly one section and
    /// exactly one sub-directory, the content folder that becomes the
    /// channel's children.
    pub fn construct(&self, root: &Path, sink: &mut dyn DiagnosticSink) -> Result<Channel> {
        if !root.is_dir() {
            return Err(ChannelError::RootNotFound {
                path: root.to_path_buf(),
            });
        }

        let config_path = root.join(&self.config.channel_config_name);
        if !config_path.is_file() {
            return Err(ChannelError::ConfigNotFound { path: config_path });
        }

        let channel_config = read_config_with(&config_path, self.config.parser)?;
        let section = match channel_config.sections() {
            [] => return Err(ChannelError::EmptyChannelConfig { path: config_path }),
            [section] => section,
            many => {
                return Err(ChannelError::MultipleChannelSections {
                    path: config_path,
                    count: many.len(),
                });
            }
        };

        let content_dir = self.find_content_folder(root, sink)?;
        let record = ChannelRecord::try_from(section).map_err(invalid_entry(&config_path))?;
        debug!(
            source_id = %record.source_id,
            content = %content_dir.display(),
            "building channel"
        );

        let children = self.build_tree(&content_dir, sink)?;

        Ok(Channel {
            source_domain: record.domain,
            source_id: record.source_id,
            title: record.title,
            description: record.description,
            thumbnail: record.thumbnail,
            children,
        })
    }

    /// The single sub-directory of `root`. Files at this level don't count.
    fn find_content_folder(&self, root: &Path, sink: &mut dyn DiagnosticSink) -> Result<PathBuf> {
        let mut folders = Vec::new();
        for entry in read_entries(root, self.config.sort_entries)? {
            if should_ignore_name(&entry_name(&entry), &self.config.ignore_patterns) {
                continue;
            }
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            if self.is_skipped_symlink(&entry)? {
                sink.warn(Warning::SymlinkSkipped { path });
                continue;
            }
            folders.push(path);
        }

        match folders.len() {
            0 => Err(ChannelError::MissingRootFolder {
                path: root.to_path_buf(),
            }),
            1 => Ok(folders.remove(0)),
            _ => Err(ChannelError::MultipleRootFolders {
                path: root.to_path_buf(),
                folders,
            }),
        }
    }

    /// Build the nodes for every configured entry of `dir`, in visit order.
    pub fn build_tree(&self, dir: &Path, sink: &mut dyn DiagnosticSink) -> Result<Vec<Node>> {
        let config_path = dir.join(&self.config.dir_config_name);
        if !config_path.is_file() {
            return Err(ChannelError::ConfigNotFound { path: config_path });
        }
        let config = read_config_with(&config_path, self.config.parser)?;

        let mut children = Vec::new();
        let mut seen = HashSet::new();
        for entry in read_entries(dir, self.config.sort_entries)? {
            let Some(node) = self.build_entry(dir, &entry, &config, &config_path, sink)? else {
                continue;
            };
            if !seen.insert(node.source_id().to_string()) {
                return Err(ChannelError::DuplicateSourceId {
                    config: config_path,
                    id: node.source_id().to_string(),
                });
            }
            children.push(node);
        }
        Ok(children)
    }

    fn build_entry(
        &self,
        dir: &Path,
        entry: &DirEntry,
        config: &ConfigFile,
        config_path: &Path,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Option<Node>> {
        let name = entry_name(entry);
        let path = entry.path();

        if should_ignore_name(&name, &self.config.ignore_patterns) {
            debug!(path = %path.display(), "ignoring entry");
            return Ok(None);
        }

        let (base, ext) = split_file_name(&name);
        let Some(section) = config.section(base) else {
            if !self.is_config_file(ext) {
                sink.warn(Warning::MissingEntryConfig {
                    entry: path,
                    config: config_path.to_path_buf(),
                });
            }
            return Ok(None);
        };

        if self.is_skipped_symlink(entry)? {
            sink.warn(Warning::SymlinkSkipped { path });
            return Ok(None);
        }

        if path.is_dir() {
            return self.build_topic(section, &path, config_path, sink).map(Some);
        }

        let Some(kind) = ext.and_then(MediaKind::from_extension) else {
            debug!(path = %path.display(), "skipping unsupported file type");
            return Ok(None);
        };

        let record = ContentRecord::try_from(section).map_err(invalid_entry(config_path))?;
        let files = attach_files(dir, &path, &record.files)?;
        let content = ContentNode {
            source_id: record.source_id,
            title: record.title,
            license: record.license,
            author: record.author,
            description: record.description,
            thumbnail: record.thumbnail,
            derive_thumbnail: kind == MediaKind::Video,
            files,
        };
        debug!(kind = %kind, source_id = %content.source_id, "added content");

        Ok(Some(match kind {
            MediaKind::Video => Node::Video(content),
            MediaKind::Audio => Node::Audio(content),
            MediaKind::Document => Node::Document(content),
        }))
    }

    fn build_topic(
        &self,
        section: &Section,
        path: &Path,
        config_path: &Path,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Node> {
        let record = TopicRecord::try_from(section).map_err(invalid_entry(config_path))?;
        debug!(source_id = %record.source_id, path = %path.display(), "entering topic");
        let children = self.build_tree(path, sink)?;
        Ok(Node::Topic(TopicNode {
            source_id: record.source_id,
            title: record.title,
            author: record.author,
            description: record.description,
            thumbnail: record.thumbnail,
            children,
        }))
    }

    fn is_config_file(&self, ext: Option<&str>) -> bool {
        match (ext, self.config.config_extension()) {
            (Some(ext), Some(config_ext)) => ext.eq_ignore_ascii_case(config_ext),
            _ => false,
        }
    }

    fn is_skipped_symlink(&self, entry: &DirEntry) -> Result<bool> {
        if self.config.follow_symlinks {
            return Ok(false);
        }
        let file_type = entry
            .file_type()
            .map_err(|e| ChannelError::io(&entry.path(), e))?;
        Ok(file_type.is_symlink())
    }
}

fn invalid_entry(config_path: &Path) -> impl FnOnce(RecordError) -> ChannelError + '_ {
    move |source| ChannelError::InvalidEntry {
        config: config_path.to_path_buf(),
        source,
    }
}

/// File references for a content entry: its own file, then each declared
/// supplementary file resolved against `dir`.
pub fn attach_files(dir: &Path, own_file: &Path, declared: &[String]) -> Result<Vec<FileRef>> {
    std::iter::once(own_file.to_path_buf())
        .chain(declared.iter().map(|p| dir.join(p)))
        .map(|path| match file_kind(&path) {
            Some(kind) => Ok(FileRef { path, kind }),
            None => Err(ChannelError::UnrecognizedFileType { path }),
        })
        .collect()
}

fn file_kind(path: &Path) -> Option<MediaKind> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(MediaKind::from_extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_files_own_file_first() {
        let dir = Path::new("/channel/unit");
        let files = attach_files(
            dir,
            &dir.join("movie.mp4"),
            &["extra.mp3".to_string(), "docs/notes.PDF".to_string()],
        )
        .unwrap();
        assert_eq!(
            files,
            vec![
                FileRef {
                    path: dir.join("movie.mp4"),
                    kind: MediaKind::Video
                },
                FileRef {
                    path: dir.join("extra.mp3"),
                    kind: MediaKind::Audio
                },
                FileRef {
                    path: dir.join("docs/notes.PDF"),
                    kind: MediaKind::Document
                },
            ]
        );
    }

    #[test]
    fn test_attach_files_unrecognized() {
        let dir = Path::new("/channel/unit");
        let err = attach_files(dir, &dir.join("movie.mp4"), &["extra.vtt".to_string()]).unwrap_err();
        match err {
            ChannelError::UnrecognizedFileType { path } => {
                assert_eq!(path, dir.join("extra.vtt"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_is_config_file() {
        let builder = ChannelBuilder::default();
        assert!(builder.is_config_file(Some("ini")));
        assert!(builder.is_config_file(Some("INI")));
        assert!(!builder.is_config_file(Some("mp4")));
        assert!(!builder.is_config_file(None));
    }
}
