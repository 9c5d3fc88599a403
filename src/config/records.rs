//! Typed records read out of configuration sections
//!
//! Each node kind accepts a fixed set of keys. Required keys that are absent
//! or empty are errors; unknown keys are ignored and logged at debug level.

use tracing::debug;

use super::document::{NAME_KEY, Section};
use super::error::RecordError;

fn required(section: &Section, key: &'static str) -> Result<String, RecordError> {
    section
        .get(key)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| RecordError {
            section: section.name().to_string(),
            key,
        })
}

fn optional(section: &Section, key: &str) -> Option<String> {
    section
        .get(key)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// `id` if given, otherwise the section's own name.
fn source_id(section: &Section) -> Result<String, RecordError> {
    optional(section, "id")
        .or_else(|| optional(section, NAME_KEY))
        .ok_or_else(|| RecordError {
            section: section.name().to_string(),
            key: "id",
        })
}

fn log_unrecognized(section: &Section, known: &[&str]) {
    for key in section.keys() {
        if key != NAME_KEY && !known.contains(&key) {
            debug!(section = section.name(), key, "ignoring unrecognized key");
        }
    }
}

/// Keys of the single section in `channelmetadata.ini`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRecord {
    pub domain: String,
    pub source_id: String,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
}

impl ChannelRecord {
    pub const KEYS: &'static [&'static str] =
        &["domain", "source_id", "title", "description", "thumbnail"];
}

impl TryFrom<&Section> for ChannelRecord {
    type Error = RecordError;

    fn try_from(section: &Section) -> Result<Self, Self::Error> {
        log_unrecognized(section, Self::KEYS);
        Ok(Self {
            domain: required(section, "domain")?,
            source_id: required(section, "source_id")?,
            title: required(section, "title")?,
            description: optional(section, "description"),
            thumbnail: optional(section, "thumbnail"),
        })
    }
}

/// Keys describing a sub-directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRecord {
    pub source_id: String,
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
}

impl TopicRecord {
    pub const KEYS: &'static [&'static str] = &["id", "title", "author", "description", "thumbnail"];
}

impl TryFrom<&Section> for TopicRecord {
    type Error = RecordError;

    fn try_from(section: &Section) -> Result<Self, Self::Error> {
        log_unrecognized(section, Self::KEYS);
        Ok(Self {
            source_id: source_id(section)?,
            title: required(section, "title")?,
            author: optional(section, "author"),
            description: optional(section, "description"),
            thumbnail: optional(section, "thumbnail"),
        })
    }
}

/// Keys describing a video, audio or document file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRecord {
    pub source_id: String,
    pub title: String,
    pub license: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    /// Supplementary files, relative to the entry's directory
    pub files: Vec<String>,
}

impl ContentRecord {
    pub const KEYS: &'static [&'static str] = &[
        "id",
        "title",
        "license",
        "author",
        "description",
        "thumbnail",
        "files",
    ];
}

impl TryFrom<&Section> for ContentRecord {
    type Error = RecordError;

    fn try_from(section: &Section) -> Result<Self, Self::Error> {
        log_unrecognized(section, Self::KEYS);
        Ok(Self {
            source_id: source_id(section)?,
            title: required(section, "title")?,
            license: optional(section, "license"),
            author: optional(section, "author"),
            description: optional(section, "description"),
            thumbnail: optional(section, "thumbnail"),
            files: section
                .get("files")
                .map(|v| v.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
        })
    }
}
