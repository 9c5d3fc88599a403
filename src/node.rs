//! Channel tree produced from a folder
//!
//! The tree is plain owned data: a [`Channel`] holds its children, topics hold
//! theirs, and nothing points back up. It serializes to JSON with a `kind`
//! tag on every node so an upload step can walk it without this crate.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Media kinds understood for both leaf nodes and attached files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
    Document,
}

impl MediaKind {
    pub const ALL: [MediaKind; 3] = [MediaKind::Video, MediaKind::Audio, MediaKind::Document];

    /// Kind for a file extension, compared case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "mp4" => Some(MediaKind::Video),
            "mp3" => Some(MediaKind::Audio),
            "pdf" => Some(MediaKind::Document),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            MediaKind::Video => "mp4",
            MediaKind::Audio => "mp3",
            MediaKind::Document => "pdf",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Document => "document",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A file to upload alongside a content node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRef {
    pub path: PathBuf,
    pub kind: MediaKind,
}

/// Root of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Channel {
    pub source_domain: String,
    pub source_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub children: Vec<Node>,
}

impl Channel {
    /// Count every node below the root, by kind.
    pub fn counts(&self) -> NodeCounts {
        let mut counts = NodeCounts::default();
        for child in &self.children {
            child.tally(&mut counts);
        }
        counts
    }
}

/// Grouping node for a sub-directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicNode {
    pub source_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub children: Vec<Node>,
}

/// Fields shared by video, audio and document leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentNode {
    pub source_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Ask the uploader to generate a thumbnail from the content (videos only)
    pub derive_thumbnail: bool,
    pub files: Vec<FileRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Topic(TopicNode),
    Video(ContentNode),
    Audio(ContentNode),
    Document(ContentNode),
}

impl Node {
    pub fn source_id(&self) -> &str {
        match self {
            Node::Topic(t) => &t.source_id,
            Node::Video(c) | Node::Audio(c) | Node::Document(c) => &c.source_id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Node::Topic(t) => &t.title,
            Node::Video(c) | Node::Audio(c) | Node::Document(c) => &c.title,
        }
    }

    pub fn is_topic(&self) -> bool {
        matches!(self, Node::Topic(_))
    }

    /// Media kind of a leaf, `None` for topics.
    pub fn media_kind(&self) -> Option<MediaKind> {
        match self {
            Node::Topic(_) => None,
            Node::Video(_) => Some(MediaKind::Video),
            Node::Audio(_) => Some(MediaKind::Audio),
            Node::Document(_) => Some(MediaKind::Document),
        }
    }

    pub fn kind_label(&self) -> &'static str {
        self.media_kind().map_or("topic", |k| k.label())
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Topic(t) => &t.children,
            _ => &[],
        }
    }

    pub fn content(&self) -> Option<&ContentNode> {
        match self {
            Node::Topic(_) => None,
            Node::Video(c) | Node::Audio(c) | Node::Document(c) => Some(c),
        }
    }

    fn tally(&self, counts: &mut NodeCounts) {
        match self {
            Node::Topic(t) => {
                counts.topics += 1;
                for child in &t.children {
                    child.tally(counts);
                }
            }
            Node::Video(_) => counts.videos += 1,
            Node::Audio(_) => counts.audio += 1,
            Node::Document(_) => counts.documents += 1,
        }
    }
}

/// Per-kind node totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NodeCounts {
    pub topics: usize,
    pub videos: usize,
    pub audio: usize,
    pub documents: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str) -> ContentNode {
        ContentNode {
            source_id: id.to_string(),
            title: id.to_uppercase(),
            license: None,
            author: None,
            description: None,
            thumbnail: None,
            derive_thumbnail: false,
            files: Vec::new(),
        }
    }

    #[test]
    fn test_media_kind_from_extension() {
        assert_eq!(MediaKind::from_extension("mp4"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_extension("MP3"), Some(MediaKind::Audio));
        assert_eq!(MediaKind::from_extension("Pdf"), Some(MediaKind::Document));
        assert_eq!(MediaKind::from_extension("vtt"), None);
        assert_eq!(MediaKind::from_extension(""), None);
        for kind in MediaKind::ALL {
            assert_eq!(MediaKind::from_extension(kind.extension()), Some(kind));
        }
    }

    #[test]
    fn test_counts_walk_nested_topics() {
        let channel = Channel {
            source_domain: "d".into(),
            source_id: "c".into(),
            title: "C".into(),
            description: None,
            thumbnail: None,
            children: vec![
                Node::Topic(TopicNode {
                    source_id: "t".into(),
                    title: "T".into(),
                    author: None,
                    description: None,
                    thumbnail: None,
                    children: vec![Node::Video(leaf("v")), Node::Audio(leaf("a"))],
                }),
                Node::Document(leaf("d")),
            ],
        };
        let counts = channel.counts();
        assert_eq!(
            counts,
            NodeCounts {
                topics: 1,
                videos: 1,
                audio: 1,
                documents: 1
            }
        );
    }

    #[test]
    fn test_node_serializes_with_kind_tag() {
        let node = Node::Video(leaf("intro"));
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["kind"], "video");
        assert_eq!(value["source_id"], "intro");
        assert!(value.get("license").is_none());
        assert_eq!(node.kind_label(), "video");
        assert!(node.children().is_empty());
    }
}
