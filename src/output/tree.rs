//! Tree formatter for channel output
//!
//! Renders a [`Channel`] the way `tree` renders a directory, one node per
//! line with its kind and source id, followed by a per-kind summary.

use std::io::{self, Write};
use std::path::Path;

use termcolor::{Color, ColorChoice, ColorSpec, NoColor, StandardStream, WriteColor};

use crate::node::{Channel, ContentNode, MediaKind, Node};

use super::config::OutputConfig;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

fn kind_color(node: &Node) -> Color {
    match node.media_kind() {
        None => Color::Blue,
        Some(MediaKind::Video) => Color::Green,
        Some(MediaKind::Audio) => Color::Magenta,
        Some(MediaKind::Document) => Color::Yellow,
    }
}

/// Formatter for channel trees.
pub struct TreeFormatter {
    config: OutputConfig,
}

impl TreeFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Render to a plain string with no colors.
    pub fn format(&self, channel: &Channel) -> String {
        let mut out = NoColor::new(Vec::new());
        // Writing into a Vec cannot fail
        let _ = self.write_channel(&mut out, channel);
        String::from_utf8_lossy(&out.into_inner()).into_owned()
    }

    pub fn print(&self, channel: &Channel) -> io::Result<()> {
        let choice = if self.config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.write_channel(&mut stdout, channel)
    }

    fn write_channel<W: WriteColor>(&self, out: &mut W, channel: &Channel) -> io::Result<()> {
        out.set_color(ColorSpec::new().set_bold(true))?;
        write!(out, "{}", channel.title)?;
        out.reset()?;
        self.write_dim(
            out,
            &format!("  [channel {} @ {}]", channel.source_id, channel.source_domain),
        )?;
        writeln!(out)?;

        self.write_children(out, &channel.children, "")?;

        let counts = channel.counts();
        writeln!(out)?;
        writeln!(
            out,
            "{} topics, {} videos, {} audio, {} documents",
            counts.topics, counts.videos, counts.audio, counts.documents
        )?;
        Ok(())
    }

    fn write_children<W: WriteColor>(
        &self,
        out: &mut W,
        children: &[Node],
        prefix: &str,
    ) -> io::Result<()> {
        for (i, child) in children.iter().enumerate() {
            let is_last = i + 1 == children.len();
            self.write_node(out, child, prefix, is_last)?;
        }
        Ok(())
    }

    fn write_node<W: WriteColor>(
        &self,
        out: &mut W,
        node: &Node,
        prefix: &str,
        is_last: bool,
    ) -> io::Result<()> {
        write!(out, "{}{}", prefix, if is_last { LAST_BRANCH } else { BRANCH })?;

        let mut spec = ColorSpec::new();
        spec.set_fg(Some(kind_color(node))).set_bold(node.is_topic());
        out.set_color(&spec)?;
        write!(out, "{}", node.title())?;
        if node.is_topic() {
            write!(out, "/")?;
        }
        out.reset()?;
        self.write_dim(out, &format!("  ({} {})", node.kind_label(), node.source_id()))?;
        writeln!(out)?;

        let child_prefix = format!("{}{}", prefix, if is_last { SPACE } else { PIPE });
        match node {
            Node::Topic(topic) => self.write_children(out, &topic.children, &child_prefix),
            Node::Video(content) | Node::Audio(content) | Node::Document(content) => {
                if self.config.show_files {
                    self.write_files(out, content, &child_prefix)?;
                }
                Ok(())
            }
        }
    }

    fn write_files<W: WriteColor>(
        &self,
        out: &mut W,
        content: &ContentNode,
        prefix: &str,
    ) -> io::Result<()> {
        let base = content
            .files
            .first()
            .and_then(|f| f.path.parent())
            .unwrap_or(Path::new(""));
        for file in &content.files {
            let shown = file.path.strip_prefix(base).unwrap_or(&file.path);
            write!(out, "{}", prefix)?;
            self.write_dim(out, &format!("{} ({})", shown.display(), file.kind))?;
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_dim<W: WriteColor>(&self, out: &mut W, text: &str) -> io::Result<()> {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Black)).set_intense(true))?;
        write!(out, "{}", text)?;
        out.reset()
    }
}
