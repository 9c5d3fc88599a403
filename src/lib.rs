//! Ricecake - build a content channel tree from a folder of media and `metadata.ini` files

pub mod config;
pub mod error;
pub mod node;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ConfigFile, ParseError, ParserOptions, read_config};
pub use error::{ChannelError, ErrorKind};
pub use node::{Channel, ContentNode, FileRef, MediaKind, Node, NodeCounts, TopicNode};
pub use output::{OutputConfig, TreeFormatter, print_config_json, print_json};
pub use tree::{
    BuildOutput, BuilderConfig, CallbackSink, ChannelBuilder, DiagnosticSink, Warning,
    construct_channel,
};
