//! Channel tree construction
//!
//! `ChannelBuilder` walks a channel folder depth-first. Every directory must
//! carry a `metadata.ini` whose sections describe its entries by base name;
//! entries without a section are skipped and reported through a
//! [`DiagnosticSink`].

mod builder;
mod config;
mod diagnostics;
mod utils;

// Re-export public types
pub use builder::{BuildOutput, ChannelBuilder, attach_files, construct_channel};
pub use config::{BuilderConfig, CHANNEL_CONFIG_NAME, DIR_CONFIG_NAME};
pub use diagnostics::{CallbackSink, DiagnosticSink, Warning};
pub use utils::{glob_match, split_file_name};
