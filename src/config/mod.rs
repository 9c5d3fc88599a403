//! Configuration files
//!
//! - `parser` - strict line parser producing a [`RawConfig`]
//! - `document` - normalised [`ConfigFile`] with one [`Section`] per block
//! - `records` - typed per-node-kind records built from sections
//! - `error` - parse, load and record errors

mod document;
mod error;
mod parser;
mod records;

pub use document::{ConfigFile, NAME_KEY, Section, normalize_value, read_config, read_config_with};
pub use error::{ConfigError, MalformedLine, ParseError, RecordError};
pub use parser::{
    DEFAULT_SECTION, ParserOptions, RawConfig, RawSection, RawValue, parse_str, parse_str_with,
};
pub use records::{ChannelRecord, ContentRecord, TopicRecord};
