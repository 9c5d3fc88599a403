//! Channel formatting and display
//!
//! - `config` - Output configuration types
//! - `tree` - Console tree formatter, colored or plain
//! - `json` - JSON output for the channel and for raw configuration files

mod config;
mod json;
mod tree;

pub use config::OutputConfig;
pub use json::{print_config_json, print_json};
pub use tree::TreeFormatter;
