//! JSON output formatting

use std::io;

use serde::Serialize;

use crate::config::ConfigFile;
use crate::node::Channel;

fn print_pretty<T: Serialize>(value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}

/// Print the channel tree as pretty-printed JSON to stdout.
pub fn print_json(channel: &Channel) -> io::Result<()> {
    print_pretty(channel)
}

/// Print a parsed configuration file as JSON, keys sorted.
pub fn print_config_json(config: &ConfigFile) -> io::Result<()> {
    print_pretty(config)
}
