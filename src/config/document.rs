//! Normalised view of a parsed configuration file
//!
//! Values are whitespace-collapsed, `[DEFAULT]` options are folded into every
//! section, and each section carries its own name under [`NAME_KEY`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use super::error::{ConfigError, ParseError};
use super::parser::{ParserOptions, RawConfig, parse_str_with};

/// Reserved option holding the name of the section it belongs to.
pub const NAME_KEY: &str = "__name__";

/// One section after normalisation. Options are kept sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Section {
    #[serde(skip)]
    name: String,
    options: BTreeMap<String, Option<String>>,
}

impl Section {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of `key`, or `None` when it is absent or valueless.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(|v| v.as_deref())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// A whole configuration file, sections in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    sections: Vec<Section>,
}

impl ConfigFile {
    pub fn from_raw(raw: RawConfig) -> Self {
        let sections = raw
            .sections()
            .iter()
            .map(|raw_section| {
                let mut options = BTreeMap::new();
                for (key, value) in raw.defaults().iter().chain(raw_section.options()) {
                    options.insert(key.clone(), value.as_deref().map(normalize_value));
                }
                options.insert(NAME_KEY.to_string(), Some(raw_section.name().to_string()));
                Section {
                    name: raw_section.name().to_string(),
                    options,
                }
            })
            .collect();
        Self { sections }
    }

    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Self::parse_with(text, ParserOptions::default())
    }

    pub fn parse_with(text: &str, options: ParserOptions) -> Result<Self, ParseError> {
        parse_str_with(text, options).map(Self::from_raw)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Pretty JSON with section and option names sorted.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for ConfigFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sorted: BTreeMap<&str, &Section> =
            self.sections.iter().map(|s| (s.name(), s)).collect();
        let mut map = serializer.serialize_map(Some(sorted.len()))?;
        for (name, section) in sorted {
            map.serialize_entry(name, section)?;
        }
        map.end()
    }
}

/// Collapse runs of whitespace (including newlines from continuation lines)
/// to single spaces.
pub fn normalize_value(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Read and normalise a configuration file.
pub fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
    read_config_with(path, ParserOptions::default())
}

pub fn read_config_with(path: &Path, options: ParserOptions) -> Result<ConfigFile, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ConfigFile::parse_with(&text, options).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
