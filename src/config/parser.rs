//! Strict line-oriented parser for `metadata.ini` style files
//!
//! The grammar is the classic section/option layout with a few extra rules:
//! duplicate sections are rejected outright, malformed lines are collected
//! and reported together once the whole input has been read, and indented
//! lines continue the value of the option above them.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::error::{MalformedLine, ParseError};

/// Name of the section whose options are inherited by every other section.
pub const DEFAULT_SECTION: &str = "DEFAULT";

static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(?P<header>[^\]]+)\]").expect("valid section regex"));

static OPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<option>.*?)\s*(?P<sep>[=:])\s*(?P<value>.*)$").expect("valid option regex")
});

static OPTION_NV_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<option>.*?)\s*(?:(?P<sep>[=:])\s*(?P<value>.*))?$")
        .expect("valid option regex")
});

/// Parser behaviour switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserOptions {
    /// Accept option lines without a separator and store them with no value.
    /// When off, such lines are reported as malformed.
    pub allow_no_value: bool,
}

/// A single option as it appeared in the file. `None` means a valueless option.
pub type RawValue = Option<String>;

/// One `[section]` block, options kept in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSection {
    name: String,
    options: Vec<(String, RawValue)>,
}

impl RawSection {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &[(String, RawValue)] {
        &self.options
    }

    /// Look up an option by its (lower-cased) name.
    pub fn get(&self, option: &str) -> Option<&RawValue> {
        self.options
            .iter()
            .find(|(name, _)| name == option)
            .map(|(_, value)| value)
    }

    fn set(&mut self, option: String, value: RawValue) {
        match self.options.iter_mut().find(|(name, _)| *name == option) {
            Some(slot) => slot.1 = value,
            None => self.options.push((option, value)),
        }
    }
}

/// Parsed file before value normalisation: multi-line values keep their
/// newlines and the `[DEFAULT]` block is held apart from real sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfig {
    defaults: Vec<(String, RawValue)>,
    sections: Vec<RawSection>,
}

impl RawConfig {
    pub fn defaults(&self) -> &[(String, RawValue)] {
        &self.defaults
    }

    pub fn sections(&self) -> &[RawSection] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&RawSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Write the configuration back out in a form `parse_str` accepts.
    pub fn to_ini_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RawConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        if !self.defaults.is_empty() {
            write_section(f, DEFAULT_SECTION, &self.defaults)?;
            first = false;
        }
        for section in &self.sections {
            if !first {
                writeln!(f)?;
            }
            write_section(f, &section.name, &section.options)?;
            first = false;
        }
        Ok(())
    }
}

fn write_section(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    options: &[(String, RawValue)],
) -> fmt::Result {
    writeln!(f, "[{}]", name)?;
    for (option, value) in options {
        // `= value` must not start with whitespace or it reads back as a continuation.
        let assign = if option.is_empty() { "=" } else { " =" };
        match value {
            None => writeln!(f, "{}", option)?,
            Some(v) if v.is_empty() => writeln!(f, "{}{} \"\"", option, assign)?,
            Some(v) => {
                let mut lines = v.split('\n');
                writeln!(f, "{}{} {}", option, assign, lines.next().unwrap_or_default())?;
                for line in lines {
                    writeln!(f, "\t{}", line)?;
                }
            }
        }
    }
    Ok(())
}

/// Where the option currently being read lives.
#[derive(Clone, Copy)]
enum Cursor {
    Defaults,
    Section(usize),
}

/// Accumulated option value while scanning; continuation lines push onto it.
type Pending = Option<Vec<String>>;

#[derive(Default)]
struct Builder {
    defaults: Vec<(String, Pending)>,
    sections: Vec<(String, Vec<(String, Pending)>)>,
}

impl Builder {
    fn options_mut(&mut self, cursor: Cursor) -> &mut Vec<(String, Pending)> {
        match cursor {
            Cursor::Defaults => &mut self.defaults,
            Cursor::Section(i) => &mut self.sections[i].1,
        }
    }

    fn set(&mut self, cursor: Cursor, option: String, value: Pending) {
        let options = self.options_mut(cursor);
        match options.iter_mut().find(|(name, _)| *name == option) {
            Some(slot) => slot.1 = value,
            None => options.push((option, value)),
        }
    }

    fn append(&mut self, cursor: Cursor, option: &str, fragment: String) {
        let options = self.options_mut(cursor);
        if let Some((_, value)) = options.iter_mut().find(|(name, _)| name == option) {
            value.get_or_insert_with(Vec::new).push(fragment);
        }
    }

    fn finish(self) -> RawConfig {
        let join = |options: Vec<(String, Pending)>| -> Vec<(String, RawValue)> {
            options
                .into_iter()
                .map(|(name, value)| (name, value.map(|parts| parts.join("\n"))))
                .collect()
        };
        RawConfig {
            defaults: join(self.defaults),
            sections: self
                .sections
                .into_iter()
                .map(|(name, options)| {
                    let mut section = RawSection::new(name);
                    for (option, value) in join(options) {
                        section.set(option, value);
                    }
                    section
                })
                .collect(),
        }
    }
}

/// Parse configuration text with default options.
pub fn parse_str(text: &str) -> Result<RawConfig, ParseError> {
    parse_str_with(text, ParserOptions::default())
}

/// Parse configuration text.
///
/// Duplicate sections and options outside any section abort immediately.
/// Lines that fit no rule are collected and returned together as
/// [`ParseError::Malformed`] once the whole input has been scanned.
pub fn parse_str_with(text: &str, options: ParserOptions) -> Result<RawConfig, ParseError> {
    let option_re = if options.allow_no_value {
        &*OPTION_NV_RE
    } else {
        &*OPTION_RE
    };

    let mut builder = Builder::default();
    let mut cursor: Option<Cursor> = None;
    let mut current_option: Option<String> = None;
    let mut malformed = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let lineno = index + 1;

        if line.trim().is_empty() || line.starts_with(['#', ';']) {
            continue;
        }
        if is_rem_comment(line) {
            continue;
        }

        if line.starts_with(char::is_whitespace) {
            if let (Some(cur), Some(option)) = (cursor, current_option.as_deref()) {
                let fragment = line.trim();
                if !fragment.is_empty() {
                    builder.append(cur, option, fragment.to_string());
                }
                continue;
            }
        }

        if let Some(caps) = SECTION_RE.captures(line) {
            let name = &caps["header"];
            if builder.sections.iter().any(|(existing, _)| existing == name) {
                return Err(ParseError::DuplicateSection {
                    name: name.to_string(),
                    line: lineno,
                });
            }
            cursor = if name == DEFAULT_SECTION {
                Some(Cursor::Defaults)
            } else {
                builder.sections.push((name.to_string(), Vec::new()));
                Some(Cursor::Section(builder.sections.len() - 1))
            };
            // A section header never starts with a continuation.
            current_option = None;
            continue;
        }

        let Some(cur) = cursor else {
            return Err(ParseError::MissingSectionHeader {
                line: lineno,
                content: line.to_string(),
            });
        };

        let parsed = option_re.captures(line).map(|caps| {
            let name = caps["option"].trim_end().to_lowercase();
            let value = caps
                .name("value")
                .map(|m| clean_value(m.as_str()).to_string());
            (name, value)
        });

        match parsed {
            Some((name, value)) => {
                builder.set(cur, name.clone(), value.map(|v| vec![v]));
                // An empty option name is stored but never takes continuations.
                current_option = (!name.is_empty()).then_some(name);
            }
            None => malformed.push(MalformedLine {
                line: lineno,
                content: line.to_string(),
            }),
        }
    }

    if !malformed.is_empty() {
        return Err(ParseError::Malformed { lines: malformed });
    }

    Ok(builder.finish())
}

/// `rem` comments: first word is `rem` in any case and the line has no indent.
fn is_rem_comment(line: &str) -> bool {
    line.starts_with(['r', 'R'])
        && line
            .split_whitespace()
            .next()
            .is_some_and(|word| word.eq_ignore_ascii_case("rem"))
}

/// Strip an inline `;` comment and surrounding whitespace from an option value.
///
/// Only the first `;` is considered, and only when whitespace precedes it.
/// A leading `;` looks back at the last character instead, so `;note ` with
/// trailing whitespace is a comment while `;note` is a value.
fn clean_value(raw: &str) -> &str {
    let mut value = raw;
    if let Some(pos) = value.find(';') {
        let before = if pos == 0 { value } else { &value[..pos] };
        if before.ends_with(char::is_whitespace) {
            value = &value[..pos];
        }
    }
    let value = value.trim();
    if value == "\"\"" { "" } else { value }
}
