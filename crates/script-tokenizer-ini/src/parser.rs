/// Token file parsing on top of `rust-ini`
///
/// `rust-ini` splits sections and `key = value` / `key: value` pairs. A
/// pre-pass over the text adds the rules token files inherited from
/// Python's ConfigParser:
/// - indented lines extend the value of the previous entry (joined with `\n`)
/// - a `;` preceded by whitespace starts an inline comment (first `;` only)
/// - entries before any `[section]`, repeated sections and repeated names are errors
/// - a value of exactly `""` is empty

use std::collections::{BTreeMap, BTreeSet};

use ini::{Ini, ParseOption};

use crate::error::{IniError, Result};
use crate::interpolate::interpolate;

/// Name of the section whose entries are visible from every other section
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Stands in for the line break between continuation lines while `rust-ini`
/// reads the text
const CONTINUATION: char = '\u{1f}';

/// A parsed token file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Entries of the `[DEFAULT]` section
    defaults: BTreeMap<String, String>,
    /// Named sections, excluding `[DEFAULT]`
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl Document {
    /// Parse the full text of a token file
    pub fn parse(input: &str) -> Result<Self> {
        let prepared = Prepass::run(input)?;

        // Values are taken verbatim: scripts are full of quotes and backslashes
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(&prepared.text, options).map_err(|e| IniError::Syntax {
            message: e.to_string(),
        })?;

        let mut doc = Document::default();
        for name in prepared.sections {
            if name != DEFAULT_SECTION {
                doc.sections.insert(name, BTreeMap::new());
            }
        }

        for (name, properties) in ini.iter() {
            let Some(name) = name else { continue };
            let entries = if name == DEFAULT_SECTION {
                &mut doc.defaults
            } else {
                doc.sections.entry(name.to_string()).or_default()
            };
            for (key, value) in properties.iter() {
                entries.insert(key.to_string(), clean_value(value));
            }
        }

        Ok(doc)
    }

    /// All entries visible from `section` with `%` references expanded
    ///
    /// Entries from `[DEFAULT]` are included unless the section overrides them.
    pub fn items(&self, section: &str) -> Result<BTreeMap<String, String>> {
        let own = self
            .sections
            .get(section)
            .ok_or_else(|| IniError::NoSection(section.to_string()))?;

        let mut raw = self.defaults.clone();
        raw.extend(own.iter().map(|(k, v)| (k.clone(), v.clone())));

        raw.iter()
            .map(|(option, value)| {
                interpolate(section, option, value, &raw).map(|value| (option.clone(), value))
            })
            .collect()
    }
}

fn clean_value(value: &str) -> String {
    if value == "\"\"" {
        String::new()
    } else {
        value.replace(CONTINUATION, "\n")
    }
}

/// Text handed to `rust-ini`, one output line per input line so its error
/// positions stay valid
#[derive(Default)]
struct Prepass {
    lines: Vec<String>,
    /// Index in `lines` of the entry receiving continuation lines
    entry: Option<usize>,
    /// Section currently open, with the names defined in it so far
    current: Option<String>,
    seen: BTreeMap<String, BTreeSet<String>>,
}

struct Prepared {
    text: String,
    sections: Vec<String>,
}

impl Prepass {
    fn run(input: &str) -> Result<Prepared> {
        let mut pass = Prepass::default();
        for (index, raw) in input.lines().enumerate() {
            pass.feed(index + 1, raw)?;
        }
        Ok(Prepared {
            text: pass.lines.join("\n"),
            sections: pass.seen.into_keys().collect(),
        })
    }

    fn feed(&mut self, line: usize, raw: &str) -> Result<()> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || raw.starts_with('#') || raw.starts_with(';') {
            self.lines.push(String::new());
            return Ok(());
        }

        if raw.starts_with(char::is_whitespace) {
            let Some(entry) = self.entry else {
                return Err(self.stray(line, raw));
            };
            self.lines[entry].push(CONTINUATION);
            self.lines[entry].push_str(trimmed);
            self.lines.push(String::new());
            return Ok(());
        }

        if raw.starts_with('[') {
            self.open_section(line, raw)?;
            self.lines.push(raw.to_string());
            return Ok(());
        }

        let Some(section) = self.current.clone() else {
            return Err(IniError::MissingSectionHeader { line });
        };
        let delim = match raw.find(|c: char| c == '=' || c == ':') {
            Some(delim) if delim > 0 => delim,
            _ => return Err(self.stray(line, raw)),
        };

        let option = raw[..delim].trim();
        let names = self.seen.entry(section.clone()).or_default();
        if !names.insert(option.to_string()) {
            return Err(IniError::DuplicateOption {
                section,
                option: option.to_string(),
                line,
            });
        }

        self.lines.push(strip_inline_comment(raw, delim).to_string());
        self.entry = Some(self.lines.len() - 1);
        Ok(())
    }

    fn open_section(&mut self, line: usize, raw: &str) -> Result<()> {
        self.entry = None;
        // Malformed headers are left for rust-ini to report
        let Some(end) = raw.find(']') else {
            return Ok(());
        };
        let name = raw[1..end].trim().to_string();
        if self.seen.contains_key(&name) {
            return Err(IniError::DuplicateSection { name, line });
        }
        self.seen.insert(name.clone(), BTreeSet::new());
        self.current = Some(name);
        Ok(())
    }

    fn stray(&self, line: usize, raw: &str) -> IniError {
        match self.current {
            None => IniError::MissingSectionHeader { line },
            Some(_) => IniError::InvalidLine {
                line,
                content: raw.to_string(),
            },
        }
    }
}

/// Cut `raw` before an inline comment in its value
///
/// Only the first `;` of the value is considered, and only when whitespace
/// precedes it.
fn strip_inline_comment(raw: &str, delim: usize) -> &str {
    let after = &raw[delim + 1..];
    let value_start = delim + 1 + (after.len() - after.trim_start().len());
    let value = &raw[value_start..];
    match value.find(';') {
        Some(pos) if pos > 0 && value[..pos].ends_with(char::is_whitespace) => &raw[..value_start + pos],
        _ => raw,
    }
}
