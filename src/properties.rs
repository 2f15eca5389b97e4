//! Property-bundle read and write path.
//!
//! The bundle is a flat `key=value` text file. On the write path the
//! existing content is preserved verbatim as a prefix and new entries are
//! appended, one per line. Only the leading whitespace run of a value is
//! escaped (each character preceded by a backslash), which is the minimal
//! escaping the line format needs to preserve leading whitespace. Embedded control
//! characters are left alone; known limitation of the format writer.
//!
//! The read path is deliberately lenient: it exists only to feed the
//! advisory already-defined-key check, so a bundle that cannot be read is
//! reported as absent rather than failing the run.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use crate::model::{Substitution, Task};

pub const PROPERTY_FILE_EXT: &str = ".properties";

/// Platform line separator, used for every generated line of output.
pub const LINE_SEPARATOR: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Strips the quote delimiters off a literal's verbatim value.
///
/// # Panics
///
/// Panics if the value is not wrapped in a pair of quote characters. That
/// indicates an inconsistent caller-supplied model, not bad user input.
pub fn strip_quotes(s: &str) -> &str {
    assert!(
        s.len() >= 2 && s.starts_with('"') && s.ends_with('"'),
        "literal value is not quote-wrapped: {s}"
    );
    &s[1..s.len() - 1]
}

/// Encodes a value for a bundle line: every character of the leading
/// whitespace run is preceded by a backslash, the rest is copied verbatim.
pub fn encode_value(value: &str) -> String {
    let first_non_ws = value
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    if first_non_ws == 0 {
        return value.to_string();
    }
    let mut encoded = String::with_capacity(value.len() + first_non_ws);
    for c in value[..first_non_ws].chars() {
        encoded.push('\\');
        encoded.push(c);
    }
    encoded.push_str(&value[first_non_ws..]);
    encoded
}

/// A loaded snapshot of the persisted bundle, keyed lookups only.
///
/// Comment lines and formatting are not represented here; the write path
/// keeps them by copying the raw file content instead.
#[derive(Debug, Default)]
pub struct PropertyStore {
    entries: HashMap<String, String>,
}

impl PropertyStore {
    /// Loads the bundle at `path`, returning `None` when the file cannot
    /// be read as text. Malformed lines are skipped, not errors.
    pub fn load(path: &Path) -> Option<Self> {
        let text = fs::read_to_string(path).ok()?;
        Some(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();
        for line in text.lines() {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }
            let Some(sep) = trimmed.find(['=', ':']) else {
                continue;
            };
            let key = trimmed[..sep].trim();
            if key.is_empty() {
                continue;
            }
            let value = decode_value(trimmed[sep + 1..].trim_start());
            entries.insert(key.to_string(), value);
        }
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decodes the escape sequences the `.properties` format defines: `\n`,
/// `\t`, `\r`, `\f`, `\uXXXX`, and backslash before any other character
/// takes that character literally.
fn decode_value(raw: &str) -> String {
    let mut decoded = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => decoded.push('\n'),
            Some('t') => decoded.push('\t'),
            Some('r') => decoded.push('\r'),
            Some('f') => decoded.push('\u{000c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded_char) => decoded.push(decoded_char),
                    // malformed escape, keep the raw text
                    None => {
                        decoded.push('u');
                        decoded.push_str(&hex);
                    }
                }
            }
            Some(next) => decoded.push(next),
            None => {}
        }
    }
    decoded
}

/// Builds the full new bundle content: old content verbatim, a line
/// separator when the old content does not already end on a fresh line,
/// then one `key=value` line per included `Translate` substitution.
pub fn generate_bundle(
    old_content: &str,
    subs: &[Substitution],
    excluded: &BTreeSet<usize>,
) -> String {
    let mut content = String::from(old_content);
    if needs_line_separator(&content) {
        content.push_str(LINE_SEPARATOR);
    }
    for (i, sub) in subs.iter().enumerate() {
        if sub.task == Task::Translate && !excluded.contains(&i) {
            content.push_str(&sub.key);
            content.push('=');
            content.push_str(&encode_value(strip_quotes(&sub.value.value)));
            content.push_str(LINE_SEPARATOR);
        }
    }
    content
}

/// Heuristic from the write path: no separator needed for an empty buffer
/// or when everything after the last separator is whitespace.
fn needs_line_separator(content: &str) -> bool {
    if content.is_empty() {
        return false;
    }
    match content.rfind(LINE_SEPARATOR) {
        None => true,
        Some(last) => !content[last..].trim().is_empty(),
    }
}
