//! Lightweight source model for one Java file.
//!
//! [`SourceFile`] keeps the raw text plus the little structure the engine
//! needs: a line index for offset math, the package declaration and the
//! import declarations. Declarations are matched with regexes rather than
//! a full parse; the scanner does the real parsing for literals.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::model::Position;

fn package_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*package[ \t]+([\w.]+)[ \t]*;").unwrap())
}

fn import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*import[ \t]+(?:static[ \t]+)?([\w.*]+)[ \t]*;").unwrap())
}

#[derive(Debug, Clone)]
struct ImportDecl {
    name: String,
    position: Position,
}

/// One parsed source file, the engine's read-only view of the code.
#[derive(Debug)]
pub struct SourceFile {
    path: PathBuf,
    text: String,
    /// Byte offset of the first character of each line.
    line_starts: Vec<usize>,
    package: Option<(String, Position)>,
    imports: Vec<ImportDecl>,
    read_only: bool,
}

impl SourceFile {
    /// Reads and parses the file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read source file: {}", path.display()))?;
        let read_only = fs::metadata(path)
            .map(|m| m.permissions().readonly())
            .unwrap_or(false);
        Ok(Self::from_text(path, text, read_only))
    }

    /// Builds a source model from in-memory text.
    pub fn from_text(path: &Path, text: String, read_only: bool) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }

        let package = package_re().captures(&text).map(|c| {
            let m = c.get(0).unwrap();
            (
                c[1].to_string(),
                Position::new(m.start(), m.end() - m.start()),
            )
        });
        let imports = import_re()
            .captures_iter(&text)
            .map(|c| {
                let m = c.get(0).unwrap();
                ImportDecl {
                    name: c[1].to_string(),
                    position: Position::new(m.start(), m.end() - m.start()),
                }
            })
            .collect();

        Self {
            path: path.to_path_buf(),
            text,
            line_starts,
            package,
            imports,
            read_only,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Package name of the file, `None` for the default package.
    pub fn package(&self) -> Option<&str> {
        self.package.as_ref().map(|(name, _)| name.as_str())
    }

    /// File name without the `.java` extension.
    pub fn type_name(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unknown")
    }

    /// Directory holding the file; generated siblings go there too.
    pub fn directory(&self) -> PathBuf {
        self.path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// 0-based line number containing the byte offset.
    pub fn line_of_offset(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        }
    }

    /// Offset of the end of the line containing `offset`, before the line
    /// terminator.
    pub fn line_end_offset(&self, offset: usize) -> usize {
        let line = self.line_of_offset(offset);
        let end = match self.line_starts.get(line + 1) {
            Some(&next_start) => next_start - 1,
            None => self.text.len(),
        };
        // leave \r\n intact as a unit
        if end > 0 && self.text.as_bytes().get(end.wrapping_sub(1)) == Some(&b'\r') {
            end - 1
        } else {
            end
        }
    }

    pub fn has_import(&self, name: &str) -> bool {
        self.imports.iter().any(|i| i.name == name)
    }

    /// Where a new import declaration belongs: after the last existing
    /// import, else after the package declaration, else at file start.
    pub fn import_insert_offset(&self) -> usize {
        if let Some(last) = self.imports.last() {
            return last.position.end();
        }
        if let Some((_, position)) = &self.package {
            return position.end();
        }
        0
    }
}
