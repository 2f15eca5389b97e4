//! Text edits and composite changes.
//!
//! The engine never touches files itself: it produces named, offset-based
//! edits against a source buffer plus whole-file writes, bundled into a
//! [`CompositeChange`] the host applies all-or-nothing.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// One insert (length 0) or replace operation against a text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Human-readable description, shown in dry-run previews.
    pub name: String,
    pub offset: usize,
    pub length: usize,
    pub text: String,
}

impl TextEdit {
    pub fn insert(name: impl Into<String>, offset: usize, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            offset,
            length: 0,
            text: text.into(),
        }
    }

    pub fn replace(
        name: impl Into<String>,
        offset: usize,
        length: usize,
        text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            offset,
            length,
            text: text.into(),
        }
    }
}

/// Applies the edits to `text`, back to front so earlier offsets stay
/// valid. Inserts recorded earlier at the same offset end up earlier in
/// the output.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> String {
    let mut order: Vec<usize> = (0..edits.len()).collect();
    order.sort_by_key(|&i| (edits[i].offset, i));

    let mut result = text.to_string();
    for &i in order.iter().rev() {
        let edit = &edits[i];
        result.replace_range(edit.offset..edit.offset + edit.length, &edit.text);
    }
    result
}

/// One file-level change inside a composite change.
#[derive(Debug, Clone)]
pub enum Change {
    /// Apply `edits` to the current content of `path`.
    EditFile { path: PathBuf, edits: Vec<TextEdit> },
    /// Create `path` or replace its content entirely.
    WriteFile { path: PathBuf, content: String },
}

impl Change {
    pub fn path(&self) -> &Path {
        match self {
            Change::EditFile { path, .. } => path,
            Change::WriteFile { path, .. } => path,
        }
    }
}

/// The atomic unit the engine hands back: source edits, bundle write and
/// accessor write together, applied all-or-nothing.
#[derive(Debug, Clone, Default)]
pub struct CompositeChange {
    pub name: String,
    changes: Vec<Change>,
}

impl CompositeChange {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            changes: Vec::new(),
        }
    }

    pub fn add(&mut self, change: Change) {
        self.changes.push(change);
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Applies every change. New contents are computed up front; if a
    /// write fails, files written so far are restored to their previous
    /// content before the error is returned.
    pub fn apply(&self) -> Result<()> {
        let mut staged: Vec<(PathBuf, Option<String>, String)> = Vec::new();
        for change in &self.changes {
            let path = change.path().to_path_buf();
            let old = if path.exists() {
                Some(
                    fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read file: {}", path.display()))?,
                )
            } else {
                None
            };
            let new = match change {
                Change::EditFile { edits, .. } => {
                    let current = old
                        .as_deref()
                        .with_context(|| format!("File does not exist: {}", path.display()))?;
                    apply_edits(current, edits)
                }
                Change::WriteFile { content, .. } => content.clone(),
            };
            staged.push((path, old, new));
        }

        for (i, (path, _, new)) in staged.iter().enumerate() {
            if let Err(err) = fs::write(path, new)
                .with_context(|| format!("Failed to write file: {}", path.display()))
            {
                rollback(&staged[..i]);
                return Err(err);
            }
        }
        Ok(())
    }
}

fn rollback(written: &[(PathBuf, Option<String>, String)]) {
    for (path, old, _) in written {
        // best effort; the original error is the one worth reporting
        match old {
            Some(content) => {
                let _ = fs::write(path, content);
            }
            None => {
                let _ = fs::remove_file(path);
            }
        }
    }
}
