//! Source rewriting: literal replacement, tag insertion, import insertion.
//!
//! Produces the ordered edit list for the source file. Tag inserts are
//! computed in two phases: first with the literal's own offset, then an
//! adjustment pass snaps each one to the end of its containing line so
//! that several tags on one line all land after the code.

use crate::edits::TextEdit;
use crate::model::{LiteralLine, Substitution, Task};
use crate::source::SourceFile;
use crate::tags;

/// Placeholder the code pattern uses for the quoted key.
pub const KEY: &str = "${key}";

/// Builds the replacement text for one literal: the first occurrence of
/// the key placeholder in `pattern` becomes the quoted key. Further
/// occurrences, or a pattern without the placeholder, are left verbatim.
pub fn build_replacement(pattern: &str, key: &str) -> String {
    match pattern.find(KEY) {
        Some(at) => format!("{}\"{}\"{}", &pattern[..at], key, &pattern[at + KEY.len()..]),
        None => pattern.to_string(),
    }
}

/// Computes all edits against the source buffer.
///
/// Per substitution, in original order: `Translate` records the literal
/// replacement; everything except `Skip` records a tag insert. When
/// `added_import` is set, one more insert places the import declaration
/// after the last import (or package declaration, or file start).
pub fn source_edits(
    source: &SourceFile,
    subs: &[Substitution],
    lines: &[LiteralLine],
    pattern: &str,
    added_import: Option<&str>,
    line_separator: &str,
) -> Vec<TextEdit> {
    let mut edits = Vec::new();
    let mut tag_edits = Vec::new();

    for sub in subs {
        let position = sub.value.position;
        if sub.task == Task::Translate {
            edits.push(TextEdit::replace(
                format!("externalize {}", sub.value.value),
                position.offset,
                position.length,
                build_replacement(pattern, &sub.key),
            ));
        }
        if sub.task != Task::Skip {
            let text = format!(" {}", tags::tag_text(tags::tag_index(lines, &sub.value)));
            // raw offset; adjusted below
            tag_edits.push(TextEdit::insert(
                format!("add tag{} for {}", text, sub.value.value),
                position.offset,
                text,
            ));
        }
    }

    snap_to_line_end(source, &mut tag_edits);
    edits.extend(tag_edits);

    if let Some(import) = added_import {
        edits.push(TextEdit::insert(
            format!("add import declaration {import}"),
            source.import_insert_offset(),
            format!("{line_separator}import {import};"),
        ));
    }
    edits
}

/// Adjustment pass: each tag insert moves from the literal's offset to the
/// end-of-line offset of its containing line.
fn snap_to_line_end(source: &SourceFile, tag_edits: &mut [TextEdit]) {
    for edit in tag_edits {
        edit.offset = source.line_end_offset(edit.offset);
    }
}
