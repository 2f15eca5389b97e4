//! NON-NLS tag markers.
//!
//! A tag records the 1-based index of a literal among the literals on its
//! source line: `//$NON-NLS-2$` marks the second literal of the line as
//! externalized (or deliberately not externalized). The index is stable
//! regardless of what happens to the other literals.

use crate::model::{Literal, LiteralLine};

pub const TAG_PREFIX: &str = "//$NON-NLS-";
pub const TAG_POSTFIX: &str = "$";

/// Renders the tag for the given 1-based index.
pub fn tag_text(index: usize) -> String {
    format!("{TAG_PREFIX}{index}{TAG_POSTFIX}")
}

/// 1-based index of `literal` within its containing line.
///
/// # Panics
///
/// Panics when the literal is not present in any line. The lines and the
/// substitutions are built from the same scan, so a miss means the caller
/// supplied inconsistent models.
pub fn tag_index(lines: &[LiteralLine], literal: &Literal) -> usize {
    let line = find_line(lines, literal)
        .unwrap_or_else(|| panic!("no line contains literal {:?}", literal.value));
    line.literals()
        .iter()
        .position(|l| l == literal)
        .map(|i| i + 1)
        .unwrap_or_else(|| panic!("literal {:?} not found in its line", literal.value))
}

fn find_line<'a>(lines: &'a [LiteralLine], literal: &Literal) -> Option<&'a LiteralLine> {
    lines
        .iter()
        .find(|line| line.literals().iter().any(|l| l == literal))
}
