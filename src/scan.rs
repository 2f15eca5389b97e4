//! Literal scanner: builds the engine's input model from Java source.
//!
//! Parses the file with tree-sitter and collects every `string_literal`
//! node, grouped by physical line in left-to-right order. Literals whose
//! line already carries a matching `//$NON-NLS-<n>$` marker are reported
//! as tagged so the caller can default them to `Skip`. Text blocks are
//! not collected: their value cannot land on a single bundle line.

use std::collections::HashMap;
use std::sync::OnceLock;

use anyhow::{Context, Result, bail};
use regex::Regex;
use tree_sitter::{Language, Node, Parser};

use crate::model::{Literal, LiteralLine, Position, Substitution, Task};

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"//\$NON-NLS-(\d+)\$").unwrap())
}

/// One literal found by the scanner, with its line bookkeeping.
#[derive(Debug, Clone)]
pub struct ScannedLiteral {
    pub literal: Literal,
    /// 0-based source line.
    pub line: usize,
    /// True when the line already carries this literal's NON-NLS tag.
    pub tagged: bool,
}

/// Scanner output: the flat literal list plus the per-line grouping the
/// tag locator needs.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub literals: Vec<ScannedLiteral>,
    pub lines: Vec<LiteralLine>,
}

/// Scans `text` for string literals.
pub fn scan(text: &str) -> Result<ScanResult> {
    let mut parser = Parser::new();
    let language: Language = tree_sitter_java::LANGUAGE.into();
    parser
        .set_language(&language)
        .context("Failed to load the Java grammar")?;
    let Some(tree) = parser.parse(text, None) else {
        bail!("Failed to parse the source file");
    };

    let mut strings = Vec::new();
    let mut comments = Vec::new();
    collect(tree.root_node(), &mut strings, &mut comments);

    // tagged indices per line, from existing NON-NLS markers in comments
    let mut tags_by_line: HashMap<usize, Vec<usize>> = HashMap::new();
    for node in comments {
        let comment = &text[node.start_byte()..node.end_byte()];
        for captures in tag_re().captures_iter(comment) {
            if let Ok(index) = captures[1].parse::<usize>() {
                tags_by_line
                    .entry(node.start_position().row)
                    .or_default()
                    .push(index);
            }
        }
    }

    let mut result = ScanResult::default();
    for node in strings {
        // text blocks have no single-line key=value rendition, leave them
        if node.start_position().row != node.end_position().row
            || text[node.start_byte()..node.end_byte()].starts_with("\"\"\"")
        {
            continue;
        }
        let row = node.start_position().row;
        let literal = Literal::new(
            Position::new(node.start_byte(), node.end_byte() - node.start_byte()),
            &text[node.start_byte()..node.end_byte()],
        );

        if result.lines.last().map(|l| l.number) != Some(row) {
            result.lines.push(LiteralLine::new(row));
        }
        let line = result.lines.last_mut().unwrap();
        line.push(literal.clone());

        let index_in_line = line.literals().len();
        let tagged = tags_by_line
            .get(&row)
            .is_some_and(|tags| tags.contains(&index_in_line));
        result.literals.push(ScannedLiteral {
            literal,
            line: row,
            tagged,
        });
    }
    Ok(result)
}

fn collect<'t>(node: Node<'t>, strings: &mut Vec<Node<'t>>, comments: &mut Vec<Node<'t>>) {
    match node.kind() {
        "string_literal" => {
            strings.push(node);
            return;
        }
        "line_comment" | "block_comment" => {
            comments.push(node);
            return;
        }
        _ => {}
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect(child, strings, comments);
    }
}

/// Builds the substitution array for a scan: untagged literals become
/// `Translate` with a generated `<prefix>.<n>` key, tagged ones `Skip`.
pub fn build_substitutions(result: &ScanResult, key_prefix: &str) -> Vec<Substitution> {
    result
        .literals
        .iter()
        .enumerate()
        .map(|(n, scanned)| {
            let task = if scanned.tagged {
                Task::Skip
            } else {
                Task::Translate
            };
            Substitution::new(
                format!("{key_prefix}.{n}"),
                scanned.literal.clone(),
                task,
            )
        })
        .collect()
}
