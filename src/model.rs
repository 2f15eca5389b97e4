//! Data model for one externalization pass.
//!
//! A [`Substitution`] pairs a string literal found in the source with the
//! resource key it should be externalized under and a per-literal
//! disposition ([`Task`]). The array of substitutions is built once by the
//! scanner (or a host) before validation starts and is read-only from then
//! on; the conflict resolver reports exclusions as an index set instead of
//! mutating entries.

/// Character range of a literal within the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub length: usize,
}

impl Position {
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// A quoted string literal in the source, value kept verbatim including
/// its quote delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub position: Position,
    pub value: String,
}

impl Literal {
    pub fn new(position: Position, value: impl Into<String>) -> Self {
        Self {
            position,
            value: value.into(),
        }
    }
}

/// Per-literal disposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Replace the literal with a bundle lookup and write a bundle entry.
    Translate,
    /// Leave the literal in place but mark it with a NON-NLS tag.
    NeverTranslate,
    /// Leave the literal completely untouched.
    Skip,
}

/// The unit of work: one literal, its proposed key, and its disposition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub key: String,
    pub value: Literal,
    pub task: Task,
}

impl Substitution {
    pub fn new(key: impl Into<String>, value: Literal, task: Task) -> Self {
        Self {
            key: key.into(),
            value,
            task,
        }
    }
}

/// Number of substitutions with the given task.
pub fn count_task(subs: &[Substitution], task: Task) -> usize {
    subs.iter().filter(|s| s.task == task).count()
}

/// Indices of `Translate` substitutions, in original order.
pub fn translate_indices(subs: &[Substitution]) -> Vec<usize> {
    subs.iter()
        .enumerate()
        .filter(|(_, s)| s.task == Task::Translate)
        .map(|(i, _)| i)
        .collect()
}

/// The literals that share one physical source line, left to right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiteralLine {
    /// 0-based source line number.
    pub number: usize,
    literals: Vec<Literal>,
}

impl LiteralLine {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            literals: Vec::new(),
        }
    }

    pub fn push(&mut self, literal: Literal) {
        self.literals.push(literal);
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }
}
