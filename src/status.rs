use std::fmt;

/// Severity of a single validation finding, ordered least to most severe.
///
/// `Info` is advisory, `Warning` is surfaced but never blocks, `Error`
/// blocks the final commit, and `Fatal` additionally aborts the remaining
/// validation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal"),
        }
    }
}

/// One finding produced by a validation stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub severity: Severity,
    pub message: String,
}

/// Aggregated result of one or more validation stages.
///
/// Entries keep the order in which they were added; merging appends the
/// other status' entries after this one's.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    entries: Vec<StatusEntry>,
}

impl Status {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fatal(message: impl Into<String>) -> Self {
        let mut status = Self::new();
        status.add_fatal(message);
        status
    }

    pub fn from_warning(message: impl Into<String>) -> Self {
        let mut status = Self::new();
        status.add_warning(message);
        status
    }

    pub fn add_info(&mut self, message: impl Into<String>) {
        self.add(Severity::Info, message);
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.add(Severity::Warning, message);
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.add(Severity::Error, message);
    }

    pub fn add_fatal(&mut self, message: impl Into<String>) {
        self.add(Severity::Fatal, message);
    }

    fn add(&mut self, severity: Severity, message: impl Into<String>) {
        self.entries.push(StatusEntry {
            severity,
            message: message.into(),
        });
    }

    pub fn merge(&mut self, other: Status) {
        self.entries.extend(other.entries);
    }

    pub fn entries(&self) -> &[StatusEntry] {
        &self.entries
    }

    pub fn is_ok(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest severity present, `None` for an empty (all-clear) status.
    pub fn severity(&self) -> Option<Severity> {
        self.entries.iter().map(|e| e.severity).max()
    }

    pub fn has_fatal(&self) -> bool {
        self.severity() >= Some(Severity::Fatal)
    }

    /// True if any entry blocks the final commit (Error or Fatal).
    pub fn has_error(&self) -> bool {
        self.severity() >= Some(Severity::Error)
    }

    pub fn has_warning(&self) -> bool {
        self.severity() >= Some(Severity::Warning)
    }
}
