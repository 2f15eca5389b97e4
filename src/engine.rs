//! The externalization engine: validation pipeline and change builder.
//!
//! [`Externalizer`] ties the pieces together. `check_activation` and
//! `check_input` aggregate a multi-severity [`Status`]; a host is expected
//! to stop before `create_change` when a fatal entry is present and before
//! applying when any error is. `create_change` builds the one composite
//! change covering the source edits, the bundle write and the accessor
//! write, so the host can apply all of them or none.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::accessor;
use crate::conflicts::{self, Resolution};
use crate::edits::{Change, CompositeChange};
use crate::model::{LiteralLine, Substitution, Task, count_task};
use crate::progress::Progress;
use crate::properties::{self, LINE_SEPARATOR, PROPERTY_FILE_EXT, PropertyStore};
use crate::rewrite::{self, KEY};
use crate::source::SourceFile;
use crate::status::Status;

/// Substrings a key must not contain; the line format treats them as
/// key/value separators.
pub const RESERVED_KEY_STRINGS: &[&str] = &["=", ":"];

/// Knobs for one externalization pass. Defaults mirror the conventional
/// `Messages.getString(...)` setup.
#[derive(Debug, Clone)]
pub struct Options {
    /// Replacement pattern; `None` means the default
    /// `<accessor>.getString(${key})`.
    pub code_pattern: Option<String>,
    /// Simple name of the generated accessor class.
    pub accessor_name: String,
    /// Bundle base name, without the `.properties` extension.
    pub property_file_name: String,
    /// Full bundle path; `None` derives it next to the source file.
    pub property_path: Option<PathBuf>,
    /// Whether to generate the accessor class at all.
    pub create_accessor: bool,
    /// Import declaration to add to the source, if any.
    pub added_import: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            code_pattern: None,
            accessor_name: "Messages".to_string(),
            property_file_name: "messages".to_string(),
            property_path: None,
            create_accessor: true,
            added_import: None,
        }
    }
}

/// One externalization pass over a single source file.
pub struct Externalizer<'a> {
    source: &'a SourceFile,
    subs: &'a [Substitution],
    lines: &'a [LiteralLine],
    options: Options,
}

impl<'a> Externalizer<'a> {
    pub fn new(
        source: &'a SourceFile,
        subs: &'a [Substitution],
        lines: &'a [LiteralLine],
        options: Options,
    ) -> Self {
        Self {
            source,
            subs,
            lines,
            options,
        }
    }

    pub fn default_code_pattern(&self) -> String {
        format!("{}.getString({KEY})", self.options.accessor_name)
    }

    pub fn code_pattern(&self) -> String {
        self.options
            .code_pattern
            .clone()
            .unwrap_or_else(|| self.default_code_pattern())
    }

    /// Bundle path: configured, or `<source dir>/<base>.properties`.
    pub fn property_path(&self) -> PathBuf {
        self.options.property_path.clone().unwrap_or_else(|| {
            self.source
                .directory()
                .join(format!("{}{PROPERTY_FILE_EXT}", self.options.property_file_name))
        })
    }

    /// Accessor path: `<source dir>/<accessor name>.java`.
    pub fn accessor_path(&self) -> PathBuf {
        self.source
            .directory()
            .join(format!("{}.java", self.options.accessor_name))
    }

    /// Qualified name `ResourceBundle.getBundle` will be handed.
    pub fn bundle_name(&self) -> String {
        let path = self.property_path();
        let base = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.options.property_file_name);
        accessor::bundle_qualified_name(self.source.package(), base)
    }

    // ---- validation

    /// Fast precondition check: is there anything this pass could work on.
    pub fn check_activation(&self) -> Status {
        if self.source.is_read_only() {
            return Status::from_fatal(format!(
                "{} is read-only",
                self.source.path().display()
            ));
        }
        if self.subs.is_empty() {
            return Status::from_fatal("no strings found to externalize");
        }
        Status::new()
    }

    /// Full input validation. Stages run in a fixed order, merging their
    /// findings; the first fatal finding stops the pipeline, and
    /// cancellation is polled between stages.
    pub fn check_input(&self, progress: &mut dyn Progress) -> Status {
        let mut result = Status::new();

        result.merge(self.check_anything_to_do());
        if result.has_fatal() {
            return result;
        }
        progress.worked("anything-to-do");
        if progress.is_cancelled() {
            return result;
        }

        result.merge(self.check_code_pattern());
        if result.has_fatal() {
            return result;
        }
        progress.worked("code-pattern");
        if progress.is_cancelled() {
            return result;
        }

        let mut resolution = Resolution::default();
        conflicts::check_duplicate_keys(self.subs, &mut resolution);
        result.merge(resolution.status);
        if result.has_fatal() {
            return result;
        }
        progress.worked("duplicate-keys");
        if progress.is_cancelled() {
            return result;
        }

        if let Some(store) = self.load_store() {
            let mut resolution = Resolution::default();
            conflicts::check_already_defined(self.subs, &store, &mut resolution);
            result.merge(resolution.status);
            if result.has_fatal() {
                return result;
            }
        }
        progress.worked("already-defined-keys");
        if progress.is_cancelled() {
            return result;
        }

        result.merge(self.check_keys());
        if result.has_fatal() {
            return result;
        }
        progress.worked("keys");

        if !self.property_file_exists() && self.will_modify_property_file() {
            result.add_info(format!(
                "property file {} will be created",
                self.property_path().display()
            ));
        }
        result
    }

    fn check_anything_to_do(&self) -> Status {
        if self.will_create_accessor()
            || self.will_modify_property_file()
            || self.will_modify_source()
        {
            return Status::new();
        }
        Status::from_fatal("nothing to do")
    }

    fn check_code_pattern(&self) -> Status {
        let pattern = self.code_pattern();
        let mut result = Status::new();
        if pattern.trim().is_empty() {
            result.add_error("code pattern is empty");
        }
        match pattern.find(KEY) {
            None => result.add_warning(format!("code pattern does not contain {KEY}")),
            Some(first) => {
                if pattern.rfind(KEY) != Some(first) {
                    result.add_warning(format!(
                        "only the first occurrence of {KEY} will be substituted"
                    ));
                }
            }
        }
        result
    }

    fn check_keys(&self) -> Status {
        let mut result = Status::new();
        for sub in self.subs {
            let key = &sub.key;
            if key.trim().is_empty() {
                result.add_fatal("key must not be empty");
                continue;
            }
            if key.trim() != key {
                result.add_error(format!(
                    "key '{key}' has leading or trailing whitespace"
                ));
            }
            for reserved in RESERVED_KEY_STRINGS {
                if key.contains(reserved) {
                    result.add_error(format!("key '{key}' must not contain '{reserved}'"));
                }
            }
        }
        result
    }

    // ---- change predicates

    pub fn will_modify_source(&self) -> bool {
        count_task(self.subs, Task::Skip) != self.subs.len() || self.will_add_import()
    }

    pub fn will_modify_property_file(&self) -> bool {
        count_task(self.subs, Task::Translate) > 0
    }

    pub fn will_create_accessor(&self) -> bool {
        self.options.create_accessor
            && count_task(self.subs, Task::Translate) > 0
            && !self.accessor_path().exists()
    }

    pub fn will_add_import(&self) -> bool {
        let Some(import) = &self.options.added_import else {
            return false;
        };
        if import.trim().is_empty() {
            return false;
        }
        if self.source.has_import(import) {
            return false;
        }
        count_task(self.subs, Task::Translate) > 0
    }

    fn property_file_exists(&self) -> bool {
        self.property_path().exists()
    }

    fn load_store(&self) -> Option<PropertyStore> {
        let path = self.property_path();
        if !path.exists() {
            return None;
        }
        PropertyStore::load(&path)
    }

    // ---- change building

    /// Builds the composite change. Conflict resolution runs again here to
    /// recompute the exclusion set; it is a pure function of the
    /// substitutions and the bundle snapshot.
    pub fn create_change(&self) -> Result<CompositeChange> {
        let mut change = CompositeChange::new(format!(
            "externalize strings in {}",
            self.source.path().display()
        ));
        let resolution = conflicts::resolve(self.subs, self.load_store().as_ref());

        if self.will_modify_source() {
            let added_import = self.will_add_import().then(|| {
                self.options.added_import.clone().unwrap_or_default()
            });
            change.add(Change::EditFile {
                path: self.source.path().to_path_buf(),
                edits: rewrite::source_edits(
                    self.source,
                    self.subs,
                    self.lines,
                    &self.code_pattern(),
                    added_import.as_deref(),
                    LINE_SEPARATOR,
                ),
            });
        }

        if self.will_modify_property_file() {
            let old_content = self.old_property_source()?;
            change.add(Change::WriteFile {
                path: self.property_path(),
                content: properties::generate_bundle(&old_content, self.subs, &resolution.excluded),
            });
        }

        if self.will_create_accessor() {
            change.add(Change::WriteFile {
                path: self.accessor_path(),
                content: accessor::accessor_source(
                    &self.options.accessor_name,
                    self.source.package(),
                    &self.bundle_name(),
                    LINE_SEPARATOR,
                ),
            });
        }

        Ok(change)
    }

    /// The whole existing bundle content, comments and all; empty when the
    /// bundle does not exist yet.
    fn old_property_source(&self) -> Result<String> {
        let path = self.property_path();
        if !path.exists() {
            return Ok(String::new());
        }
        std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read property file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use crate::engine::*;
    use crate::model::{Literal, LiteralLine, Position, Substitution, Task};
    use crate::progress::NullProgress;
    use crate::properties::LINE_SEPARATOR;
    use crate::source::SourceFile;
    use crate::status::Severity;

    const SOURCE: &str = "package com.example;\n\nclass A {\n  String s = \"Hi\";\n}\n";

    fn fixture(dir: &Path) -> (SourceFile, Vec<Substitution>, Vec<LiteralLine>) {
        let path = dir.join("A.java");
        fs::write(&path, SOURCE).unwrap();
        let source = SourceFile::from_text(&path, SOURCE.to_string(), false);

        let offset = SOURCE.find("\"Hi\"").unwrap();
        let literal = Literal::new(Position::new(offset, 4), "\"Hi\"");
        let mut line = LiteralLine::new(source.line_of_offset(offset));
        line.push(literal.clone());

        let subs = vec![Substitution::new("k1", literal, Task::Translate)];
        (source, subs, vec![line])
    }

    fn options(dir: &Path) -> Options {
        Options {
            code_pattern: Some("Msg.get(${key})".to_string()),
            property_path: Some(dir.join("messages.properties")),
            create_accessor: false,
            ..Options::default()
        }
    }

    #[test]
    fn test_end_to_end_externalization() {
        let dir = tempfile::tempdir().unwrap();
        let (source, subs, lines) = fixture(dir.path());
        let engine = Externalizer::new(&source, &subs, &lines, options(dir.path()));

        assert!(engine.check_activation().is_ok());
        let status = engine.check_input(&mut NullProgress);
        // only the creation notice
        assert_eq!(status.severity(), Some(Severity::Info));

        engine.create_change().unwrap().apply().unwrap();

        let rewritten = fs::read_to_string(dir.path().join("A.java")).unwrap();
        assert_eq!(
            rewritten,
            "package com.example;\n\nclass A {\n  String s = Msg.get(\"k1\"); //$NON-NLS-1$\n}\n"
        );
        let bundle = fs::read_to_string(dir.path().join("messages.properties")).unwrap();
        assert_eq!(bundle, format!("k1=Hi{LINE_SEPARATOR}"));
    }

    #[test]
    fn test_conflicting_store_value_is_fatal_and_nothing_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let (source, _, lines) = fixture(dir.path());
        let offset = SOURCE.find("\"Hi\"").unwrap();
        let subs = vec![Substitution::new(
            "greeting",
            Literal::new(Position::new(offset, 4), "\"Hi\""),
            Task::Translate,
        )];
        fs::write(dir.path().join("messages.properties"), "greeting=hello\n").unwrap();

        let engine = Externalizer::new(&source, &subs, &lines, options(dir.path()));
        let status = engine.check_input(&mut NullProgress);
        assert!(status.has_fatal());

        // host stops on fatal; the source file was never touched
        assert_eq!(
            fs::read_to_string(dir.path().join("A.java")).unwrap(),
            SOURCE
        );
    }

    #[test]
    fn test_identical_store_value_reuses_key() {
        let dir = tempfile::tempdir().unwrap();
        let (source, _, lines) = fixture(dir.path());
        let offset = SOURCE.find("\"Hi\"").unwrap();
        let subs = vec![Substitution::new(
            "greeting",
            Literal::new(Position::new(offset, 4), "\"Hi\""),
            Task::Translate,
        )];
        let bundle_path = dir.path().join("messages.properties");
        fs::write(&bundle_path, "greeting=Hi\n").unwrap();

        let engine = Externalizer::new(&source, &subs, &lines, options(dir.path()));
        let status = engine.check_input(&mut NullProgress);
        assert_eq!(status.severity(), Some(Severity::Warning));

        engine.create_change().unwrap().apply().unwrap();
        // no new line appended, source still rewritten
        assert_eq!(fs::read_to_string(&bundle_path).unwrap(), "greeting=Hi\n");
        assert!(
            fs::read_to_string(dir.path().join("A.java"))
                .unwrap()
                .contains("Msg.get(\"greeting\")")
        );
    }

    #[test]
    fn test_cancellation_stops_between_stages() {
        struct CancelAfter {
            stages: usize,
            seen: usize,
        }
        impl crate::progress::Progress for CancelAfter {
            fn worked(&mut self, _stage: &str) {
                self.seen += 1;
            }
            fn is_cancelled(&self) -> bool {
                self.seen >= self.stages
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let (source, _, lines) = fixture(dir.path());
        let offset = SOURCE.find("\"Hi\"").unwrap();
        let subs = vec![Substitution::new(
            "greeting",
            Literal::new(Position::new(offset, 4), "\"Hi\""),
            Task::Translate,
        )];
        // conflicting store entry that would be fatal in a full run
        fs::write(dir.path().join("messages.properties"), "greeting=hello\n").unwrap();

        let engine = Externalizer::new(&source, &subs, &lines, options(dir.path()));
        let mut progress = CancelAfter { stages: 2, seen: 0 };
        let status = engine.check_input(&mut progress);
        // cancelled before the already-defined check ran
        assert!(!status.has_fatal());
    }

    #[test]
    fn test_all_skipped_is_nothing_to_do() {
        let dir = tempfile::tempdir().unwrap();
        let (source, mut subs, lines) = fixture(dir.path());
        subs[0].task = Task::Skip;

        let engine = Externalizer::new(&source, &subs, &lines, options(dir.path()));
        let status = engine.check_input(&mut NullProgress);
        assert!(status.has_fatal());
    }

    #[test]
    fn test_read_only_source_fails_activation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("A.java");
        let source = SourceFile::from_text(&path, SOURCE.to_string(), true);
        let engine = Externalizer::new(&source, &[], &[], Options::default());
        assert!(engine.check_activation().has_fatal());
    }

    #[test]
    fn test_empty_key_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let (source, mut subs, lines) = fixture(dir.path());
        subs[0].key = "  ".to_string();

        let engine = Externalizer::new(&source, &subs, &lines, options(dir.path()));
        assert!(engine.check_input(&mut NullProgress).has_fatal());
    }

    #[test]
    fn test_reserved_key_characters_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let (source, mut subs, lines) = fixture(dir.path());
        subs[0].key = "bad=key".to_string();

        let engine = Externalizer::new(&source, &subs, &lines, options(dir.path()));
        let status = engine.check_input(&mut NullProgress);
        assert_eq!(status.severity(), Some(Severity::Error));
        assert!(!status.has_fatal());
    }

    #[test]
    fn test_pattern_without_placeholder_is_warning_only() {
        let dir = tempfile::tempdir().unwrap();
        let (source, subs, lines) = fixture(dir.path());
        let mut opts = options(dir.path());
        opts.code_pattern = Some("Msg.lookup()".to_string());

        let engine = Externalizer::new(&source, &subs, &lines, opts);
        let status = engine.check_input(&mut NullProgress);
        assert!(status.has_warning());
        assert!(!status.has_error());
    }

    #[test]
    fn test_accessor_generated_with_qualified_bundle_name() {
        let dir = tempfile::tempdir().unwrap();
        let (source, subs, lines) = fixture(dir.path());
        let mut opts = options(dir.path());
        opts.create_accessor = true;

        let engine = Externalizer::new(&source, &subs, &lines, opts);
        assert!(engine.will_create_accessor());
        engine.create_change().unwrap().apply().unwrap();

        let accessor = fs::read_to_string(dir.path().join("Messages.java")).unwrap();
        assert!(accessor.contains("package com.example;"));
        assert!(accessor.contains("\"com.example.messages\""));
    }

    #[test]
    fn test_import_added_after_package_declaration() {
        let dir = tempfile::tempdir().unwrap();
        let (source, subs, lines) = fixture(dir.path());
        let mut opts = options(dir.path());
        opts.added_import = Some("com.example.nls.Messages".to_string());

        let engine = Externalizer::new(&source, &subs, &lines, opts);
        assert!(engine.will_add_import());
        engine.create_change().unwrap().apply().unwrap();

        let rewritten = fs::read_to_string(dir.path().join("A.java")).unwrap();
        assert!(rewritten.contains(&format!(
            "package com.example;{LINE_SEPARATOR}import com.example.nls.Messages;"
        )));
    }
}
