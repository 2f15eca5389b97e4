//! Propex - string-literal externalization for Java sources
//!
//! Propex is a CLI tool and library that rewrites hardcoded string
//! literals into lookups against a `.properties` resource bundle, appends
//! the corresponding `key=value` entries to the bundle, and can generate a
//! `Messages`-style accessor class with a safe `!key!` fallback. The three
//! outputs are built as one composite change and applied all-or-nothing.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `engine`: Validation pipeline and change orchestration
//! - `model`: Substitutions, literals and per-line grouping
//! - `conflicts`: Duplicate-key and already-defined-key resolution
//! - `properties`: Property-bundle read/write path
//! - `rewrite`: Source edit computation
//! - `accessor`: Accessor class generation
//! - `tags`: NON-NLS tag markers
//! - `scan`: tree-sitter based literal scanner
//! - `edits`: Text edits and composite changes
//! - `source`: Per-file source model
//! - `reporter`: Colored status output

pub mod accessor;
pub mod cli;
pub mod config;
pub mod conflicts;
pub mod edits;
pub mod engine;
pub mod model;
pub mod progress;
pub mod properties;
pub mod reporter;
pub mod rewrite;
pub mod scan;
pub mod source;
pub mod status;
pub mod tags;
