//! Status report printing.
//!
//! Kept separate from the engine so the library stays free of printing
//! side effects.

use colored::Colorize;

use crate::edits::{Change, CompositeChange};
use crate::status::{Severity, Status};

/// Success mark for consistent output formatting
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓
/// Failure mark for consistent output formatting
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Prints each status entry with a colored severity prefix, then a
/// one-line summary.
pub fn print_status(status: &Status) {
    for entry in status.entries() {
        let severity = match entry.severity {
            Severity::Info => "info".bold().blue(),
            Severity::Warning => "warning".bold().yellow(),
            Severity::Error => "error".bold().red(),
            Severity::Fatal => "fatal".bold().red(),
        };
        println!("{}: {}", severity, entry.message);
    }

    let errors = status
        .entries()
        .iter()
        .filter(|e| e.severity >= Severity::Error)
        .count();
    let warnings = status
        .entries()
        .iter()
        .filter(|e| e.severity == Severity::Warning)
        .count();
    if errors == 0 && warnings == 0 {
        println!("{} no problems found", SUCCESS_MARK.green());
    } else {
        println!(
            "{} {} error(s), {} warning(s)",
            if errors > 0 {
                FAILURE_MARK.red()
            } else {
                SUCCESS_MARK.green()
            },
            errors,
            warnings
        );
    }
}

/// Prints the dry-run preview of a composite change.
pub fn print_change(change: &CompositeChange) {
    if change.is_empty() {
        println!("nothing to change");
        return;
    }
    println!("{}:", change.name);
    for file_change in change.changes() {
        match file_change {
            Change::EditFile { path, edits } => {
                println!("  {} {}", "edit".cyan(), path.display());
                for edit in edits {
                    println!("    - {}", edit.name.dimmed());
                }
            }
            Change::WriteFile { path, content } => {
                let verb = if path.exists() { "write" } else { "create" };
                println!(
                    "  {} {} ({} bytes)",
                    verb.cyan(),
                    path.display(),
                    content.len()
                );
            }
        }
    }
}
