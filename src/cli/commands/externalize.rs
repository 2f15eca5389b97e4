//! Externalize command - rewrite the source, the bundle and the accessor.
//!
//! Runs the full validation pipeline first; any Error-or-above finding
//! blocks the commit. Dry-run by default, `--apply` writes the composite
//! change all-or-nothing.

use anyhow::Result;
use colored::Colorize;

use super::super::{args::ExternalizeCommand, exit_status::ExitStatus};
use super::helper::prepare;
use crate::engine::Externalizer;
use crate::progress::NullProgress;
use crate::reporter::{self, SUCCESS_MARK};

pub fn externalize(cmd: ExternalizeCommand) -> Result<ExitStatus> {
    let prepared = prepare(&cmd.args)?;
    let engine = Externalizer::new(
        &prepared.source,
        &prepared.subs,
        &prepared.lines,
        prepared.options,
    );

    let mut status = engine.check_activation();
    if !status.has_fatal() {
        status.merge(engine.check_input(&mut NullProgress));
    }
    reporter::print_status(&status);

    if status.has_error() {
        println!("{}", "not externalizing, fix the problems above first".red());
        return Ok(ExitStatus::Failure);
    }

    let change = engine.create_change()?;
    if cmd.apply {
        change.apply()?;
        println!(
            "{} externalized {} string(s) from {}",
            SUCCESS_MARK.green(),
            prepared
                .subs
                .iter()
                .filter(|s| s.task == crate::model::Task::Translate)
                .count(),
            cmd.args.file.display()
        );
    } else {
        reporter::print_change(&change);
        println!("{}", "dry run, pass --apply to modify files".dimmed());
    }
    Ok(ExitStatus::Success)
}
