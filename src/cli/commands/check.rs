//! Check command - validate an externalization pass without mutating.

use anyhow::Result;

use super::super::{args::CheckCommand, exit_status::ExitStatus};
use super::helper::prepare;
use crate::engine::Externalizer;
use crate::progress::NullProgress;
use crate::reporter;
use crate::status::Severity;

pub fn check(cmd: CheckCommand) -> Result<ExitStatus> {
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

    if status.severity() > Some(Severity::Warning) {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}
