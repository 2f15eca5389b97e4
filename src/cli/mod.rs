//! Command-line interface layer.

use anyhow::Result;

mod args;
mod commands;
mod exit_status;

pub use args::{Arguments, CheckCommand, Command, CommonArgs, ExternalizeCommand};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    match args.command {
        Command::Check(cmd) => commands::check(cmd),
        Command::Externalize(cmd) => commands::externalize(cmd),
        Command::Init => commands::init(),
    }
}
