//! Init command - write a default configuration file.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use super::super::exit_status::ExitStatus;
use crate::config::{CONFIG_FILE_NAME, Config};
use crate::reporter::SUCCESS_MARK;

pub fn init() -> Result<ExitStatus> {
    Config::write_default(Path::new("."))?;
    println!("{} created {}", SUCCESS_MARK.green(), CONFIG_FILE_NAME);
    Ok(ExitStatus::Success)
}
