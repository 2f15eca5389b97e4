//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: validate an externalization pass without touching anything
//! - `externalize`: rewrite the source, append to the bundle and generate
//!   the accessor class (dry-run unless `--apply`)
//! - `init`: write a default `.propexrc.json`

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate the externalization of one source file
    Check(CheckCommand),
    /// Externalize the string literals of one source file
    Externalize(ExternalizeCommand),
    /// Initialize a propex configuration file
    Init,
}

/// Arguments shared by `check` and `externalize`.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Source file to externalize
    pub file: PathBuf,

    /// Replacement pattern, e.g. "Messages.getString(${key})"
    #[arg(long)]
    pub pattern: Option<String>,

    /// Name of the generated accessor class (overrides config file)
    #[arg(long)]
    pub accessor_name: Option<String>,

    /// Property bundle path (default: next to the source file)
    #[arg(long)]
    pub bundle: Option<PathBuf>,

    /// Prefix for generated keys (default: the source file name)
    #[arg(long)]
    pub key_prefix: Option<String>,

    /// Import declaration to add to the rewritten source
    #[arg(long)]
    pub add_import: Option<String>,

    /// Do not generate the accessor class
    #[arg(long)]
    pub no_accessor: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub args: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ExternalizeCommand {
    #[command(flatten)]
    pub args: CommonArgs,

    /// Actually modify files (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}
