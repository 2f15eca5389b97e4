//! Shared setup for the file-oriented commands.

use std::path::Path;

use anyhow::Result;

use super::super::args::CommonArgs;
use crate::config::Config;
use crate::engine::Options;
use crate::model::{LiteralLine, Substitution};
use crate::scan;
use crate::source::SourceFile;

/// Everything a command needs to run the engine over one file.
pub struct Prepared {
    pub source: SourceFile,
    pub subs: Vec<Substitution>,
    pub lines: Vec<LiteralLine>,
    pub options: Options,
}

/// Opens and scans the source file, builds the substitutions and merges
/// config-file options with CLI overrides.
pub fn prepare(args: &CommonArgs) -> Result<Prepared> {
    let source = SourceFile::open(&args.file)?;
    let scanned = scan::scan(source.text())?;

    let key_prefix = args
        .key_prefix
        .clone()
        .unwrap_or_else(|| source.type_name().to_string());
    let subs = scan::build_substitutions(&scanned, &key_prefix);

    let config = Config::load(Path::new("."))?;
    let mut options = config.to_options();
    if let Some(pattern) = &args.pattern {
        options.code_pattern = Some(pattern.clone());
    }
    if let Some(name) = &args.accessor_name {
        options.accessor_name = name.clone();
    }
    if let Some(bundle) = &args.bundle {
        options.property_path = Some(bundle.clone());
    }
    if let Some(import) = &args.add_import {
        options.added_import = Some(import.clone());
    }
    if args.no_accessor {
        options.create_accessor = false;
    }

    Ok(Prepared {
        source,
        subs,
        lines: scanned.lines,
        options,
    })
}
