//! `snatch-tools`: shader preset migrations and canonical config rewriting
//!
//! ```text
//! snatch-tools [--root DIR] [--config FILE] [--log-level LEVEL] <COMMAND>
//!
//!   ensure-vignette   [FILES]... | --all  [--dry-run] [--backup]
//!   migrate-vignette  [FILES]... | --all  [--dry-run] [--backup]
//!   grain-downscale   [FILES]... | --all  [--dry-run] [--backup]
//!   upgrade           [FILES]... | --all  [--dry-run] [--backup]
//!   canon             FILES... [--force]
//!   fingerprint       FILES... [--expect HEX]
//! ```
//!
//! Exit status is 0 when a command ran to completion, even if some files
//! failed, 2 on a usage error, and 1 when the tool configuration cannot be
//! loaded (or a `fingerprint --expect` check fails).

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;

use anyhow::{bail, Context as _};
use clap::ArgMatches;
use commands::Context;
use config::ToolsConfig;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

/// Command completed
pub const EXIT_OK: u8 = 0;
/// Configuration could not be loaded, or a check failed
pub const EXIT_FAILURE: u8 = 1;
/// Bad command line
pub const EXIT_USAGE: u8 = 2;

/// Parse `args`, set up logging and run the chosen command
///
/// Report lines go to `out`; logs and usage errors go to stderr.
///
/// # Errors
/// Fails if the tool configuration cannot be loaded, the log level is
/// invalid, or writing to `out` fails.
pub fn run<I, T>(args: I, out: &mut impl Write) -> anyhow::Result<u8>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match cli::build().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(e) => {
            e.print()?;
            return Ok(u8::try_from(e.exit_code()).unwrap_or(EXIT_USAGE));
        }
    };
    let Some((name, sub)) = matches.subcommand() else {
        bail!("no command given");
    };

    let config = load_config(sub)?;
    let level = sub
        .get_one::<String>("log-level")
        .map_or(config.log_level.as_str(), String::as_str);
    logging::init(level)?;

    let ctx = Context {
        root: sub
            .get_one::<PathBuf>("root")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(".")),
        config,
    };
    tracing::debug!(command = name, root = %ctx.root.display(), "starting");

    match name {
        "canon" => commands::canon(sub, out),
        "fingerprint" => commands::fingerprint(sub, out),
        other => match cli::migration_kind(other) {
            Some(kind) => commands::migrate(kind, sub, &ctx, out),
            None => bail!("unknown command '{other}'"),
        },
    }
}

fn load_config(args: &ArgMatches) -> anyhow::Result<ToolsConfig> {
    match args.get_one::<PathBuf>("config") {
        Some(path) => ToolsConfig::load(path)
            .with_context(|| format!("cannot load tool config {}", path.display())),
        None => Ok(ToolsConfig::default()),
    }
}
