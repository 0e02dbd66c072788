//! Subcommand implementations
//!
//! Each command writes its human-readable report to `out` and returns the
//! process exit code. Per-file failures are reported and skipped.

use crate::config::ToolsConfig;
use crate::{EXIT_FAILURE, EXIT_OK};
use clap::ArgMatches;
use snatch_io::{Codec, Fingerprint, Format, JsonIo, StableIo, YamlIo};
use snatch_preset::{discover, BatchOptions, BatchRunner, MigrationKind};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Resolved global options
#[derive(Debug, Clone)]
pub struct Context {
    /// Game root
    pub root: PathBuf,
    /// Loaded or default tool config
    pub config: ToolsConfig,
}

fn files(args: &ArgMatches) -> Vec<PathBuf> {
    args.get_many::<PathBuf>("files")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

/// Run a migration over the named files or every candidate
///
/// # Errors
/// Fails only if the report cannot be written to `out`.
pub fn migrate(
    kind: MigrationKind,
    args: &ArgMatches,
    ctx: &Context,
    out: &mut impl Write,
) -> anyhow::Result<u8> {
    let migration = kind.build();
    let options = BatchOptions {
        dry_run: args.get_flag("dry-run"),
        backup: args.get_flag("backup") || ctx.config.backup,
    };

    let targets = if args.get_flag("all") {
        let dirs = ctx.config.preset_dirs_under(&ctx.root);
        let found = discover(&dirs, migration.as_ref());
        if found.is_empty() {
            warn!(root = %ctx.root.display(), "no candidate presets found");
        }
        found
    } else {
        files(args)
    };

    let report = BatchRunner::new(options).run(migration.as_ref(), &targets);

    for file in &report.files {
        writeln!(out, "{file}")?;
    }
    writeln!(out, "{}", report.summary())?;
    if report.dry_run && report.changed() > 0 {
        writeln!(out, "dry run: nothing written, rerun without --dry-run to apply")?;
    }
    Ok(EXIT_OK)
}

/// Rewrite files in canonical form
///
/// # Errors
/// Fails only if the report cannot be written to `out`.
pub fn canon(args: &ArgMatches, out: &mut impl Write) -> anyhow::Result<u8> {
    let force = args.get_flag("force");
    let mut json = JsonIo::new();
    let mut yaml = YamlIo::new();
    let mut rewritten = 0usize;
    let targets = files(args);

    for path in &targets {
        let line = match Format::from_path(path) {
            Some(Format::Json) => canon_file(&mut json, path, force),
            Some(Format::Yaml) => canon_file(&mut yaml, path, force),
            None => CanonLine::Failed("not a .json, .yaml or .yml file".to_string()),
        };
        if matches!(line, CanonLine::Rewritten) {
            rewritten += 1;
        }
        writeln!(out, "{}", line.render(path))?;
    }

    writeln!(out, "{rewritten} files rewritten out of {}", targets.len())?;
    Ok(EXIT_OK)
}

enum CanonLine {
    Rewritten,
    Canonical,
    Failed(String),
}

impl CanonLine {
    fn render(&self, path: &Path) -> String {
        let path = path.display();
        match self {
            Self::Rewritten => format!("rewrote   {path}"),
            Self::Canonical => format!("canonical {path}"),
            Self::Failed(reason) => format!("failed    {path}: {reason}"),
        }
    }
}

fn canon_file<C: Codec>(io: &mut StableIo<C>, path: &Path, force: bool) -> CanonLine {
    let document = match io.load(path) {
        Ok(Some(document)) => document,
        Ok(None) => return CanonLine::Failed("file not found".to_string()),
        Err(e) => return CanonLine::Failed(e.to_string()),
    };
    match io.save_if_changed(path, &document, force) {
        Ok(true) => CanonLine::Rewritten,
        Ok(false) => CanonLine::Canonical,
        Err(e) => CanonLine::Failed(e.to_string()),
    }
}

/// Print the canonical fingerprint of each file
///
/// Returns [`EXIT_FAILURE`] when `--expect` was given and any file fails
/// to load or does not match it.
///
/// # Errors
/// Fails only if the report cannot be written to `out`.
pub fn fingerprint(args: &ArgMatches, out: &mut impl Write) -> anyhow::Result<u8> {
    let expected = args.get_one::<Fingerprint>("expect").copied();
    let mut json = JsonIo::new();
    let mut yaml = YamlIo::new();
    let mut mismatches = 0usize;

    for path in files(args) {
        let result = match Format::from_path(&path) {
            Some(Format::Json) => fingerprint_file(&mut json, &path),
            Some(Format::Yaml) => fingerprint_file(&mut yaml, &path),
            None => Err("not a .json, .yaml or .yml file".to_string()),
        };
        match result {
            Ok((fingerprint, canonical)) => {
                let state = if canonical { "canonical" } else { "not canonical" };
                writeln!(out, "{fingerprint}  {}  {state}", path.display())?;
                if expected.is_some_and(|want| want != fingerprint) {
                    mismatches += 1;
                }
            }
            Err(reason) => {
                writeln!(out, "failed  {}: {reason}", path.display())?;
                mismatches += 1;
            }
        }
    }

    match expected {
        Some(want) if mismatches > 0 => {
            info!(expected = %want, mismatches, "fingerprint check failed");
            writeln!(out, "{mismatches} files do not match {want}")?;
            Ok(EXIT_FAILURE)
        }
        _ => Ok(EXIT_OK),
    }
}

/// Canonical fingerprint and whether the bytes on disk already match it
fn fingerprint_file<C: Codec>(
    io: &mut StableIo<C>,
    path: &Path,
) -> Result<(Fingerprint, bool), String> {
    let document = io
        .load(path)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "file not found".to_string())?;
    let text = io.canonical(&document).map_err(|e| e.to_string())?;
    let fingerprint = Fingerprint::compute(text.as_bytes());
    Ok((fingerprint, io.fingerprint_of(path) == Some(fingerprint)))
}
