//! Command-line definition

use clap::{value_parser, Arg, ArgAction, ArgGroup, Command};
use snatch_io::Fingerprint;
use snatch_preset::MigrationKind;
use std::path::PathBuf;

/// Binary name
pub const NAME: &str = "snatch-tools";

/// Migration subcommands and what they run
pub const MIGRATION_COMMANDS: [(&str, MigrationKind); 4] = [
    ("ensure-vignette", MigrationKind::EnsureVignette),
    ("migrate-vignette", MigrationKind::RelocateVignette),
    ("grain-downscale", MigrationKind::GrainDownscale),
    ("upgrade", MigrationKind::Upgrade),
];

/// Migration run by a subcommand, if it is a migration subcommand
#[must_use]
pub fn migration_kind(name: &str) -> Option<MigrationKind> {
    MIGRATION_COMMANDS
        .iter()
        .find(|(command, _)| *command == name)
        .map(|(_, kind)| *kind)
}

/// Build the full command
#[must_use]
pub fn build() -> Command {
    Command::new(NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Shader preset migrations and canonical JSON/YAML rewriting")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("root")
                .long("root")
                .global(true)
                .value_name("DIR")
                .default_value(".")
                .value_parser(value_parser!(PathBuf))
                .help("Game root the preset directories are relative to"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Tool configuration (JSON or YAML)"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .value_name("LEVEL")
                .help("Log level when RUST_LOG is unset [default: info]"),
        )
        .subcommand(migration(
            "ensure-vignette",
            "Fill missing color-grade vignette fields",
        ))
        .subcommand(migration(
            "migrate-vignette",
            "Move the legacy CRT vignette to color grading",
        ))
        .subcommand(migration(
            "grain-downscale",
            "Add downscale to film grain presets (grain_*.json)",
        ))
        .subcommand(migration(
            "upgrade",
            "Run every preset migration in order",
        ))
        .subcommand(
            Command::new("canon")
                .about("Rewrite JSON/YAML files in canonical form")
                .arg(files().required(true))
                .arg(
                    Arg::new("force")
                        .long("force")
                        .action(ArgAction::SetTrue)
                        .help("Write even when the file is already canonical"),
                ),
        )
        .subcommand(
            Command::new("fingerprint")
                .about("Print the SHA-256 of each file's canonical form")
                .arg(files().required(true))
                .arg(
                    Arg::new("expect")
                        .long("expect")
                        .value_name("HEX")
                        .value_parser(value_parser!(Fingerprint))
                        .help("Fail unless every file has this fingerprint"),
                ),
        )
}

fn files() -> Arg {
    Arg::new("files")
        .value_name("FILES")
        .num_args(1..)
        .value_parser(value_parser!(PathBuf))
        .help("Files to process")
}

fn migration(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(files())
        .arg(
            Arg::new("all")
                .long("all")
                .action(ArgAction::SetTrue)
                .help("Process every candidate in the preset directories"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Report changes without writing"),
        )
        .arg(
            Arg::new("backup")
                .long("backup")
                .action(ArgAction::SetTrue)
                .help("Copy each file to NAME.bak.EXT before overwriting"),
        )
        .group(
            ArgGroup::new("targets")
                .args(["files", "all"])
                .required(true),
        )
}
