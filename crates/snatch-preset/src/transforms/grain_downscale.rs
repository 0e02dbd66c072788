//! Add `downscale` to film grain presets

use crate::backup::is_backup;
use crate::migration::Migration;
use crate::report::{Edit, MigrationReport};
use crate::schema::{dotted, object_mut, EFFECTS, GRAIN};
use snatch_io::{Document, Format};
use std::path::Path;

/// Key added to `effects.grain`
pub const DOWNSCALE_KEY: &str = "downscale";
/// Value it is set to
pub const DEFAULT_DOWNSCALE: f64 = 2.0;

/// File name prefix of grain presets
const GRAIN_PREFIX: &str = "grain_";

/// Set `effects.grain.downscale` to `2.0` where it is missing
///
/// Only presets whose file name starts with `grain_` are candidates in a
/// directory scan. An existing `downscale` is never overwritten.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddGrainDownscale;

impl Migration for AddGrainDownscale {
    fn name(&self) -> &'static str {
        "grain-downscale"
    }

    fn apply(&self, document: &mut Document) -> MigrationReport {
        let Some(grain) = document
            .as_object_mut()
            .and_then(|root| object_mut(root, EFFECTS))
            .and_then(|effects| object_mut(effects, GRAIN))
        else {
            return MigrationReport::skipped("no grain block");
        };
        if grain.contains_key(DOWNSCALE_KEY) {
            return MigrationReport::skipped("already has downscale");
        }

        grain.insert(DOWNSCALE_KEY.to_string(), Document::from(DEFAULT_DOWNSCALE));
        let mut report = MigrationReport::new();
        report.push(Edit::Inserted {
            path: dotted(&[EFFECTS, GRAIN, DOWNSCALE_KEY]),
            value: Document::from(DEFAULT_DOWNSCALE),
        });
        report
    }

    fn selects(&self, path: &Path) -> bool {
        let named_grain = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(GRAIN_PREFIX));
        named_grain && Format::from_path(path) == Some(Format::Json) && !is_backup(path)
    }
}
