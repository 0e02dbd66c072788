//! Move the vignette from the CRT block to color grading
//!
//! Presets before `2.1` kept the vignette under `effects.crt`. This moves
//! those keys to `effects.color_grade` and sets `version` to `2.1`.
//! Presets whose version reads as a number of at least `2.1` are never
//! touched; a missing or non-numeric version counts as older.

use crate::migration::Migration;
use crate::report::{Edit, MigrationReport};
use crate::schema::{
    dotted, object, object_mut, shape, Shape, COLOR_GRADE, CRT, EFFECTS, VERSION_2_1, VERSION_KEY,
};
use crate::version::PresetVersion;
use snatch_io::{Document, Map};

/// Legacy `crt` key and the `color_grade` key it moves to
pub const LEGACY_VIGNETTE_KEYS: [(&str, &str); 3] = [
    ("vignette", "vignette_strength"),
    ("vignette_width", "vignette_width"),
    ("vignette_feather", "vignette_feather"),
];

/// Relocate legacy `crt` vignette keys under `color_grade`
#[derive(Debug, Clone, Copy, Default)]
pub struct RelocateCrtVignette;

impl Migration for RelocateCrtVignette {
    fn name(&self) -> &'static str {
        "relocate-crt-vignette"
    }

    fn apply(&self, document: &mut Document) -> MigrationReport {
        if PresetVersion::VIGNETTE_RELOCATED.reached_by(document) {
            return MigrationReport::skipped("version is 2.1 or later");
        }

        let Some(root) = document.as_object_mut() else {
            return MigrationReport::skipped("document is not an object");
        };
        let previous_version = root
            .get(VERSION_KEY)
            .and_then(Document::as_str)
            .map(ToString::to_string);
        let Some(effects) = object_mut(root, EFFECTS) else {
            return MigrationReport::skipped("no effects object");
        };
        let has_legacy = object(effects, CRT)
            .is_some_and(|crt| LEGACY_VIGNETTE_KEYS.iter().any(|(key, _)| crt.contains_key(*key)));
        if !has_legacy {
            return MigrationReport::skipped("no legacy vignette keys in crt");
        }

        let mut report = MigrationReport::new();
        match shape(effects, COLOR_GRADE) {
            Shape::Object => {}
            Shape::Absent => report.push(Edit::CreatedSection {
                path: dotted(&[EFFECTS, COLOR_GRADE]),
            }),
            Shape::NotObject => report.push(Edit::ReplacedSection {
                path: dotted(&[EFFECTS, COLOR_GRADE]),
            }),
        }
        if !matches!(effects.get(COLOR_GRADE), Some(Document::Object(_))) {
            effects.insert(COLOR_GRADE.to_string(), Document::Object(Map::new()));
        }

        let mut moved = Vec::new();
        if let Some(crt) = object_mut(effects, CRT) {
            for (from, to) in LEGACY_VIGNETTE_KEYS {
                if let Some(value) = crt.remove(from) {
                    moved.push((from, to, value));
                }
            }
        }
        if let Some(grade) = object_mut(effects, COLOR_GRADE) {
            for (from, to, value) in moved {
                grade.insert(to.to_string(), value);
                report.push(Edit::Moved {
                    from: dotted(&[EFFECTS, CRT, from]),
                    to: dotted(&[EFFECTS, COLOR_GRADE, to]),
                });
            }
        }

        root.insert(VERSION_KEY.to_string(), Document::from(VERSION_2_1));
        report.push(Edit::Version {
            from: previous_version,
            to: VERSION_2_1.to_string(),
        });
        report
    }
}
