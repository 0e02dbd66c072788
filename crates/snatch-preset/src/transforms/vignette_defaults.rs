//! Ensure the color-grade vignette fields exist
//!
//! Fills `effects.color_grade.{vignette_strength, vignette_width,
//! vignette_feather}` with defaults when missing, and bumps `version` from
//! `2.0` to `2.1`.

use crate::migration::Migration;
use crate::report::{Edit, MigrationReport};
use crate::schema::{
    dotted, object_or_insert, shape, Shape, COLOR_GRADE, EFFECTS, VERSION_2_0, VERSION_2_1,
    VERSION_KEY,
};
use snatch_io::Document;

/// Defaults for the color-grade vignette, in insertion order
pub const VIGNETTE_DEFAULTS: [(&str, f64); 3] = [
    ("vignette_strength", 0.25),
    ("vignette_width", 0.8),
    ("vignette_feather", 0.2),
];

/// Add missing color-grade vignette fields and bump `2.0` to `2.1`
#[derive(Debug, Clone, Copy, Default)]
pub struct EnsureVignetteDefaults;

impl Migration for EnsureVignetteDefaults {
    fn name(&self) -> &'static str {
        "ensure-vignette-defaults"
    }

    fn apply(&self, document: &mut Document) -> MigrationReport {
        let Some(root) = document.as_object_mut() else {
            return MigrationReport::skipped("document is not an object");
        };

        // Check every level before touching anything.
        let effects_shape = shape(root, EFFECTS);
        if effects_shape == Shape::NotObject {
            return MigrationReport::skipped("effects is not an object");
        }
        let grade_shape = match root.get(EFFECTS).and_then(Document::as_object) {
            Some(effects) => shape(effects, COLOR_GRADE),
            None => Shape::Absent,
        };
        if grade_shape == Shape::NotObject {
            return MigrationReport::skipped("effects.color_grade is not an object");
        }

        let mut report = MigrationReport::new();
        if effects_shape == Shape::Absent {
            report.push(Edit::CreatedSection {
                path: EFFECTS.to_string(),
            });
        }
        if grade_shape == Shape::Absent {
            report.push(Edit::CreatedSection {
                path: dotted(&[EFFECTS, COLOR_GRADE]),
            });
        }

        if let Some(grade) =
            object_or_insert(root, EFFECTS).and_then(|effects| object_or_insert(effects, COLOR_GRADE))
        {
            for (key, default) in VIGNETTE_DEFAULTS {
                if !grade.contains_key(key) {
                    grade.insert(key.to_string(), Document::from(default));
                    report.push(Edit::Inserted {
                        path: dotted(&[EFFECTS, COLOR_GRADE, key]),
                        value: Document::from(default),
                    });
                }
            }
        }

        if root.get(VERSION_KEY).and_then(Document::as_str) == Some(VERSION_2_0) {
            root.insert(VERSION_KEY.to_string(), Document::from(VERSION_2_1));
            report.push(Edit::Version {
                from: Some(VERSION_2_0.to_string()),
                to: VERSION_2_1.to_string(),
            });
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn fills_everything_from_version_only() {
        let (doc, changed) = EnsureVignetteDefaults.migrate(json!({"version": "2.0"}));

        assert!(changed);
        assert_eq!(
            doc,
            json!({
                "version": "2.1",
                "effects": {
                    "color_grade": {
                        "vignette_strength": 0.25,
                        "vignette_width": 0.8,
                        "vignette_feather": 0.2
                    }
                }
            })
        );
    }

    #[test]
    fn keeps_existing_values() {
        let mut doc = json!({
            "version": "2.1",
            "effects": {"color_grade": {"vignette_strength": 0.9, "saturation": 1.1}}
        });

        let report = EnsureVignetteDefaults.apply(&mut doc);

        assert_eq!(report.edits().len(), 2);
        assert_eq!(doc["effects"]["color_grade"]["vignette_strength"], json!(0.9));
        assert_eq!(doc["effects"]["color_grade"]["saturation"], json!(1.1));
        assert_eq!(doc["effects"]["color_grade"]["vignette_feather"], json!(0.2));
        assert_eq!(doc["version"], json!("2.1"));
    }

    #[test]
    fn complete_preset_is_unchanged() {
        let original = json!({
            "version": "2.1",
            "effects": {"color_grade": {
                "vignette_strength": 0.3,
                "vignette_width": 0.7,
                "vignette_feather": 0.1
            }}
        });

        let (doc, changed) = EnsureVignetteDefaults.migrate(original.clone());

        assert!(!changed);
        assert_eq!(doc, original);
    }

    #[test]
    fn only_version_bump() {
        let mut doc = json!({
            "version": "2.0",
            "effects": {"color_grade": {
                "vignette_strength": 0.3,
                "vignette_width": 0.7,
                "vignette_feather": 0.1
            }}
        });

        let report = EnsureVignetteDefaults.apply(&mut doc);

        assert_eq!(
            report.edits(),
            &[Edit::Version {
                from: Some("2.0".into()),
                to: "2.1".into()
            }]
        );
    }

    #[test]
    fn other_versions_are_left_alone() {
        let (doc, _) = EnsureVignetteDefaults.migrate(json!({"version": "1.5"}));
        assert_eq!(doc["version"], json!("1.5"));
    }

    #[test]
    fn unexpected_shapes_are_skipped() {
        for original in [
            json!([1, 2]),
            json!({"effects": "none"}),
            json!({"effects": {"color_grade": [0.25]}, "version": "2.0"}),
        ] {
            let mut doc = original.clone();
            let report = EnsureVignetteDefaults.apply(&mut doc);
            assert!(!report.changed());
            assert!(report.skip_reason().is_some());
            assert_eq!(doc, original);
        }
    }

    #[test]
    fn idempotent() {
        let (once, first) = EnsureVignetteDefaults.migrate(json!({"effects": {"crt": {}}}));
        let (twice, second) = EnsureVignetteDefaults.migrate(once.clone());
        assert!(first);
        assert!(!second);
        assert_eq!(once, twice);
    }
}
