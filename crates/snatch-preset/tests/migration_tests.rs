//! Migration scenarios and idempotence properties

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use snatch_io::{Document, Map};
use snatch_preset::{
    standard_chain, AddGrainDownscale, EnsureVignetteDefaults, Migration, RelocateCrtVignette,
};

#[test]
fn test_relocate_scenario() {
    let (doc, changed) = RelocateCrtVignette
        .migrate(json!({"effects": {"crt": {"vignette": 0.3, "vignette_width": 0.9}}}));

    assert!(changed);
    assert_eq!(
        doc,
        json!({
            "effects": {
                "crt": {},
                "color_grade": {"vignette_strength": 0.3, "vignette_width": 0.9}
            },
            "version": "2.1"
        })
    );
}

#[test]
fn test_ensure_defaults_scenario() {
    let (doc, changed) = EnsureVignetteDefaults.migrate(json!({"version": "2.0"}));

    assert!(changed);
    assert_eq!(
        doc,
        json!({
            "version": "2.1",
            "effects": {"color_grade": {
                "vignette_strength": 0.25,
                "vignette_width": 0.8,
                "vignette_feather": 0.2
            }}
        })
    );
}

#[test]
fn test_grain_scenario() {
    let (doc, changed) = AddGrainDownscale.migrate(json!({"effects": {"grain": {"intensity": 0.5}}}));

    assert!(changed);
    assert_eq!(doc, json!({"effects": {"grain": {"intensity": 0.5, "downscale": 2.0}}}));
}

#[test]
fn test_relocate_without_effects() {
    for original in [json!({}), json!({"version": "1.0"}), json!({"name": "x", "passes": [1, 2]})] {
        let (doc, changed) = RelocateCrtVignette.migrate(original.clone());
        assert!(!changed);
        assert_eq!(doc, original);
    }
}

#[test]
fn test_unrelated_fields_survive_upgrade() {
    let original = json!({
        "version": "2.0",
        "name": "neon",
        "passes": ["bloom", "crt"],
        "effects": {
            "crt": {"vignette": 0.2, "scanlines": 0.6},
            "bloom": {"threshold": 0.7}
        }
    });

    let (doc, _) = standard_chain().migrate(original);

    assert_eq!(doc["name"], json!("neon"));
    assert_eq!(doc["passes"], json!(["bloom", "crt"]));
    assert_eq!(doc["effects"]["bloom"], json!({"threshold": 0.7}));
    assert_eq!(doc["effects"]["crt"], json!({"scanlines": 0.6}));
}

fn maybe(entries: Vec<(&'static str, Option<Document>)>) -> Document {
    Document::Object(
        entries
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
            .collect::<Map>(),
    )
}

fn junk() -> impl Strategy<Value = Document> {
    prop_oneof![
        Just(Document::Null),
        any::<bool>().prop_map(Document::from),
        (0..100i64).prop_map(Document::from),
        "[a-z]{0,4}".prop_map(Document::from),
        Just(json!([0.1, 0.2])),
    ]
}

fn scalar() -> impl Strategy<Value = Document> {
    (0..100u32).prop_map(|n| Document::from(f64::from(n) / 100.0))
}

fn section(keys: &'static [&'static str]) -> impl Strategy<Value = Option<Document>> {
    let object = proptest::collection::vec(proptest::option::of(scalar()), keys.len()).prop_map(
        move |values| maybe(keys.iter().copied().zip(values).collect()),
    );
    proptest::option::of(prop_oneof![4 => object, 1 => junk()])
}

/// Preset-shaped documents, including the odd shapes found in the wild
fn preset() -> impl Strategy<Value = Document> {
    let version = proptest::option::of(prop_oneof![
        Just(json!("2.0")),
        Just(json!("2.1")),
        Just(json!("1.4")),
        Just(json!("3")),
        Just(json!(2.0)),
        Just(json!("beta")),
    ]);
    let effects = (
        section(&["vignette", "vignette_width", "vignette_feather", "curvature"]),
        section(&["vignette_strength", "vignette_width", "vignette_feather", "contrast"]),
        section(&["intensity", "downscale"]),
    )
        .prop_map(|(crt, grade, grain)| {
            maybe(vec![("crt", crt), ("color_grade", grade), ("grain", grain)])
        });
    let effects = proptest::option::of(prop_oneof![4 => effects, 1 => junk()]);
    (version, effects).prop_map(|(version, effects)| {
        maybe(vec![("version", version), ("effects", effects), ("name", Some(json!("p")))])
    })
}

fn assert_idempotent(migration: &dyn Migration, doc: Document) -> Result<(), TestCaseError> {
    let (once, _) = migration.migrate(doc);
    let (twice, changed) = migration.migrate(once.clone());
    prop_assert!(!changed, "{} changed twice: {}", migration.name(), once);
    prop_assert_eq!(once, twice);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_relocate_idempotent(doc in preset()) {
        assert_idempotent(&RelocateCrtVignette, doc)?;
    }

    #[test]
    fn prop_ensure_defaults_idempotent(doc in preset()) {
        assert_idempotent(&EnsureVignetteDefaults, doc)?;
    }

    #[test]
    fn prop_grain_idempotent(doc in preset()) {
        assert_idempotent(&AddGrainDownscale, doc)?;
    }

    #[test]
    fn prop_chain_idempotent(doc in preset()) {
        assert_idempotent(&standard_chain(), doc)?;
    }

    #[test]
    fn prop_unchanged_means_untouched(doc in preset()) {
        for migration in [
            Box::new(RelocateCrtVignette) as Box<dyn Migration>,
            Box::new(EnsureVignetteDefaults),
            Box::new(AddGrainDownscale),
        ] {
            let mut edited = doc.clone();
            let report = migration.apply(&mut edited);
            if !report.changed() {
                prop_assert_eq!(&edited, &doc);
            }
        }
    }
}
