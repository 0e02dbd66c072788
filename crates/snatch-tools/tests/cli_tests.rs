//! End-to-end runs of the command-line front end

use pretty_assertions::assert_eq;
use serde_json::json;
use snatch_io::{Fingerprint, JsonIo};
use snatch_test_utils::{
    current_preset, file_names, grain_preset, legacy_preset, read_json, read_text, PresetTree,
};
use snatch_tools::{run, EXIT_FAILURE, EXIT_OK, EXIT_USAGE};
use std::path::Path;

fn run_in(tree: &PresetTree, args: &[&str]) -> (u8, String) {
    let mut argv = vec![
        "snatch-tools".to_string(),
        "--root".to_string(),
        tree.root().display().to_string(),
        "--log-level".to_string(),
        "off".to_string(),
    ];
    argv.extend(args.iter().map(ToString::to_string));
    let mut out = Vec::new();
    let code = run(argv, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

fn arg(path: &Path) -> String {
    path.display().to_string()
}

#[test]
fn test_missing_targets_is_usage_error() {
    let tree = PresetTree::new();
    let legacy = tree.preset("legacy.json", &legacy_preset());
    let before = read_text(&legacy);

    let (code, out) = run_in(&tree, &["migrate-vignette", "--dry-run"]);

    assert_eq!(code, EXIT_USAGE);
    assert!(out.is_empty());
    assert_eq!(read_text(&legacy), before);
}

#[test]
fn test_upgrade_all() {
    let tree = PresetTree::new();
    let legacy = tree.preset("legacy.json", &legacy_preset());
    tree.preset("current.json", &current_preset());
    let grain = tree.custom("grain_soft.json", &grain_preset());

    let (code, out) = run_in(&tree, &["upgrade", "--all"]);

    assert_eq!(code, EXIT_OK);
    assert!(out.ends_with("2 files changed out of 3\n"), "{out}");
    assert_eq!(read_json(&legacy)["version"], json!("2.1"));
    assert_eq!(read_json(&grain)["effects"]["grain"]["downscale"], json!(2.0));
}

#[test]
fn test_dry_run_prints_hint_and_writes_nothing() {
    let tree = PresetTree::new();
    let grain = tree.preset("grain_a.json", &grain_preset());
    let before = read_text(&grain);

    let (code, out) = run_in(&tree, &["grain-downscale", "--all", "--dry-run", "--backup"]);

    assert_eq!(code, EXIT_OK);
    assert!(out.contains("1 files would be changed out of 1"), "{out}");
    assert!(out.contains("rerun without --dry-run"), "{out}");
    assert_eq!(read_text(&grain), before);
    assert_eq!(file_names(&tree.presets_dir()), vec!["grain_a.json"]);
}

#[test]
fn test_grain_all_ignores_other_presets() {
    let tree = PresetTree::new();
    let other = tree.preset("film.json", &grain_preset());
    let before = read_text(&other);

    let (_, out) = run_in(&tree, &["grain-downscale", "--all"]);

    assert!(out.ends_with("0 files changed out of 0\n"), "{out}");
    assert_eq!(read_text(&other), before);
}

#[test]
fn test_explicit_files_with_backup() {
    let tree = PresetTree::new();
    let legacy = tree.preset("legacy.json", &legacy_preset());
    let before = read_text(&legacy);

    let (code, out) = run_in(&tree, &["migrate-vignette", "--backup", &arg(&legacy)]);

    assert_eq!(code, EXIT_OK);
    assert!(out.contains("moved effects.crt.vignette -> effects.color_grade.vignette_strength"));
    assert_eq!(read_text(&tree.presets_dir().join("legacy.bak.json")), before);
    assert_eq!(
        read_json(&legacy)["effects"]["color_grade"],
        json!({"vignette_strength": 0.35, "vignette_width": 0.75})
    );
}

#[test]
fn test_failed_file_still_exits_zero() {
    let tree = PresetTree::new();
    let broken = tree.raw("broken.json", "[1,");
    let missing = tree.presets_dir().join("missing.json");

    let (code, out) = run_in(&tree, &["ensure-vignette", &arg(&broken), &arg(&missing)]);

    assert_eq!(code, EXIT_OK);
    assert!(out.contains("0 files changed out of 2, 2 failed"), "{out}");
}

#[test]
fn test_config_file_sets_dirs_and_backup() {
    let tree = PresetTree::new();
    let config = tree.file("tools.yaml", "preset_dirs:\n  - mods\nbackup: true\n");
    let modded = tree.file("mods/grain_x.json", "{\"effects\": {\"grain\": {}}}");
    let stock = tree.preset("grain_y.json", &grain_preset());

    let (code, _) = run_in(&tree, &["--config", &arg(&config), "grain-downscale", "--all"]);

    assert_eq!(code, EXIT_OK);
    assert_eq!(read_json(&modded), json!({"effects": {"grain": {"downscale": 2.0}}}));
    assert!(tree.root().join("mods/grain_x.bak.json").exists());
    assert!(read_json(&stock)["effects"]["grain"].get("downscale").is_none());
}

#[test]
fn test_bad_config_is_an_error() {
    let tree = PresetTree::new();
    let config = tree.file("tools.json", "{\"preset_dirs\": 3}");
    let mut out = Vec::new();

    let result = run(
        ["snatch-tools", "--config", arg(&config).as_str(), "upgrade", "--all"],
        &mut out,
    );

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("cannot load tool config"));
}

#[test]
fn test_canon_rewrites_once() {
    let tree = PresetTree::new();
    let json_file = tree.raw("b.json", "{\"z\": 1, \"a\": {\"y\": [1, 2], \"x\": null}}");
    let yaml_file = tree.file("conf/settings.yml", "zeta: 1\r\nalpha: two\r\n");

    let (code, out) = run_in(&tree, &["canon", &arg(&json_file), &arg(&yaml_file)]);

    assert_eq!(code, EXIT_OK);
    assert!(out.ends_with("2 files rewritten out of 2\n"), "{out}");
    assert_eq!(
        read_text(&json_file),
        "{\n  \"a\": {\n    \"x\": null,\n    \"y\": [\n      1,\n      2\n    ]\n  },\n  \"z\": 1\n}\n"
    );
    assert_eq!(read_text(&yaml_file), "alpha: two\nzeta: 1\n");

    let (_, again) = run_in(&tree, &["canon", &arg(&json_file), &arg(&yaml_file)]);
    assert!(again.ends_with("0 files rewritten out of 2\n"), "{again}");

    let (_, forced) = run_in(&tree, &["canon", "--force", &arg(&json_file)]);
    assert!(forced.ends_with("1 files rewritten out of 1\n"), "{forced}");
}

#[test]
fn test_canon_reports_unsupported_files() {
    let tree = PresetTree::new();
    let notes = tree.raw("notes.txt", "hello");

    let (code, out) = run_in(&tree, &["canon", &arg(&notes)]);

    assert_eq!(code, EXIT_OK);
    assert!(out.contains("failed"));
    assert_eq!(read_text(&notes), "hello");
}

#[test]
fn test_fingerprint_matches_service() {
    let tree = PresetTree::new();
    let doc = current_preset();
    let path = tree.presets_dir().join("current.json");
    JsonIo::new().save_if_changed(&path, &doc, false).unwrap();
    let canonical = JsonIo::new().canonical(&doc).unwrap();
    let expected = Fingerprint::compute(canonical.as_bytes());

    let (code, out) = run_in(&tree, &["fingerprint", &arg(&path)]);

    assert_eq!(code, EXIT_OK);
    assert_eq!(out, format!("{expected}  {}  canonical\n", path.display()));

    let (ok, _) = run_in(
        &tree,
        &["fingerprint", &arg(&path), "--expect", &expected.to_string()],
    );
    assert_eq!(ok, EXIT_OK);
}

#[test]
fn test_fingerprint_expect_mismatch() {
    let tree = PresetTree::new();
    let path = tree.preset("current.json", &current_preset());
    let wrong = Fingerprint::compute(b"something else");

    let (code, out) = run_in(
        &tree,
        &["fingerprint", &arg(&path), "--expect", &wrong.to_string()],
    );

    assert_eq!(code, EXIT_FAILURE);
    assert!(out.contains("not canonical"), "{out}");
    assert!(out.contains("1 files do not match"), "{out}");
}
