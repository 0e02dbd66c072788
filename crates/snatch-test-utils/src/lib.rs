//! Testing utilities for the snatch tools workspace
//!
//! Shared fixtures: a throwaway game root with both shader preset
//! directories, and a few canned preset documents.

#![allow(missing_docs)]

use serde_json::json;
use snatch_io::Document;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PRESETS_DIR: &str = "game/json/presets/shaders";
pub const CUSTOM_DIR: &str = "game/json/custom/shaders";

/// Temporary game root with both shader directories created
#[derive(Debug)]
pub struct PresetTree {
    root: TempDir,
}

impl PresetTree {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join(PRESETS_DIR)).unwrap();
        fs::create_dir_all(root.path().join(CUSTOM_DIR)).unwrap();
        Self { root }
    }

    /// Game root with no shader directories at all
    pub fn empty() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn presets_dir(&self) -> PathBuf {
        self.root().join(PRESETS_DIR)
    }

    pub fn custom_dir(&self) -> PathBuf {
        self.root().join(CUSTOM_DIR)
    }

    pub fn dirs(&self) -> Vec<PathBuf> {
        vec![self.presets_dir(), self.custom_dir()]
    }

    /// Write `document` as pretty JSON (not canonical) under the presets dir
    pub fn preset(&self, name: &str, document: &Document) -> PathBuf {
        let path = self.presets_dir().join(name);
        fs::write(&path, serde_json::to_string_pretty(document).unwrap()).unwrap();
        path
    }

    /// Write `document` under the custom dir
    pub fn custom(&self, name: &str, document: &Document) -> PathBuf {
        let path = self.custom_dir().join(name);
        fs::write(&path, serde_json::to_string_pretty(document).unwrap()).unwrap();
        path
    }

    /// Write raw text under the presets dir
    pub fn raw(&self, name: &str, text: &str) -> PathBuf {
        let path = self.presets_dir().join(name);
        fs::write(&path, text).unwrap();
        path
    }

    /// Write raw text at a path relative to the root
    pub fn file(&self, relative: &str, text: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, text).unwrap();
        path
    }
}

impl Default for PresetTree {
    fn default() -> Self {
        Self::new()
    }
}

pub fn read_text(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

pub fn read_json(path: &Path) -> Document {
    serde_json::from_str(&read_text(path)).unwrap()
}

/// Names of all files in `dir`, sorted
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Pre-2.1 preset with the vignette under `crt`
pub fn legacy_preset() -> Document {
    json!({
        "version": "2.0",
        "name": "neon noir",
        "effects": {
            "crt": {"vignette": 0.35, "vignette_width": 0.75, "curvature": 0.1},
            "bloom": {"threshold": 0.8}
        }
    })
}

/// Current preset with nothing left to migrate
pub fn current_preset() -> Document {
    json!({
        "version": "2.1",
        "name": "daylight",
        "effects": {
            "color_grade": {
                "vignette_strength": 0.25,
                "vignette_width": 0.8,
                "vignette_feather": 0.2
            }
        }
    })
}

/// Grain preset without `downscale`
pub fn grain_preset() -> Document {
    json!({
        "version": "2.1",
        "effects": {"grain": {"intensity": 0.4, "size": 1.5}}
    })
}
