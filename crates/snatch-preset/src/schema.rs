//! Preset field names and shape checks
//!
//! Only the keys the migrations touch are named here; everything else in a
//! preset passes through untouched.

use snatch_io::{Document, Map};

/// Top-level version tag
pub const VERSION_KEY: &str = "version";
/// Top-level effects object
pub const EFFECTS: &str = "effects";
/// Color grading effect block
pub const COLOR_GRADE: &str = "color_grade";
/// CRT effect block
pub const CRT: &str = "crt";
/// Film grain effect block
pub const GRAIN: &str = "grain";

/// Version tag of presets before the vignette moved to color grading
pub const VERSION_2_0: &str = "2.0";
/// Version tag of presets with the vignette under color grading
pub const VERSION_2_1: &str = "2.1";

/// What sits under a key of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    Absent,
    NotObject,
    Object,
}

pub(crate) fn shape(map: &Map, key: &str) -> Shape {
    match map.get(key) {
        None => Shape::Absent,
        Some(Document::Object(_)) => Shape::Object,
        Some(_) => Shape::NotObject,
    }
}

/// The object under `key`, if that is what is there
pub(crate) fn object<'a>(map: &'a Map, key: &str) -> Option<&'a Map> {
    map.get(key).and_then(Document::as_object)
}

/// Mutable object under `key`, if that is what is there
pub(crate) fn object_mut<'a>(map: &'a mut Map, key: &str) -> Option<&'a mut Map> {
    map.get_mut(key).and_then(Document::as_object_mut)
}

/// Mutable object under `key`, inserting an empty one if absent
///
/// Returns `None` when the key holds something other than an object.
pub(crate) fn object_or_insert<'a>(map: &'a mut Map, key: &str) -> Option<&'a mut Map> {
    map.entry(key)
        .or_insert_with(|| Document::Object(Map::new()))
        .as_object_mut()
}

/// Dotted path for reports
pub(crate) fn dotted(parts: &[&str]) -> String {
    parts.join(".")
}
