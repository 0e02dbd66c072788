//! Preset version tags
//!
//! A version tag is read as a single number: `"2.0"`, `"2.1"` or a bare
//! JSON number. Tags compare as floats, so `"2.05"` is older than `"2.1"`
//! and `"2.1e0"` equals it. Anything that does not read as a number
//! (`"2.1.1"`, `"beta"`, `true`) is treated as older than every real
//! version.

use snatch_io::Document;
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Numeric preset version
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PresetVersion(f64);

impl PresetVersion {
    /// First version with the vignette under color grading
    pub const VIGNETTE_RELOCATED: Self = Self(2.1);

    /// Create from a number
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Numeric value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Declared version of a preset document
    ///
    /// Accepts a numeric string or a bare number. Returns `None` when the
    /// field is absent or does not read as a number.
    #[must_use]
    pub fn of(document: &Document) -> Option<Self> {
        match document.get(crate::VERSION_KEY)? {
            Document::String(text) => text.parse().ok(),
            Document::Number(number) => number.as_f64().map(Self),
            _ => None,
        }
    }

    /// Whether `document` declares at least `self`
    ///
    /// False for missing, unreadable and `NaN` tags.
    #[must_use]
    pub fn reached_by(self, document: &Document) -> bool {
        Self::of(document)
            .and_then(|declared| declared.partial_cmp(&self))
            .is_some_and(Ordering::is_ge)
    }
}

impl FromStr for PresetVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(VersionError::Empty);
        }
        trimmed
            .parse::<f64>()
            .map(Self)
            .map_err(|_| VersionError::NotANumber(trimmed.to_string()))
    }
}

impl Display for PresetVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors when parsing a version tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    /// Empty or whitespace-only tag
    #[error("empty version")]
    Empty,

    /// Not readable as a number
    #[error("version is not a number: '{0}'")]
    NotANumber(String),
}
