//! Per-path fingerprint cache
//!
//! Remembers the fingerprint of the last content read from or written to
//! each path, so a save can be skipped when nothing changed.
//!
//! # Lifecycle
//! - Empty at construction.
//! - Populated per path on load and on successful save.
//! - Never evicted automatically; callers that need bounded memory evict
//!   with [`FingerprintCache::forget`] based on their own file set.

use crate::fingerprint::Fingerprint;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// In-memory map from file path to last known content fingerprint
#[derive(Debug, Clone, Default)]
pub struct FingerprintCache {
    entries: HashMap<PathBuf, Fingerprint>,
}

impl FingerprintCache {
    /// Create empty cache
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fingerprint recorded for `path`, if any
    #[inline]
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<Fingerprint> {
        self.entries.get(path).copied()
    }

    /// Record the fingerprint for `path`, returning the previous one
    #[inline]
    pub fn record(&mut self, path: impl Into<PathBuf>, fingerprint: Fingerprint) -> Option<Fingerprint> {
        self.entries.insert(path.into(), fingerprint)
    }

    /// Check whether `fingerprint` matches what is recorded for `path`
    #[inline]
    #[must_use]
    pub fn matches(&self, path: &Path, fingerprint: &Fingerprint) -> bool {
        self.entries.get(path) == Some(fingerprint)
    }

    /// Drop the entry for `path`
    #[inline]
    pub fn forget(&mut self, path: &Path) -> Option<Fingerprint> {
        self.entries.remove(path)
    }

    /// Drop all entries
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of tracked paths
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no path is tracked
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let cache = FingerprintCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.get(Path::new("a.json")), None);
    }

    #[test]
    fn record_and_match() {
        let mut cache = FingerprintCache::new();
        let fp = Fingerprint::compute(b"one");
        assert_eq!(cache.record("a.json", fp), None);

        assert!(cache.matches(Path::new("a.json"), &fp));
        assert!(!cache.matches(Path::new("a.json"), &Fingerprint::compute(b"two")));
        assert!(!cache.matches(Path::new("b.json"), &fp));
    }

    #[test]
    fn record_replaces_previous() {
        let mut cache = FingerprintCache::new();
        let first = Fingerprint::compute(b"one");
        let second = Fingerprint::compute(b"two");
        cache.record("a.json", first);

        assert_eq!(cache.record("a.json", second), Some(first));
        assert_eq!(cache.get(Path::new("a.json")), Some(second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn forget_and_clear() {
        let mut cache = FingerprintCache::new();
        cache.record("a.json", Fingerprint::compute(b"a"));
        cache.record("b.json", Fingerprint::compute(b"b"));

        assert!(cache.forget(Path::new("a.json")).is_some());
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
