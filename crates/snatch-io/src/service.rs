//! Stable load/save service
//!
//! [`StableIo`] reads documents from disk and writes them back only when the
//! canonical serialization actually changed.
//!
//! # Change detection
//!
//! The service fingerprints the exact bytes it reads on `load` and the
//! canonical bytes it writes on `save_if_changed`. A save whose canonical
//! bytes match the recorded fingerprint for that path is skipped.
//!
//! The cache lives only as long as the service instance. Paths are used as
//! given, so `a.json` and `./a.json` are tracked separately.

use crate::atomic::write_atomic;
use crate::cache::FingerprintCache;
use crate::codec::{Codec, JsonCodec, YamlCodec};
use crate::diff;
use crate::error::{CodecError, LoadError, SaveError};
use crate::fingerprint::Fingerprint;
use crate::{Document, Map};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// Stable I/O service for JSON files
pub type JsonIo = StableIo<JsonCodec>;

/// Stable I/O service for YAML files
pub type YamlIo = StableIo<YamlCodec>;

/// Load/save service with fingerprint-based change detection
#[derive(Debug, Default)]
pub struct StableIo<C: Codec> {
    codec: C,
    cache: FingerprintCache,
}

impl<C: Codec> StableIo<C> {
    /// Create service with an empty cache
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create service around an existing cache
    #[inline]
    #[must_use]
    pub fn with_cache(cache: FingerprintCache) -> Self {
        Self {
            codec: C::default(),
            cache,
        }
    }

    /// Codec used by this service
    #[inline]
    #[must_use]
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Fingerprint cache
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &FingerprintCache {
        &self.cache
    }

    /// Mutable fingerprint cache (for caller-driven eviction)
    #[inline]
    pub fn cache_mut(&mut self) -> &mut FingerprintCache {
        &mut self.cache
    }

    /// Last recorded fingerprint for `path`
    #[inline]
    #[must_use]
    pub fn fingerprint_of(&self, path: impl AsRef<Path>) -> Option<Fingerprint> {
        self.cache.get(path.as_ref())
    }

    /// Canonical text for `document`
    ///
    /// # Errors
    /// Returns error if the document cannot be encoded
    #[inline]
    pub fn canonical(&self, document: &Document) -> Result<String, CodecError> {
        self.codec.encode(document)
    }

    /// Load a document
    ///
    /// Returns `Ok(None)` if the file does not exist. On a successful read
    /// the fingerprint of the raw bytes is recorded for `path`, even if the
    /// content then fails to parse.
    ///
    /// `load(save(D)) == D` holds for every document except `null`: a
    /// `null` or empty file loads as an empty object, so saving `null` and
    /// loading it back yields `{}`.
    ///
    /// # Errors
    /// Returns [`LoadError::Io`] if the file cannot be read and
    /// [`LoadError::Parse`] if its content is not valid for the codec.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Option<Document>, LoadError> {
        let path = path.as_ref();
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "file absent");
                return Ok(None);
            }
            Err(err) => return Err(LoadError::io_error(path, err)),
        };

        let fingerprint = Fingerprint::compute(&bytes);
        self.cache.record(path, fingerprint);

        let text = std::str::from_utf8(&bytes).map_err(|e| LoadError::parse_error(path, e))?;
        let document = self
            .codec
            .decode(text)
            .map_err(|e| LoadError::parse_error(path, e))?;

        debug!(
            path = %path.display(),
            format = %C::FORMAT,
            fingerprint = %fingerprint.short(),
            "loaded"
        );

        Ok(Some(match document {
            Document::Null => Document::Object(Map::new()),
            other => other,
        }))
    }

    /// Save a document if its canonical form changed
    ///
    /// Returns `Ok(false)` without touching the filesystem when `force` is
    /// false and the canonical bytes match the recorded fingerprint for
    /// `path`. Otherwise writes atomically and returns `Ok(true)`.
    ///
    /// # Errors
    /// Returns [`SaveError`] if encoding or writing fails. The target file is
    /// untouched and the cache is not updated in that case.
    pub fn save_if_changed(
        &mut self,
        path: impl AsRef<Path>,
        document: &Document,
        force: bool,
    ) -> Result<bool, SaveError> {
        let path = path.as_ref();
        let content = self.codec.encode(document).map_err(|source| SaveError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        let fingerprint = Fingerprint::compute(content.as_bytes());

        if !force && self.cache.matches(path, &fingerprint) {
            debug!(path = %path.display(), "unchanged, skipping write");
            return Ok(false);
        }

        write_atomic(path, content.as_bytes())?;
        self.cache.record(path, fingerprint);

        info!(
            path = %path.display(),
            format = %C::FORMAT,
            fingerprint = %fingerprint.short(),
            forced = force,
            "saved"
        );
        Ok(true)
    }

    /// Terse description of what changed between two documents
    ///
    /// See [`diff::diff_summary`].
    #[inline]
    #[must_use]
    pub fn diff_summary(&self, old: &Document, new: &Document) -> String {
        diff::diff_summary(old, new)
    }
}
