//! Error types for the I/O service
//!
//! Provides error handling for:
//! - Codec operations (text ↔ document)
//! - Load operations (file → document)
//! - Save operations (document → file)
//!
//! A missing file is not an error: `load` reports it as `Ok(None)`.

use std::path::PathBuf;

/// Errors while decoding or encoding a document
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// JSON syntax or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML syntax or serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File content is not valid UTF-8
    #[error("content is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Errors while loading a document from disk
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file exists but could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but its content could not be parsed
    #[error("parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
}

impl LoadError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create parse error for path
    pub fn parse_error(path: impl Into<PathBuf>, source: impl Into<CodecError>) -> Self {
        Self::Parse {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Path the failed load was for
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

/// Errors while saving a document to disk
///
/// Whatever the variant, the target file is left as it was before the call.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// Document could not be serialized
    #[error("serialization failed for {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    /// Parent directory could not be created
    #[error("cannot create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Temporary file could not be created or written
    #[error("io error writing temporary file for {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Temporary file could not be renamed over the target
    #[error("cannot replace {path}: {source}")]
    Rename {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SaveError {
    /// Path the failed save was for
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Encode { path, .. }
            | Self::CreateDir { path, .. }
            | Self::Write { path, .. }
            | Self::Rename { path, .. } => path,
        }
    }
}
