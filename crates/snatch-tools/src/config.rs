//! Tool configuration
//!
//! An optional JSON or YAML file, loaded through the same stable I/O
//! service the tools use for presets. Every field has a default, and
//! command-line flags take precedence.
//!
//! ```yaml
//! preset_dirs:
//!   - game/json/presets/shaders
//!   - mods/shaders
//! backup: true
//! log_level: debug
//! ```

use serde::{Deserialize, Serialize};
use snatch_io::{Document, Format, JsonIo, LoadError, YamlIo};
use snatch_preset::DEFAULT_PRESET_DIRS;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings for all subcommands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Preset directories, relative to the game root
    pub preset_dirs: Vec<PathBuf>,
    /// Back up files before overwriting them
    pub backup: bool,
    /// Log level when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            preset_dirs: DEFAULT_PRESET_DIRS.iter().map(PathBuf::from).collect(),
            backup: false,
            log_level: "info".to_string(),
        }
    }
}

impl ToolsConfig {
    /// Load from a JSON or YAML file
    ///
    /// # Errors
    /// Fails if the file is missing, has an unknown extension, cannot be
    /// parsed, or has fields of the wrong type.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let document = match Format::from_path(path) {
            Some(Format::Json) => JsonIo::new().load(path)?,
            Some(Format::Yaml) => YamlIo::new().load(path)?,
            None => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
        .ok_or_else(|| ConfigError::Missing(path.to_path_buf()))?;

        let config = Self::from_document(document).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), ?config, "loaded tool config");
        Ok(config)
    }

    /// Build from an already loaded document
    ///
    /// # Errors
    /// Fails on unknown fields or fields of the wrong type.
    pub fn from_document(document: Document) -> Result<Self, serde_json::Error> {
        serde_json::from_value(document)
    }

    /// Preset directories resolved against `root`
    #[must_use]
    pub fn preset_dirs_under(&self, root: &Path) -> Vec<PathBuf> {
        self.preset_dirs.iter().map(|dir| root.join(dir)).collect()
    }
}

/// Errors loading the tool configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The named file does not exist
    #[error("config file not found: {0}")]
    Missing(PathBuf),

    /// Neither JSON nor YAML by extension
    #[error("config file must be .json, .yaml or .yml: {0}")]
    UnsupportedFormat(PathBuf),

    /// Could not read or parse the file
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Parsed, but not a valid configuration
    #[error("invalid config {path}: {source}")]
    Invalid {
        /// Config path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}
