//! Batch migration over preset directories
//!
//! ```text
//! discover(dirs) ──► for each file ──► load ──► apply ──► backup? ──► save
//!                                        │                   │
//!                                        └── failed ◄────────┘
//! ```
//!
//! A failing file is recorded and the batch moves on.

use crate::backup::backup_path;
use crate::migration::Migration;
use crate::report::MigrationReport;
use snatch_io::{JsonIo, LoadError, SaveError};
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Shader preset directories, relative to the game root
pub const DEFAULT_PRESET_DIRS: [&str; 2] = ["game/json/presets/shaders", "game/json/custom/shaders"];

/// Default preset directories under `root`
#[must_use]
pub fn default_preset_dirs(root: &Path) -> Vec<PathBuf> {
    DEFAULT_PRESET_DIRS.iter().map(|dir| root.join(dir)).collect()
}

/// Candidate files for `migration` in `dirs`, sorted
///
/// Missing directories are skipped with a warning. Subdirectories are not
/// descended into.
#[must_use]
pub fn discover(dirs: &[PathBuf], migration: &dyn Migration) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for dir in dirs {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(dir = %dir.display(), "preset directory not found, skipping");
                continue;
            }
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "cannot read preset directory, skipping");
                continue;
            }
        };
        found.extend(
            entries
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|path| path.is_file() && migration.selects(path)),
        );
    }
    found.sort();
    debug!(migration = migration.name(), count = found.len(), "discovered presets");
    found
}

/// Options for a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    /// Compute and report changes without writing anything
    pub dry_run: bool,
    /// Copy each file to its backup before overwriting it
    pub backup: bool,
}

/// Why a single file failed
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// The file does not exist
    #[error("file not found: {0}")]
    Absent(PathBuf),

    /// The file could not be read or parsed
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The migrated document could not be written
    #[error(transparent)]
    Save(#[from] SaveError),

    /// The backup copy could not be made; the original is untouched
    #[error("cannot back up to {path}: {source}")]
    Backup {
        /// Backup path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

/// Outcome for one file
#[derive(Debug)]
pub enum FileOutcome {
    /// The migration made edits (written unless dry run)
    Changed,
    /// Nothing to migrate
    Unchanged,
    /// The file was skipped
    Failed(BatchError),
}

/// Result for one file of a batch
#[derive(Debug)]
pub struct FileReport {
    /// File path
    pub path: PathBuf,
    /// What happened
    pub outcome: FileOutcome,
    /// Edits made (empty on failure)
    pub report: MigrationReport,
    /// Backup written, if any
    pub backup: Option<PathBuf>,
    /// Migrated document was written to `path`
    pub written: bool,
}

impl Display for FileReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match &self.outcome {
            FileOutcome::Changed => {
                let notes: Vec<_> = self.report.edits().iter().map(ToString::to_string).collect();
                write!(f, "changed   {path}: {}", notes.join("; "))
            }
            FileOutcome::Unchanged => match self.report.skip_reason() {
                Some(reason) => write!(f, "unchanged {path} ({reason})"),
                None => write!(f, "unchanged {path}"),
            },
            FileOutcome::Failed(e) => write!(f, "failed    {path}: {e}"),
        }
    }
}

/// Results of a whole batch
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Per-file results in processing order
    pub files: Vec<FileReport>,
    /// Whether this was a dry run
    pub dry_run: bool,
}

impl BatchReport {
    /// Files the migration changed
    #[must_use]
    pub fn changed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Changed))
    }

    /// Files left as they were
    #[must_use]
    pub fn unchanged(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Unchanged))
    }

    /// Files that failed
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed(_)))
    }

    /// Total files processed
    #[must_use]
    pub fn total(&self) -> usize {
        self.files.len()
    }

    /// Failed files with their errors
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &BatchError)> {
        self.files.iter().filter_map(|file| match &file.outcome {
            FileOutcome::Failed(e) => Some((file.path.as_path(), e)),
            _ => None,
        })
    }

    /// One-line summary, e.g. `2 files changed out of 5`
    #[must_use]
    pub fn summary(&self) -> String {
        let verb = if self.dry_run { "would be changed" } else { "changed" };
        let mut line = format!("{} files {verb} out of {}", self.changed(), self.total());
        if self.failed() > 0 {
            line.push_str(&format!(", {} failed", self.failed()));
        }
        line
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|file| pred(&file.outcome)).count()
    }
}

/// Runs migrations over files through one I/O service
#[derive(Debug, Default)]
pub struct BatchRunner {
    io: JsonIo,
    options: BatchOptions,
}

impl BatchRunner {
    /// Create runner with a fresh service
    #[must_use]
    pub fn new(options: BatchOptions) -> Self {
        Self {
            io: JsonIo::new(),
            options,
        }
    }

    /// Options in effect
    #[inline]
    #[must_use]
    pub fn options(&self) -> BatchOptions {
        self.options
    }

    /// Apply `migration` to every file in `files`, in order
    pub fn run(&mut self, migration: &dyn Migration, files: &[PathBuf]) -> BatchReport {
        info!(
            migration = migration.name(),
            files = files.len(),
            dry_run = self.options.dry_run,
            "starting batch"
        );

        let mut report = BatchReport {
            files: Vec::with_capacity(files.len()),
            dry_run: self.options.dry_run,
        };
        for path in files {
            let file = self.run_one(migration, path);
            report.files.push(file);
        }

        info!(
            changed = report.changed(),
            unchanged = report.unchanged(),
            failed = report.failed(),
            "batch complete"
        );
        report
    }

    fn run_one(&mut self, migration: &dyn Migration, path: &Path) -> FileReport {
        let mut file = FileReport {
            path: path.to_path_buf(),
            outcome: FileOutcome::Unchanged,
            report: MigrationReport::new(),
            backup: None,
            written: false,
        };
        match self.process(migration, path, &mut file) {
            Ok(changed) => {
                if changed {
                    file.outcome = FileOutcome::Changed;
                }
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "skipping file");
                file.outcome = FileOutcome::Failed(e);
            }
        }
        file
    }

    fn process(
        &mut self,
        migration: &dyn Migration,
        path: &Path,
        file: &mut FileReport,
    ) -> Result<bool, BatchError> {
        let original = self
            .io
            .load(path)?
            .ok_or_else(|| BatchError::Absent(path.to_path_buf()))?;
        let mut document = original.clone();
        file.report = migration.apply(&mut document);

        if !file.report.changed() {
            if let Some(reason) = file.report.skip_reason() {
                debug!(path = %path.display(), reason, "nothing to migrate");
            }
            return Ok(false);
        }

        for edit in file.report.edits() {
            info!(path = %path.display(), "{edit}");
        }
        debug!(
            path = %path.display(),
            diff = %self.io.diff_summary(&original, &document),
            "migration diff"
        );

        if self.options.dry_run {
            return Ok(true);
        }

        if self.options.backup {
            let backup = backup_path(path);
            fs::copy(path, &backup).map_err(|source| BatchError::Backup {
                path: backup.clone(),
                source,
            })?;
            info!(path = %path.display(), backup = %backup.display(), "backup written");
            file.backup = Some(backup);
        }

        file.written = self.io.save_if_changed(path, &document, false)?;
        if !file.written {
            debug!(path = %path.display(), "canonical bytes already on disk");
        }
        Ok(true)
    }
}
