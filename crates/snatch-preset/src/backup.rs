//! Backup file naming
//!
//! A backup of `grain_fine.json` is `grain_fine.bak.json`, next to it.
//! Backups keep the original extension so editors still recognize them,
//! and directory scans never pick them up as presets.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

const BACKUP_MARKER: &str = "bak";

/// Path of the backup for `path`
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default();
    let mut name = OsString::from(stem);
    name.push(".");
    name.push(BACKUP_MARKER);
    if let Some(extension) = path.extension() {
        name.push(".");
        name.push(extension);
    }
    path.with_file_name(name)
}

/// Whether `path` names a backup file
#[must_use]
pub fn is_backup(path: &Path) -> bool {
    if path.extension().is_some_and(|ext| ext == BACKUP_MARKER) {
        return true;
    }
    path.file_stem()
        .and_then(|stem| Path::new(stem).extension())
        .is_some_and(|ext| ext == BACKUP_MARKER)
}
